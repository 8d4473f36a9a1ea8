use std::fmt;

use crate::extractor::{ExtractError, ExtractedContent};

/// Result of trying to get the full article. Failure is a normal outcome
/// here: it selects the feed-summary fallback.
#[derive(Debug)]
pub enum ExtractionOutcome {
    Extracted(ExtractedContent),
    FallbackUsed(FallbackReason),
}

#[derive(Debug)]
pub enum FallbackReason {
    /// Fetching or extracting the page failed.
    Extraction(ExtractError),
    /// Extraction worked but produced fewer than the minimum characters.
    QualityGate { length: usize },
}

impl fmt::Display for FallbackReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Extraction(err) => write!(f, "{err}"),
            Self::QualityGate { length } => {
                write!(f, "extracted content too short ({length} chars)")
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    NoUrl,
    AlreadyStored,
}

/// Terminal state of one feed item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemOutcome {
    Saved { fallback: bool },
    Skipped(SkipReason),
    SaveFailed,
}

/// Per-feed counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IngestStats {
    pub new_articles: usize,
    pub skipped_articles: usize,
    pub failed_articles: usize,
}

impl IngestStats {
    pub fn record(&mut self, outcome: ItemOutcome) {
        match outcome {
            ItemOutcome::Saved { .. } => self.new_articles += 1,
            ItemOutcome::Skipped(_) => self.skipped_articles += 1,
            ItemOutcome::SaveFailed => self.failed_articles += 1,
        }
    }

    pub fn record_failure(&mut self) {
        self.failed_articles += 1;
    }

    pub fn total(&self) -> usize {
        self.new_articles + self.skipped_articles + self.failed_articles
    }
}
