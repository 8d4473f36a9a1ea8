use tracing::{Instrument, error, info, info_span, instrument, warn};

use crate::{
    extractor::get_full_article_content,
    feed::{FeedError, FeedItem, read_feed},
    fetcher::RetryPolicy,
    ingest::{
        context::IngestContext,
        outcome::{ExtractionOutcome, FallbackReason, IngestStats, ItemOutcome, SkipReason},
        record::build_record,
    },
};

/// Extracted bodies shorter than this (in characters) lose to the feed
/// summary.
pub const MIN_CONTENT_LENGTH: usize = 100;

/// Outcome of one configured feed.
#[derive(Debug)]
pub struct FeedReport {
    pub feed_url: String,
    pub result: Result<IngestStats, FeedError>,
}

/// Processes every configured feed, one after the other. A feed that cannot
/// be fetched or parsed is reported and the next one still runs.
pub async fn run(ctx: &IngestContext, feed_urls: &[String]) -> Vec<FeedReport> {
    let mut reports = Vec::with_capacity(feed_urls.len());

    for feed_url in feed_urls {
        let result = ingest_feed(ctx, feed_url).await;
        match &result {
            Ok(stats) => info!(
                feed_url = %feed_url,
                new = stats.new_articles,
                skipped = stats.skipped_articles,
                failed = stats.failed_articles,
                total = stats.total(),
                "Feed summary"
            ),
            Err(err) => error!(feed_url = %feed_url, error = %err, "Feed could not be processed"),
        }
        reports.push(FeedReport {
            feed_url: feed_url.clone(),
            result,
        });
    }

    reports
}

pub async fn ingest_feed(ctx: &IngestContext, feed_url: &str) -> Result<IngestStats, FeedError> {
    let items = read_feed(feed_url, &ctx.retry).await?;
    Ok(ingest_items(ctx, &items).await)
}

/// Items are handled strictly in order; one item's failure never stops the
/// rest.
pub async fn ingest_items(ctx: &IngestContext, items: &[FeedItem]) -> IngestStats {
    let mut stats = IngestStats::default();

    for item in items {
        let span = info_span!("item", title = %item.title, url = %item.url);
        match process_item(ctx, item).instrument(span).await {
            Ok(outcome) => stats.record(outcome),
            Err(err) => {
                error!(title = %item.title, error = %err, "Error processing article");
                stats.record_failure();
            }
        }
    }

    stats
}

/// Errors returned here are the unexpected ones (the store query itself
/// failing); every anticipated failure is folded into the [`ItemOutcome`].
pub async fn process_item(ctx: &IngestContext, item: &FeedItem) -> anyhow::Result<ItemOutcome> {
    if item.url.is_empty() {
        warn!("Skipping article without URL");
        return Ok(ItemOutcome::Skipped(SkipReason::NoUrl));
    }

    if ctx.store.exists(&item.url, &item.title).await? {
        info!("Skipping existing article");
        return Ok(ItemOutcome::Skipped(SkipReason::AlreadyStored));
    }

    let outcome = extract_outcome(&item.url, &ctx.retry).await;
    let fallback = matches!(outcome, ExtractionOutcome::FallbackUsed(_));
    if let ExtractionOutcome::FallbackUsed(reason) = &outcome {
        warn!(reason = %reason, "Full content unavailable, using feed content");
    }

    let record = build_record(item, &outcome, &ctx.source);

    match ctx.store.insert(&record).await {
        Ok(()) => {
            info!(
                chars = record.content_length,
                images = record.images.len(),
                fallback,
                "Saved article"
            );
            Ok(ItemOutcome::Saved { fallback })
        }
        Err(err) => {
            error!(error = %err, "Failed to save article");
            Ok(ItemOutcome::SaveFailed)
        }
    }
}

/// Fetch + extract, then the quality gate. Never fails: any problem selects
/// the fallback.
#[instrument(skip(retry))]
pub async fn extract_outcome(url: &str, retry: &RetryPolicy) -> ExtractionOutcome {
    match get_full_article_content(url, retry).await {
        Ok(content) => {
            let length = content.body().chars().count();
            if length < MIN_CONTENT_LENGTH {
                ExtractionOutcome::FallbackUsed(FallbackReason::QualityGate { length })
            } else {
                ExtractionOutcome::Extracted(content)
            }
        }
        Err(err) => ExtractionOutcome::FallbackUsed(FallbackReason::Extraction(err)),
    }
}
