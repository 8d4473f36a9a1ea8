use std::sync::Arc;

use crate::{fetcher::RetryPolicy, repositories::ArticleStore};

/// Everything one ingestion run needs, created at start-up and passed down
/// explicitly.
#[derive(Clone)]
pub struct IngestContext {
    pub store: Arc<dyn ArticleStore>,
    /// Value written to every record's `source` field.
    pub source: String,
    pub retry: RetryPolicy,
}

impl IngestContext {
    pub fn new(store: Arc<dyn ArticleStore>, source: impl Into<String>, retry: RetryPolicy) -> Self {
        Self {
            store,
            source: source.into(),
            retry,
        }
    }
}
