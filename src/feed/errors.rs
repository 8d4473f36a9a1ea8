use thiserror::Error;

use crate::fetcher::FetchError;

#[derive(Error, Debug)]
pub enum FeedError {
    #[error("feed fetch failed: {0}")]
    Fetch(#[from] FetchError),

    #[error("feed parse failed: {0}")]
    Parse(#[from] rss::Error),
}
