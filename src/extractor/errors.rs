use thiserror::Error;

use crate::fetcher::FetchError;

#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("article fetch failed: {0}")]
    Fetch(#[from] FetchError),

    #[error("no readable content found")]
    NoContent,
}
