pub mod client;
pub mod errors;
pub mod pipeline;
pub mod retry;
pub mod types;

pub use client::{fetch, fetch_with_retry};
pub use errors::FetchError;
pub use retry::RetryPolicy;
pub use types::{Charset, ContentKind, PageResponse};
