use bytes::Bytes;
use rss::Channel;
use tracing::{debug, info, instrument};

use crate::{
    feed::{errors::FeedError, item::FeedItem},
    fetcher::{ContentKind, RetryPolicy, fetch_with_retry},
};

/// Raw feed payload. Any successful response is returned; whether it is a
/// feed at all is for [`parse_feed`] to decide.
pub async fn fetch_feed(url: &str, retry: &RetryPolicy) -> Result<Bytes, FeedError> {
    let page = fetch_with_retry(url, ContentKind::Feed, retry).await?;
    debug!(
        bytes = page.body_raw.len(),
        content_type = %page.content_type,
        "Feed payload fetched"
    );
    Ok(page.body_raw)
}

/// Items of the channel in document order. A single item still comes back
/// as a one-element vector; an empty channel as an empty one.
pub fn parse_feed(payload: &[u8]) -> Result<Vec<rss::Item>, FeedError> {
    let channel = Channel::read_from(payload)?;
    Ok(channel.into_items())
}

#[instrument(skip(retry))]
pub async fn read_feed(url: &str, retry: &RetryPolicy) -> Result<Vec<FeedItem>, FeedError> {
    let payload = fetch_feed(url, retry).await?;
    let items = parse_feed(&payload)?;
    info!(count = items.len(), "Parsed feed items");

    Ok(items.iter().map(FeedItem::from_item).collect())
}
