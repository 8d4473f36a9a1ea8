pub mod cleaner;
pub mod errors;
pub mod images;
pub mod model;
pub mod reader;

#[cfg(test)]
mod tests;

pub use errors::ExtractError;
pub use model::ExtractedContent;

use scraper::Html;
use tracing::{info, instrument, warn};
use url::Url;

use crate::fetcher::{ContentKind, PageResponse, RetryPolicy, fetch_with_retry};

pub async fn fetch_article_html(url: &str, retry: &RetryPolicy) -> Result<PageResponse, ExtractError> {
    let page = fetch_with_retry(url, ContentKind::Html, retry).await?;
    Ok(page)
}

/// Isolates the readable part of `html`. Images are collected from the whole
/// document, not only the extracted region.
pub fn extract_article_content(html: &str, base_url: &Url) -> Result<ExtractedContent, ExtractError> {
    let document = Html::parse_document(html);
    if reader::exceeds_depth(&document, reader::MAX_DOM_DEPTH) {
        warn!(url = %base_url, "Document nesting too deep to extract");
        return Err(ExtractError::NoContent);
    }
    let images = images::collect_images(&document, base_url);

    let mut result = reader::extract(html, &document, base_url).ok_or(ExtractError::NoContent)?;
    cleaner::sanitize_and_resolve_links(&mut result, base_url);

    let excerpt = reader::extract_excerpt(&document, &result.html);
    let length = result.text.split_whitespace().count();

    Ok(ExtractedContent {
        text: result.text,
        html: result.html,
        title: result.title,
        excerpt,
        length,
        images,
    })
}

/// Fetch followed by extraction, using the post-redirect URL as the base for
/// relative references. No recovery here: callers decide what a failure
/// means.
#[instrument(skip(retry))]
pub async fn get_full_article_content(
    url: &str,
    retry: &RetryPolicy,
) -> Result<ExtractedContent, ExtractError> {
    let page = fetch_article_html(url, retry).await?;
    let content = extract_article_content(&page.body_utf8, &page.url_final)?;

    info!(
        chars = content.text.chars().count(),
        words = content.length,
        images = content.images.len(),
        "Article content extracted"
    );

    Ok(content)
}
