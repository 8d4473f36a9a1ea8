use chrono::{DateTime, Utc};

use crate::{entities::ArticleRecord, feed::FeedItem, ingest::outcome::ExtractionOutcome};

/// Builds the record to persist for `item`. On the extracted path the page
/// supplies content, excerpt and images; otherwise the feed summary is the
/// content and `full_content_failed` is set.
pub fn build_record(item: &FeedItem, outcome: &ExtractionOutcome, source: &str) -> ArticleRecord {
    let published_at = parse_published_at(&item.published_at);
    let created_at = Utc::now();

    match outcome {
        ExtractionOutcome::Extracted(extracted) => {
            let content = extracted.body().to_string();
            let title = if extracted.title.trim().is_empty() {
                item.title.clone()
            } else {
                extracted.title.clone()
            };

            ArticleRecord {
                title,
                url: item.url.clone(),
                content_length: char_len(&content),
                content,
                published_at,
                source: source.to_string(),
                created_at,
                excerpt: extracted.excerpt.clone(),
                original_rss_content: item.raw_content.clone(),
                images: extracted.images.clone(),
                full_content_failed: None,
            }
        }
        ExtractionOutcome::FallbackUsed(_) => ArticleRecord {
            title: item.title.clone(),
            url: item.url.clone(),
            content: item.raw_content.clone(),
            content_length: char_len(&item.raw_content),
            published_at,
            source: source.to_string(),
            created_at,
            excerpt: String::new(),
            original_rss_content: item.raw_content.clone(),
            images: Vec::new(),
            full_content_failed: Some(true),
        },
    }
}

/// RSS dates are RFC 2822; some feeds emit RFC 3339. Anything else is
/// stamped with the current time.
pub fn parse_published_at(raw: &str) -> DateTime<Utc> {
    let raw = raw.trim();
    DateTime::parse_from_rfc2822(raw)
        .or_else(|_| DateTime::parse_from_rfc3339(raw))
        .map(|date| date.with_timezone(&Utc))
        .unwrap_or_else(|_| Utc::now())
}

fn char_len(content: &str) -> i64 {
    content.chars().count() as i64
}
