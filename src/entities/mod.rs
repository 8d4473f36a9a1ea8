use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// --- Tables ---

/// A stored article. Written once by the ingestion pipeline and never
/// updated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct ArticleRecord {
    pub title: String,
    pub url: String, // natural dedup key, UNIQUE in the schema
    pub content: String,
    pub published_at: DateTime<Utc>,
    pub source: String,
    pub created_at: DateTime<Utc>,
    pub content_length: i64, // always content.chars().count()
    pub excerpt: String,
    pub original_rss_content: String,
    pub images: Vec<String>,
    /// `Some(true)` when the feed summary stood in for the article page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_content_failed: Option<bool>,
}
