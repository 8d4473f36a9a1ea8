use chrono::Utc;

pub const NO_TITLE: &str = "No Title";
pub const NO_CONTENT: &str = "No content available";

/// One candidate article as announced by the feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedItem {
    pub title: String,
    /// Empty when the item carries neither a link nor a guid.
    pub url: String,
    pub published_at: String,
    pub raw_content: String,
}

impl FeedItem {
    /// Never fails: every field has a default.
    pub fn from_item(item: &rss::Item) -> Self {
        let title = non_blank(item.title())
            .map(str::trim)
            .unwrap_or(NO_TITLE)
            .to_string();

        let url = non_blank(item.link())
            .or_else(|| non_blank(item.guid().map(|guid| guid.value())))
            .map(str::trim)
            .unwrap_or_default()
            .to_string();

        let published_at = non_blank(item.pub_date())
            .map(|date| date.trim().to_string())
            .unwrap_or_else(|| Utc::now().to_rfc3339());

        let raw_content = non_blank(item.description())
            .or_else(|| non_blank(item.content()))
            .unwrap_or(NO_CONTENT)
            .to_string();

        Self {
            title,
            url,
            published_at,
            raw_content,
        }
    }
}

impl From<&rss::Item> for FeedItem {
    fn from(item: &rss::Item) -> Self {
        Self::from_item(item)
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}
