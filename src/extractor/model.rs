use regex::Regex;
use std::sync::LazyLock;

static SPACE_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[ \t]+").unwrap());
static NEWLINE_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n\s*\n+").unwrap());

/// Readable content of one article page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedContent {
    pub text: String,
    pub html: String,
    pub title: String,
    pub excerpt: String,
    /// Word count of `text`.
    pub length: usize,
    /// Absolute image URLs found anywhere in the page, first-seen order,
    /// no duplicates.
    pub images: Vec<String>,
}

impl ExtractedContent {
    /// The body that gets stored: plain text, or the HTML when the text came
    /// out empty.
    pub fn body(&self) -> &str {
        if self.text.is_empty() {
            &self.html
        } else {
            &self.text
        }
    }
}

#[derive(Debug)]
pub struct ReadabilityResult {
    pub title: String,
    pub text: String,
    pub html: String,
}

pub fn normalize_whitespace(text: &str) -> String {
    let spaced = SPACE_REGEX.replace_all(text.trim(), " ");
    NEWLINE_REGEX.replace_all(&spaced, "\n\n").into_owned()
}
