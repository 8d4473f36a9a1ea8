use readability::extractor;
use scraper::{ElementRef, Html, Selector};
use tracing::debug;
use url::Url;

use crate::extractor::model::{ReadabilityResult, normalize_whitespace};

const MIN_CANDIDATE_TEXT: usize = 100;

/// readability recurses once per element level; past this depth a page can
/// overflow the stack and abort the process.
pub const MAX_DOM_DEPTH: usize = 512;

const CONTENT_SELECTORS: &[&str] = &[
    "article",
    "main",
    "[role='main']",
    ".entry-content",
    ".post-content",
    ".content",
    ".post",
    ".article",
    "#content",
    "#main",
];

const DESCRIPTION_SELECTORS: &[&str] = &[
    "meta[name='description']",
    "meta[property='og:description']",
    "meta[name='twitter:description']",
];

/// Readability first, then a selector heuristic over the parsed document.
pub fn extract(html: &str, document: &Html, url: &Url) -> Option<ReadabilityResult> {
    match extractor::extract(&mut html.as_bytes(), url) {
        Ok(article) if !article.text.trim().is_empty() => {
            let title = if article.title.trim().is_empty() {
                extract_title(document).unwrap_or_default()
            } else {
                article.title.trim().to_string()
            };
            return Some(ReadabilityResult {
                title,
                text: article.text,
                html: article.content,
            });
        }
        Ok(_) => debug!("readability produced no text, using selector heuristics"),
        Err(err) => debug!(error = ?err, "readability failed, using selector heuristics"),
    }

    fallback_extract(document)
}

/// True when some node sits more than `limit` levels below the root. Only
/// leaves are checked and each walk stops at `limit`.
pub fn exceeds_depth(document: &Html, limit: usize) -> bool {
    document
        .tree
        .nodes()
        .filter(|node| !node.has_children())
        .any(|node| node.ancestors().nth(limit).is_some())
}

fn fallback_extract(document: &Html) -> Option<ReadabilityResult> {
    let (text, html) = extract_main_content(document)?;

    Some(ReadabilityResult {
        title: extract_title(document).unwrap_or_default(),
        text,
        html,
    })
}

fn first_text(document: &Html, selector: &str) -> Option<String> {
    let selector = Selector::parse(selector).ok()?;
    document
        .select(&selector)
        .map(|element| element.text().collect::<String>().trim().to_string())
        .find(|text| !text.is_empty())
}

fn first_attr(document: &Html, selector: &str, attr: &str) -> Option<String> {
    let selector = Selector::parse(selector).ok()?;
    document
        .select(&selector)
        .filter_map(|element| element.value().attr(attr))
        .map(str::trim)
        .find(|value| !value.is_empty())
        .map(str::to_string)
}

pub fn extract_title(document: &Html) -> Option<String> {
    first_attr(document, "meta[property='og:title']", "content")
        .or_else(|| first_text(document, "title"))
        .or_else(|| first_text(document, "h1"))
}

fn extract_main_content(document: &Html) -> Option<(String, String)> {
    for selector_str in CONTENT_SELECTORS {
        let Ok(selector) = Selector::parse(selector_str) else {
            continue;
        };
        if let Some(element) = document
            .select(&selector)
            .find(|element| text_of(element).trim().len() > MIN_CANDIDATE_TEXT)
        {
            return Some((text_of(&element), element.html()));
        }
    }

    // Last resort: the whole body, as long as it says anything at all
    let body_selector = Selector::parse("body").ok()?;
    let body = document.select(&body_selector).next()?;
    let text = text_of(&body);
    if text.trim().is_empty() {
        return None;
    }
    Some((text, body.html()))
}

fn text_of(element: &ElementRef<'_>) -> String {
    element.text().collect()
}

/// Page description metadata, else the first non-empty paragraph of the
/// extracted content.
pub fn extract_excerpt(document: &Html, content_html: &str) -> String {
    for selector in DESCRIPTION_SELECTORS {
        if let Some(description) = first_attr(document, selector, "content") {
            return normalize_whitespace(&description);
        }
    }

    let fragment = Html::parse_fragment(content_html);
    first_text(&fragment, "p")
        .map(|paragraph| normalize_whitespace(&paragraph))
        .unwrap_or_default()
}
