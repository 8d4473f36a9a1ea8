use std::fs;
use url::Url;

use crate::extractor::{ExtractError, extract_article_content};

const ARTICLE_URL: &str = "https://example.com/2024/fraud-story";

fn fixture(name: &str) -> String {
    fs::read_to_string(format!("src/extractor/tests/fixtures/{name}"))
        .expect("Failed to read test fixture")
}

#[test]
fn test_extract_article() {
    let html = fixture("article.html");

    let content = extract_article_content(&html, &Url::parse(ARTICLE_URL).unwrap()).unwrap();

    // Readability may or may not keep the site suffix
    assert!(content.title.contains("Sample Article"));
    assert!(content.text.contains("first paragraph"));
    assert!(content.text.contains("second paragraph"));
    assert!(!content.html.contains("<script"));
    assert!(content.html.contains("https://example.com/related"));
    assert_eq!(
        content.excerpt,
        "How a fake vendor invoice slipped past three approval layers."
    );
    assert_eq!(content.length, content.text.split_whitespace().count());
    assert!(content.text.chars().count() >= 100);
}

#[test]
fn test_images_come_from_whole_document() {
    let html = fixture("article.html");

    let content = extract_article_content(&html, &Url::parse(ARTICLE_URL).unwrap()).unwrap();

    // The nav/footer logo is outside the article yet still collected, once
    assert_eq!(
        content.images,
        vec![
            "https://example.com/images/logo.png",
            "https://example.com/images/sample.jpg",
            "https://example.com/2024/chart.png",
        ]
    );
}

#[test]
fn test_minimal_valid_content() {
    let html = format!(
        r#"<!DOCTYPE html><html><head><title>Valid Article</title></head><body><article><h1>Valid Article</h1><p>{}</p></article></body></html>"#,
        "This is a valid article with enough content to pass the minimum requirements for extraction. ".repeat(20)
    );

    let content =
        extract_article_content(&html, &Url::parse("https://example.com/valid").unwrap()).unwrap();

    assert_eq!(content.title, "Valid Article");
    assert!(content.text.len() > 250);
    assert!(content.images.is_empty());
    // No description meta: the first paragraph stands in
    assert!(content.excerpt.starts_with("This is a valid article"));
}

#[test]
fn test_empty_page_has_no_content() {
    let html = "<html><head><title>Nothing here</title></head><body>   </body></html>";

    let result = extract_article_content(html, &Url::parse("https://example.com/empty").unwrap());

    assert!(matches!(result, Err(ExtractError::NoContent)));
}

#[test]
fn test_malformed_html() {
    let html = "<html><head><title>Broken</title><body><p>Unclosed tags<div>More content";

    let result = extract_article_content(html, &Url::parse("https://example.com/broken").unwrap());

    let content = result.expect("malformed markup should still extract");
    assert_eq!(content.title, "Broken");
    assert!(content.text.contains("Unclosed tags"));
}

#[test]
fn test_deeply_nested_page_is_refused_without_crashing() {
    let html = format!(
        "<html><head><title>Nested</title></head><body>{}<p>{}</p>{}</body></html>",
        "<div>".repeat(2000),
        "Deeply buried paragraph about a procurement fraud ring. ".repeat(5),
        "</div>".repeat(2000),
    );

    let result = extract_article_content(&html, &Url::parse("https://example.com/nested").unwrap());

    assert!(matches!(result, Err(ExtractError::NoContent)));
}

#[test]
fn test_moderately_nested_page_still_extracts() {
    let html = format!(
        "<html><head><title>Layered</title></head><body>{}<article><p>{}</p></article>{}</body></html>",
        "<div>".repeat(200),
        "Layered layout around a payroll fraud story. ".repeat(5),
        "</div>".repeat(200),
    );

    let content = extract_article_content(&html, &Url::parse("https://example.com/layered").unwrap())
        .expect("extraction should succeed");

    assert!(content.text.contains("payroll fraud story"));
}

#[cfg(feature = "fuzz")]
mod fuzz {
    use super::*;
    use crate::extractor::images::collect_images;
    use proptest::prelude::*;
    use scraper::Html;

    proptest! {
        #[test]
        fn test_extract_never_panics(
            html in ".*",
            path in "[a-z]{0,12}"
        ) {
            let url = Url::parse(&format!("https://example.com/{path}")).unwrap();
            let _ = extract_article_content(&html, &url);
        }

        #[test]
        fn test_images_are_unique(srcs in proptest::collection::vec("[a-c]{1,2}\\.png", 0..12)) {
            let body: String = srcs.iter().map(|src| format!(r#"<img src="{src}">"#)).collect();
            let document = Html::parse_document(&format!("<html><body>{body}</body></html>"));
            let url = Url::parse("https://example.com/").unwrap();

            let images = collect_images(&document, &url);

            let mut unique = images.clone();
            unique.sort();
            unique.dedup();
            prop_assert_eq!(unique.len(), images.len());
        }
    }
}
