use ammonia::Builder;
use regex::{Captures, Regex};
use std::sync::LazyLock;
use url::Url;

use crate::extractor::model::{ReadabilityResult, normalize_whitespace};

static LINK_ATTR_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(\s)(href|src)="([^"]+)""#).unwrap());

pub fn sanitize_and_resolve_links(result: &mut ReadabilityResult, base_url: &Url) {
    // Drops scripts, styles, forms and event handlers
    let clean_html = Builder::default().clean(&result.html).to_string();

    result.html = resolve_links(&clean_html, base_url);
    result.text = normalize_whitespace(&result.text);
}

fn resolve_links(html: &str, base_url: &Url) -> String {
    LINK_ATTR_REGEX
        .replace_all(html, |caps: &Captures| match base_url.join(&caps[3]) {
            Ok(absolute_url) => format!(r#"{}{}="{}""#, &caps[1], &caps[2], absolute_url),
            Err(_) => caps[0].to_string(),
        })
        .into_owned()
}
