use scraper::{Html, Selector};
use std::collections::HashSet;
use std::sync::LazyLock;
use tracing::debug;
use url::Url;

static IMG_SELECTOR: LazyLock<Selector> = LazyLock::new(|| Selector::parse("img[src]").unwrap());

/// Every `<img>` in the document with a non-blank `src`, resolved against
/// `base_url`. Duplicates (after resolution) keep their first position.
pub fn collect_images(document: &Html, base_url: &Url) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut images = Vec::new();

    for element in document.select(&IMG_SELECTOR) {
        let Some(src) = element.value().attr("src").map(str::trim) else {
            continue;
        };
        if src.is_empty() {
            continue;
        }

        match base_url.join(src) {
            Ok(absolute) => {
                let absolute = String::from(absolute);
                if seen.insert(absolute.clone()) {
                    images.push(absolute);
                }
            }
            Err(err) => debug!(src, error = %err, "skipping unresolvable image source"),
        }
    }

    images
}
