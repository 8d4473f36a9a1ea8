use crate::fetcher::types::Charset;
use encoding_rs::Encoding;
use regex::Regex;
use std::sync::LazyLock;
use tracing::warn;

/// Only the head of a document is scanned for in-band charset declarations.
const SNIFF_LEN: usize = 4096;

static CHARSET_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)charset\s*=\s*["']?([^"'\s;]+)"#).unwrap());

static META_CHARSET_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)<meta\s+[^>]*?charset\s*=\s*["']?([^"'\s/>]+)"#).unwrap());

static META_HTTP_EQUIV_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<meta\s+[^>]*?http-equiv\s*=\s*["']?content-type["']?[^>]*?content\s*=\s*["']?[^"'>]*?charset\s*=\s*([^"'\s;/>]+)"#).unwrap()
});

static XML_DECL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)^\s*<\?xml\s+[^>]*?encoding\s*=\s*["']([^"']+)["']"#).unwrap()
});

/// Detects the body's charset and decodes it to UTF-8. Malformed sequences
/// become U+FFFD so one bad byte never costs the whole page.
pub fn decode_body(content_type: &str, body: &[u8]) -> (String, Charset) {
    let charset = detect_charset(content_type, body);
    let (decoded, _encoding, had_errors) = charset.encoding().decode(body);

    if had_errors {
        warn!(
            charset = charset.name(),
            "body contains malformed sequences, replaced"
        );
    }

    (decoded.into_owned(), charset)
}

/// Resolution order: Content-Type header, XML declaration, `<meta charset>`,
/// `<meta http-equiv>`, then a chardetng guess.
fn detect_charset(content_type: &str, body: &[u8]) -> Charset {
    if let Some(charset) = charset_from(&CHARSET_REGEX, content_type) {
        return charset;
    }

    let head = &body[..body.len().min(SNIFF_LEN)];
    let head_str = String::from_utf8_lossy(head);

    for regex in [&*XML_DECL_REGEX, &*META_CHARSET_REGEX, &*META_HTTP_EQUIV_REGEX] {
        if let Some(charset) = charset_from(regex, &head_str) {
            return charset;
        }
    }

    let mut detector = chardetng::EncodingDetector::new();
    detector.feed(head, body.len() <= SNIFF_LEN);
    Charset::from_encoding(detector.guess(None, true))
}

fn charset_from(regex: &Regex, haystack: &str) -> Option<Charset> {
    let label = regex.captures(haystack)?.get(1)?.as_str().to_lowercase();
    Encoding::for_label(label.as_bytes()).map(Charset::from_encoding)
}
