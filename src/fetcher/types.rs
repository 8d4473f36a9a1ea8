use bytes::Bytes;
use encoding_rs::Encoding;
use url::Url;

/// What the caller expects to receive. Drives the `Accept` header and the
/// content-type gate applied to the response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    /// An article page. Anything that is not HTML/XHTML is rejected.
    Html,
    /// A syndication feed. Servers label these inconsistently
    /// (`application/rss+xml`, `text/xml`, even `text/html`), so every
    /// content type is accepted and the parser decides.
    Feed,
}

impl ContentKind {
    pub fn accept_header(self) -> &'static str {
        match self {
            Self::Html => "text/html,application/xhtml+xml;q=0.9,*/*;q=0.8",
            Self::Feed => "application/rss+xml,application/xml;q=0.9,text/xml;q=0.9,*/*;q=0.8",
        }
    }

    pub fn assumed_content_type(self) -> &'static str {
        match self {
            Self::Html => "text/html",
            Self::Feed => "application/xml",
        }
    }

    pub fn accepts(self, content_type: &str) -> bool {
        match self {
            Self::Html => {
                content_type.contains("text/html") || content_type.contains("application/xhtml")
            }
            Self::Feed => true,
        }
    }
}

/// Character set a body was decoded from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Charset(&'static Encoding);

impl Charset {
    pub fn from_encoding(encoding: &'static Encoding) -> Self {
        Self(encoding)
    }

    pub fn encoding(&self) -> &'static Encoding {
        self.0
    }

    pub fn name(&self) -> &'static str {
        self.0.name()
    }
}

/// A successful response. Feed parsers honour the XML declaration
/// themselves and read `body_raw`; article extraction reads `body_utf8`.
#[derive(Debug)]
pub struct PageResponse {
    /// Address after redirects, the base for relative links.
    pub url_final: Url,
    pub content_type: String,
    pub body_raw: Bytes,
    pub body_utf8: String,
}
