use crate::fetcher::{
    errors::FetchError,
    pipeline::decode_body,
    retry::RetryPolicy,
    types::{ContentKind, PageResponse},
};
use once_cell::sync::Lazy;
use reqwest::{Client, ClientBuilder, header};
use std::time::Duration;
use tracing::{debug, instrument, warn};

const MAX_BODY_SIZE: u64 = 5 * 1024 * 1024; // 5MB
const USER_AGENT: &str = concat!("gleaner/", env!("CARGO_PKG_VERSION"));
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const MAX_REDIRECTS: usize = 10;

static HTTP_CLIENT: Lazy<Client> = Lazy::new(|| {
    ClientBuilder::new()
        .connect_timeout(CONNECT_TIMEOUT)
        .timeout(REQUEST_TIMEOUT)
        .user_agent(USER_AGENT)
        .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
        .build()
        .expect("Failed to build HTTP client")
});

/// Single GET attempt. Non-2xx statuses, oversized bodies and unexpected
/// content types are reported as [`FetchError`].
#[instrument(skip_all, fields(url = %url, kind = ?kind))]
pub async fn fetch(url: &str, kind: ContentKind) -> Result<PageResponse, FetchError> {
    let parsed_url = url::Url::parse(url)?;

    let response = HTTP_CLIENT
        .get(parsed_url)
        .header(header::ACCEPT, kind.accept_header())
        .send()
        .await?;

    let url_final = response.url().clone();
    let status = response.status();

    if !status.is_success() {
        return Err(FetchError::Http {
            status,
            retriable: status.is_server_error(),
        });
    }

    if let Some(content_length) = response.content_length()
        && content_length > MAX_BODY_SIZE
    {
        return Err(FetchError::BodyTooLarge(content_length));
    }

    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|ct| ct.to_str().ok())
        .unwrap_or(kind.assumed_content_type())
        .to_string();

    if !kind.accepts(&content_type) {
        return Err(FetchError::UnsupportedContentType(content_type));
    }

    let body_raw = response
        .bytes()
        .await
        .map_err(|e| FetchError::Io(e.to_string()))?;

    // Content-Length is absent for chunked and compressed responses
    if body_raw.len() as u64 > MAX_BODY_SIZE {
        return Err(FetchError::BodyTooLarge(body_raw.len() as u64));
    }

    let (body_utf8, charset) = decode_body(&content_type, &body_raw);

    debug!(
        status = %status,
        bytes = body_raw.len(),
        charset = charset.name(),
        final_url = %url_final,
        "fetched"
    );

    Ok(PageResponse {
        url_final,
        content_type,
        body_raw,
        body_utf8,
    })
}

/// [`fetch`], repeated with backoff while the failure is transient.
pub async fn fetch_with_retry(
    url: &str,
    kind: ContentKind,
    policy: &RetryPolicy,
) -> Result<PageResponse, FetchError> {
    let mut attempt = 0;
    loop {
        match fetch(url, kind).await {
            Ok(page) => return Ok(page),
            Err(err) if err.should_retry() && attempt < policy.max_retries => {
                let delay = policy.delay_for(attempt);
                attempt += 1;
                warn!(
                    url,
                    attempt,
                    delay_ms = delay.as_millis() as u64,
                    error = %err,
                    "Transient fetch failure, retrying"
                );
                tokio::time::sleep(delay).await;
            }
            Err(err) => return Err(err),
        }
    }
}
