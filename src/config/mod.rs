//! Configuration handling for the ingester.
//!
//! Everything comes from environment variables. Only the database URL is
//! mandatory; the rest falls back to defaults that ingest the Fraud of the
//! Day feed once.

use std::env;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Duration;

use crate::fetcher::RetryPolicy;

/// Environment variable names.
pub const ENV_DATABASE_URL: &str = "DATABASE_URL";
pub const ENV_FEED_URLS: &str = "FEED_URLS";
pub const ENV_ARTICLE_SOURCE: &str = "ARTICLE_SOURCE";
pub const ENV_FETCH_MAX_RETRIES: &str = "FETCH_MAX_RETRIES";
pub const ENV_FETCH_BACKOFF_MS: &str = "FETCH_BACKOFF_MS";
pub const ENV_LOG_FORMAT: &str = "LOG_FORMAT";

const DEFAULT_FEED_URL: &str = "https://fraudoftheday.com/feed/";
const DEFAULT_ARTICLE_SOURCE: &str = "fraudoftheday.com";

/// Shape of the log lines written to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

impl LogFormat {
    /// Read separately from [`Config`] so logging is up before the rest of
    /// the configuration is validated.
    pub fn from_env() -> Self {
        match env::var(ENV_LOG_FORMAT) {
            Ok(value) if value.eq_ignore_ascii_case("json") => Self::Json,
            _ => Self::Text,
        }
    }
}

/// Runtime configuration of one ingestion run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    database_url: String,
    feed_urls: Vec<String>,
    source: String,
    retry: RetryPolicy,
}

impl Config {
    /// Create a new config explicitly, with default source and retry policy.
    pub fn new(database_url: impl Into<String>, feed_urls: Vec<String>) -> Self {
        Self {
            database_url: database_url.into(),
            feed_urls,
            source: DEFAULT_ARTICLE_SOURCE.to_string(),
            retry: RetryPolicy::default(),
        }
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = source.into();
        self
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Load from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        let database_url = env::var(ENV_DATABASE_URL)
            .ok()
            .filter(|url| !url.trim().is_empty())
            .ok_or(ConfigError::Missing {
                var: ENV_DATABASE_URL,
            })?;

        let feed_urls = match env::var(ENV_FEED_URLS) {
            Ok(raw) => parse_feed_urls(&raw)?,
            Err(_) => vec![DEFAULT_FEED_URL.to_string()],
        };

        let source =
            env::var(ENV_ARTICLE_SOURCE).unwrap_or_else(|_| DEFAULT_ARTICLE_SOURCE.to_string());

        let defaults = RetryPolicy::default();
        let max_retries = parse_env_number(ENV_FETCH_MAX_RETRIES)?.unwrap_or(defaults.max_retries);
        let base_delay = parse_env_number(ENV_FETCH_BACKOFF_MS)?
            .map(Duration::from_millis)
            .unwrap_or(defaults.base_delay);

        Ok(Self {
            database_url,
            feed_urls,
            source,
            retry: RetryPolicy::new(max_retries, base_delay),
        })
    }

    /// Database connection string (PostgreSQL URL).
    pub fn database_url(&self) -> &str {
        &self.database_url
    }
    /// Feeds to ingest, in processing order.
    pub fn feed_urls(&self) -> &[String] {
        &self.feed_urls
    }
    /// Value stored in every article's `source` field.
    pub fn source(&self) -> &str {
        &self.source
    }
    pub fn retry_policy(&self) -> RetryPolicy {
        self.retry
    }
}

fn parse_feed_urls(raw: &str) -> Result<Vec<String>, ConfigError> {
    let urls: Vec<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|url| !url.is_empty())
        .map(str::to_string)
        .collect();

    if urls.is_empty() {
        return Err(ConfigError::InvalidValue {
            field: ENV_FEED_URLS,
            reason: "no feed URL given".to_string(),
        });
    }
    Ok(urls)
}

fn parse_env_number<T: std::str::FromStr>(var: &'static str) -> Result<Option<T>, ConfigError> {
    match env::var(var) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidValue {
                field: var,
                reason: format!("'{raw}' is not a non-negative integer"),
            }),
        Err(_) => Ok(None),
    }
}

/// Errors that can occur while building a configuration.
#[derive(Debug)]
pub enum ConfigError {
    Missing { var: &'static str },
    InvalidValue { field: &'static str, reason: String },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Missing { var } => {
                write!(f, "{} is not set in environment variables", var)
            }
            ConfigError::InvalidValue { field, reason } => {
                write!(f, "invalid value for '{}': {}", field, reason)
            }
        }
    }
}

impl Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    // Ensure environment-variable manipulating tests run serially.
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    fn clear_env() {
        for key in [
            ENV_DATABASE_URL,
            ENV_FEED_URLS,
            ENV_ARTICLE_SOURCE,
            ENV_FETCH_MAX_RETRIES,
            ENV_FETCH_BACKOFF_MS,
            ENV_LOG_FORMAT,
        ] {
            unsafe {
                env::remove_var(key);
            }
        }
    }

    #[test]
    fn missing_database_url_is_an_error() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();

        let err = Config::from_env().unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Missing {
                var: ENV_DATABASE_URL
            }
        ));
    }

    #[test]
    fn defaults_when_optional_env_missing() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        unsafe {
            env::set_var(ENV_DATABASE_URL, "postgres://localhost/gleaner");
        }

        let cfg = Config::from_env().unwrap();
        assert_eq!(cfg.database_url(), "postgres://localhost/gleaner");
        assert_eq!(cfg.feed_urls(), [DEFAULT_FEED_URL.to_string()]);
        assert_eq!(cfg.source(), DEFAULT_ARTICLE_SOURCE);
        assert_eq!(cfg.retry_policy(), RetryPolicy::default());
        assert_eq!(LogFormat::from_env(), LogFormat::Text);
    }

    #[test]
    fn overrides_when_env_present() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        unsafe {
            env::set_var(ENV_DATABASE_URL, "postgres://user:pw@db:5432/other");
            env::set_var(ENV_FEED_URLS, " https://a.example/feed , ,https://b.example/rss ");
            env::set_var(ENV_ARTICLE_SOURCE, "a.example");
            env::set_var(ENV_FETCH_MAX_RETRIES, "0");
            env::set_var(ENV_FETCH_BACKOFF_MS, "250");
            env::set_var(ENV_LOG_FORMAT, "JSON");
        }

        let cfg = Config::from_env().unwrap();
        assert_eq!(
            cfg.feed_urls(),
            ["https://a.example/feed".to_string(), "https://b.example/rss".to_string()]
        );
        assert_eq!(cfg.source(), "a.example");
        assert_eq!(
            cfg.retry_policy(),
            RetryPolicy::new(0, Duration::from_millis(250))
        );
        assert_eq!(LogFormat::from_env(), LogFormat::Json);
    }

    #[test]
    fn invalid_numbers_and_empty_feed_list_are_rejected() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        unsafe {
            env::set_var(ENV_DATABASE_URL, "postgres://localhost/gleaner");
            env::set_var(ENV_FETCH_MAX_RETRIES, "many");
        }
        assert!(matches!(
            Config::from_env(),
            Err(ConfigError::InvalidValue {
                field: ENV_FETCH_MAX_RETRIES,
                ..
            })
        ));

        unsafe {
            env::remove_var(ENV_FETCH_MAX_RETRIES);
            env::set_var(ENV_FEED_URLS, " , ");
        }
        assert!(matches!(
            Config::from_env(),
            Err(ConfigError::InvalidValue {
                field: ENV_FEED_URLS,
                ..
            })
        ));
    }

    #[test]
    fn explicit_constructor_uses_defaults() {
        let cfg = Config::new("postgres://x", vec!["https://f.example/feed".to_string()])
            .with_source("f.example")
            .with_retry(RetryPolicy::none());

        assert_eq!(cfg.source(), "f.example");
        assert_eq!(cfg.retry_policy(), RetryPolicy::none());
    }
}
