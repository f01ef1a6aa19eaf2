//! Client configuration.
//!
//! All origin-specific knobs live in [`SiteConfig`], an explicit value passed
//! to the client constructor. There is no process-wide default state; two
//! clients with different configs never interact.

use std::time::Duration;

use rezka_common::{Error, Result};
use serde::{Deserialize, Serialize};
use url::Url;

/// Default origin the public mirrors redirect to.
pub const DEFAULT_BASE_URL: &str = "https://hdrezka.ag";

/// Browser identity presented on every request. The origin serves different
/// markup to non-browser agents, so this is part of the extraction contract.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// `Accept-Language` value matching the origin's primary audience.
pub const DEFAULT_ACCEPT_LANGUAGE: &str = "ru-RU,ru;q=0.9,en-US;q=0.8,en;q=0.7";

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for a [`RezkaClient`](crate::RezkaClient).
///
/// # Examples
///
/// ```
/// use rezka_client::SiteConfig;
///
/// let config = SiteConfig::new("https://hdrezka.ag").unwrap();
/// assert_eq!(config.base_url.as_str(), "https://hdrezka.ag/");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Origin all page fetches and AJAX calls are issued against. Mirrors
    /// are handled by constructing a client per mirror.
    pub base_url: Url,
    /// `User-Agent` header value.
    pub user_agent: String,
    /// `Accept-Language` header value.
    pub accept_language: String,
    /// Per-request timeout budget. The origin exposes no timeout of its own,
    /// so a hung upstream would otherwise block the caller indefinitely.
    pub timeout_secs: u64,
}

impl SiteConfig {
    /// Build a config for the given origin with default headers and timeout.
    ///
    /// Fails with [`Error::Validation`] when `base_url` is not an absolute
    /// http(s) URL.
    pub fn new(base_url: &str) -> Result<Self> {
        let url = Url::parse(base_url)
            .map_err(|e| Error::validation(format!("invalid base URL {base_url:?}: {e}")))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(Error::validation(format!(
                "base URL must be http(s), got {:?}",
                url.scheme()
            )));
        }
        Ok(Self {
            base_url: url,
            ..Self::default()
        })
    }

    /// Override the per-request timeout.
    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    /// Per-request timeout as a [`Duration`].
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: Url::parse(DEFAULT_BASE_URL).expect("default base URL is valid"),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            accept_language: DEFAULT_ACCEPT_LANGUAGE.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}
