//! Page Fetcher: thin HTTP wrapper the rest of the engine talks through.
//!
//! One GET per page, one form POST per stream request, a fixed
//! browser-identifying header set, a per-request timeout, and nothing else.
//! No retries happen at this layer; retry policy belongs to the caller.

use rezka_common::{Error, Result};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, CONNECTION, USER_AGENT};
use tracing::debug;

use crate::config::SiteConfig;

/// HTTP fetcher carrying the configured client and header set.
#[derive(Debug, Clone)]
pub struct PageFetcher {
    client: reqwest::Client,
}

impl PageFetcher {
    /// Build a fetcher from the given config.
    ///
    /// Fails with [`Error::Fetch`] when the underlying client cannot be
    /// constructed (malformed header values).
    pub fn new(config: &SiteConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .default_headers(default_headers(config)?)
            .timeout(config.timeout())
            .build()
            .map_err(|e| Error::fetch(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { client })
    }

    /// GET a fully-qualified URL and return the response body.
    ///
    /// Non-2xx statuses and network failures both surface as
    /// [`Error::Fetch`].
    pub async fn get_page(&self, url: &str) -> Result<String> {
        debug!(url, "GET page");
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::fetch(format!("GET {url} returned status {status}")));
        }
        Ok(response.text().await?)
    }

    /// POST a form-encoded body and parse the JSON response.
    pub async fn post_form(
        &self,
        url: &str,
        form: &[(&str, &str)],
    ) -> Result<serde_json::Value> {
        debug!(url, "POST form");
        let response = self.client.post(url).form(form).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::fetch(format!("POST {url} returned status {status}")));
        }
        response
            .json()
            .await
            .map_err(|e| Error::fetch(format!("POST {url} returned non-JSON body: {e}")))
    }
}

/// The fixed header set the origin's own frontend sends.
fn default_headers(config: &SiteConfig) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();
    headers.insert(
        USER_AGENT,
        HeaderValue::from_str(&config.user_agent)
            .map_err(|e| Error::validation(format!("invalid user agent: {e}")))?,
    );
    headers.insert(ACCEPT, HeaderValue::from_static("*/*"));
    headers.insert(
        ACCEPT_LANGUAGE,
        HeaderValue::from_str(&config.accept_language)
            .map_err(|e| Error::validation(format!("invalid accept-language: {e}")))?,
    );
    headers.insert(CONNECTION, HeaderValue::from_static("keep-alive"));
    Ok(headers)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_headers_carry_browser_identity() {
        let config = SiteConfig::default();
        let headers = default_headers(&config).unwrap();
        assert!(headers
            .get(USER_AGENT)
            .unwrap()
            .to_str()
            .unwrap()
            .contains("Mozilla/5.0"));
        assert_eq!(headers.get(ACCEPT).unwrap(), "*/*");
        assert_eq!(headers.get(CONNECTION).unwrap(), "keep-alive");
    }

    #[test]
    fn rejects_unprintable_user_agent() {
        let config = SiteConfig {
            user_agent: "bad\nagent".into(),
            ..SiteConfig::default()
        };
        assert!(default_headers(&config).is_err());
    }
}
