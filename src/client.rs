//! The client facade tying fetching, extraction, and resolution together.

use futures::future::try_join_all;
use rezka_common::{Error, ListingEntry, Result, StreamResolution};
use tracing::debug;

use crate::config::SiteConfig;
use crate::content::ContentRef;
use crate::fetch::PageFetcher;
use crate::listing::{self, Listing};
use crate::stream::{self, StreamRequest};

/// Client for one origin (or mirror).
///
/// Holds no mutable state of its own; all caching lives on the
/// [`ContentRef`] values it hands out, so a client can serve many
/// independent flows while each `ContentRef` stays single-flow.
///
/// # Examples
///
/// ```no_run
/// use rezka_client::{RezkaClient, SiteConfig, StreamRequest};
///
/// # async fn example() -> rezka_common::Result<()> {
/// let client = RezkaClient::new(SiteConfig::default())?;
/// let mut content = client.open("https://hdrezka.ag/films/action/1-x.html").await?;
/// let resolution = client
///     .resolve_stream(&mut content, &StreamRequest::default())
///     .await?;
/// println!("{} -> {}", resolution.chosen_quality, resolution.chosen_url());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct RezkaClient {
    config: SiteConfig,
    fetcher: PageFetcher,
}

impl RezkaClient {
    /// Build a client from an explicit configuration value.
    pub fn new(config: SiteConfig) -> Result<Self> {
        let fetcher = PageFetcher::new(&config)?;
        Ok(Self { config, fetcher })
    }

    /// The configuration this client was built with.
    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    /// Fetch a content page and resolve its identity.
    ///
    /// Relative URLs are joined onto the configured base origin.
    pub async fn open(&self, url: &str) -> Result<ContentRef> {
        let url = self.absolute(url)?;
        let body = self.fetcher.get_page(&url).await?;
        Ok(ContentRef::from_body(url, body))
    }

    /// Resolve one stream for the given content.
    ///
    /// Missing season/episode for series content fails with
    /// [`Error::Validation`]; an unavailable requested quality falls back to
    /// the best available one (see `chosen_quality` on the result).
    pub async fn resolve_stream(
        &self,
        content: &mut ContentRef,
        request: &StreamRequest,
    ) -> Result<StreamResolution> {
        let kind = content.kind();
        let session = content.cdn_session()?.clone();
        stream::resolve(&self.fetcher, &self.config.base_url, kind, &session, request).await
    }

    /// Resolve the same request once per quality label, in parallel.
    ///
    /// Each quality re-issues the full request and re-decodes the response;
    /// the origin's endpoint is stateless per call and downstream rate
    /// limiting depends on this request volume. Results come back in the
    /// order of `qualities` regardless of completion order.
    pub async fn resolve_many(
        &self,
        content: &mut ContentRef,
        request: &StreamRequest,
        qualities: &[String],
    ) -> Result<Vec<StreamResolution>> {
        let kind = content.kind();
        let session = content.cdn_session()?.clone();
        debug!(count = qualities.len(), "fanning out per-quality resolution");

        let calls = qualities.iter().map(|quality| {
            let per_quality = StreamRequest {
                quality: Some(quality.clone()),
                ..request.clone()
            };
            let session = session.clone();
            async move {
                stream::resolve(
                    &self.fetcher,
                    &self.config.base_url,
                    kind,
                    &session,
                    &per_quality,
                )
                .await
            }
        });
        try_join_all(calls).await
    }

    /// Discover the available qualities with a probe request, then resolve
    /// every one of them individually.
    ///
    /// This is the "all available streams" operation: one probe plus one
    /// call per discovered quality, never a single cached fan-in.
    pub async fn resolve_each_quality(
        &self,
        content: &mut ContentRef,
        request: &StreamRequest,
    ) -> Result<Vec<StreamResolution>> {
        let probe = StreamRequest {
            quality: None,
            ..request.clone()
        };
        let discovered = self
            .resolve_stream(content, &probe)
            .await?
            .available_qualities;
        self.resolve_many(content, request, &discovered).await
    }

    /// Fetch and parse a listing page.
    pub async fn listing(&self, listing: Listing) -> Result<Vec<ListingEntry>> {
        let url = listing::listing_url(&self.config.base_url, listing);
        let body = self.fetcher.get_page(url.as_str()).await?;
        Ok(listing::parse_listing(&body, &self.config.base_url))
    }

    /// Fetch and parse an arbitrary listing page by URL (e.g. a genre or
    /// collection page not covered by [`Listing`]).
    pub async fn listing_by_url(&self, url: &str) -> Result<Vec<ListingEntry>> {
        let url = self.absolute(url)?;
        let body = self.fetcher.get_page(&url).await?;
        Ok(listing::parse_listing(&body, &self.config.base_url))
    }

    /// Run a search query and parse the results page.
    pub async fn search(&self, query: &str) -> Result<Vec<ListingEntry>> {
        let url = listing::search_url(&self.config.base_url, query);
        let body = self.fetcher.get_page(url.as_str()).await?;
        Ok(listing::parse_listing(&body, &self.config.base_url))
    }

    fn absolute(&self, url: &str) -> Result<String> {
        if url.starts_with("http://") || url.starts_with("https://") {
            return Ok(url.to_string());
        }
        self.config
            .base_url
            .join(url)
            .map(String::from)
            .map_err(|e| Error::validation(format!("invalid content URL {url:?}: {e}")))
    }
}
