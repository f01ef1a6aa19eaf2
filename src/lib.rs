//! Rezka-Client: stream extraction and catalog scraping for HDrezka-style
//! origins.
//!
//! The engine fetches a content page, locates the CDN session identifiers
//! the page's own script embeds, replays the site's internal AJAX protocol
//! to obtain a packed multi-quality stream descriptor, and decodes it into
//! quality-to-URL mappings with an explicit selection policy. Listing pages
//! (popular, newest, search results) parse into normalized summary records.
//!
//! Extraction is correct for one observed markup version of the origin;
//! when the markup or script format changes, structural paths fail with
//! explicit errors rather than guessing.
//!
//! # Examples
//!
//! ```no_run
//! use rezka_client::{ContentKind, RezkaClient, SiteConfig, StreamRequest};
//!
//! # async fn example() -> rezka_common::Result<()> {
//! let client = RezkaClient::new(SiteConfig::default())?;
//!
//! let mut content = client.open("/series/drama/1-show.html").await?;
//! if content.kind() == ContentKind::Series {
//!     let request = StreamRequest {
//!         season: Some("1".into()),
//!         episode: Some("3".into()),
//!         quality: Some("720p".into()),
//!         ..StreamRequest::default()
//!     };
//!     let resolution = client.resolve_stream(&mut content, &request).await?;
//!     println!("{}", resolution.chosen_url());
//! }
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod content;
pub mod extract;
pub mod fetch;
pub mod listing;
pub mod stream;

pub use client::RezkaClient;
pub use config::SiteConfig;
pub use content::ContentRef;
pub use listing::{Listing, LISTING_LIMIT};
pub use stream::{StreamRequest, STREAM_ENDPOINT};

// Contract types live in rezka-common; re-exported so callers need one crate.
pub use rezka_common::{
    CdnSession, ContentKind, Episode, Error, ListingEntry, Result, Season, SeasonCatalog,
    StreamResolution, Translation,
};
