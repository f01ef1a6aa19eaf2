//! A fetched content page and its exclusive extraction caches.
//!
//! [`ContentRef`] owns the raw page body plus lazily-built caches for the
//! translation catalog, the season catalog, and the CDN session. Cache fills
//! take `&mut self`, so one value cannot be shared across concurrent
//! callers; use one `ContentRef` per concurrent flow of control.

use rezka_common::{CdnSession, ContentKind, Result, SeasonCatalog, Translation};
use scraper::Html;
use tracing::debug;

use crate::extract::{cdn, identity, seasons, translations};

/// A content page with identity resolved and extraction caches attached.
///
/// Identity (`kind`, `title`, poster) is determined once at construction and
/// immutable afterwards. Catalog accessors re-scan the page at most once.
#[derive(Debug, Clone)]
pub struct ContentRef {
    url: String,
    kind: ContentKind,
    title: String,
    poster_url: Option<String>,
    body: String,
    translations: Option<Vec<Translation>>,
    // Outer Option is the cache state; the inner is absence for movies and
    // season-less pages.
    seasons: Option<Option<SeasonCatalog>>,
    session: Option<CdnSession>,
}

impl ContentRef {
    /// Build a reference from an already-fetched page body.
    ///
    /// Never fails: a page missing the title heading yields an empty title,
    /// and kind detection defaults to movie.
    pub fn from_body(url: impl Into<String>, body: impl Into<String>) -> Self {
        let url = url.into();
        let body = body.into();
        let doc = Html::parse_document(&body);
        let kind = identity::detect_kind(&url, &doc);
        let title = identity::extract_title(&doc);
        let poster_url = identity::extract_poster(&doc);
        debug!(%url, %kind, %title, "content page identified");
        Self {
            url,
            kind,
            title,
            poster_url,
            body,
            translations: None,
            seasons: None,
            session: None,
        }
    }

    /// Source URL of the page.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Content kind, determined once at construction.
    pub fn kind(&self) -> ContentKind {
        self.kind
    }

    /// Display title; empty when the page carried none.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Sidebar poster URL, when present.
    pub fn poster_url(&self) -> Option<&str> {
        self.poster_url.as_deref()
    }

    /// Available translations in page order. Never empty; a page with no
    /// translator markup yields the synthetic default. Cached after the
    /// first call.
    pub fn translations(&mut self) -> &[Translation] {
        if self.translations.is_none() {
            let doc = Html::parse_document(&self.body);
            self.translations = Some(translations::extract_translations(&doc));
        }
        self.translations.as_deref().expect("cache just filled")
    }

    /// Season/episode catalog. `None` for movies and for series pages where
    /// no season resolves any episodes. Cached after the first build.
    pub fn seasons(&mut self) -> Option<&SeasonCatalog> {
        if self.kind != ContentKind::Series {
            return None;
        }
        if self.seasons.is_none() {
            let doc = Html::parse_document(&self.body);
            self.seasons = Some(seasons::extract_seasons(&doc));
        }
        self.seasons.as_ref().expect("cache just filled").as_ref()
    }

    /// CDN session triple from the page's inline scripts. Extracted once
    /// per page fetch; structural failures surface immediately.
    pub fn cdn_session(&mut self) -> Result<&CdnSession> {
        if self.session.is_none() {
            let doc = Html::parse_document(&self.body);
            self.session = Some(cdn::locate_session(&doc)?);
        }
        Ok(self.session.as_ref().expect("cache just filled"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MOVIE_PAGE: &str = r#"
        <h1 itemprop="name">Blade Runner</h1>
        <img class="b-sidecover__image" src="//static.site/poster.jpg">
        <script>sof.tv.initCDNMoviesEvents(345, 2, 238, false, {});</script>
    "#;

    #[test]
    fn identity_fixed_at_construction() {
        let content = ContentRef::from_body("https://hdrezka.ag/films/1-br.html", MOVIE_PAGE);
        assert_eq!(content.kind(), ContentKind::Movie);
        assert_eq!(content.title(), "Blade Runner");
        assert_eq!(content.poster_url(), Some("//static.site/poster.jpg"));
    }

    #[test]
    fn seasons_absent_for_movie_without_scanning() {
        let mut content = ContentRef::from_body("https://hdrezka.ag/films/1-br.html", MOVIE_PAGE);
        assert!(content.seasons().is_none());
        // Accessor never filled the cache for a movie.
        assert!(content.seasons.is_none());
    }

    #[test]
    fn translations_cached_after_first_call() {
        let mut content = ContentRef::from_body("https://hdrezka.ag/films/1-br.html", MOVIE_PAGE);
        let first = content.translations().to_vec();
        let second = content.translations().to_vec();
        assert_eq!(first, second);
        assert_eq!(first[0].name, "Original");
    }

    #[test]
    fn cdn_session_cached_after_first_call() {
        let mut content = ContentRef::from_body("https://hdrezka.ag/films/1-br.html", MOVIE_PAGE);
        let session = content.cdn_session().unwrap().clone();
        assert_eq!(session.video_id, "345");
        assert_eq!(content.cdn_session().unwrap(), &session);
    }
}
