//! Catalog Scraper: listing pages (popular, now-watching, newest, search)
//! parsed into normalized summary records.
//!
//! Card extraction is tolerant field-by-field: only a card missing its
//! primary link is dropped; any other missing sub-element degrades that one
//! field to `None`.

use std::sync::OnceLock;

use regex::Regex;
use rezka_common::ListingEntry;
use scraper::{ElementRef, Html};
use tracing::debug;
use url::Url;

use crate::extract::{element_text, selector as sel};

/// Listing pages never yield more than this many entries.
pub const LISTING_LIMIT: usize = 20;

/// A listing page on the origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Listing {
    /// Most-watched films overall.
    Popular,
    /// Films being watched right now.
    NowWatching,
    /// Newest films for a given release year.
    Newest { year: u16 },
}

impl Listing {
    /// Path of this listing relative to the base origin.
    pub fn path(&self) -> String {
        match self {
            Self::Popular => "/films/".to_string(),
            Self::NowWatching => "/film/".to_string(),
            Self::Newest { year } => format!("/film/{year}/"),
        }
    }
}

/// Build the absolute URL for a listing page.
pub fn listing_url(base: &Url, listing: Listing) -> Url {
    base.join(&listing.path())
        .expect("listing paths join onto any http(s) origin")
}

/// Build the absolute URL for a search query.
pub fn search_url(base: &Url, query: &str) -> Url {
    let mut url = base
        .join("/search/")
        .expect("search path joins onto any http(s) origin");
    url.query_pairs_mut()
        .append_pair("do", "search")
        .append_pair("subaction", "search")
        .append_pair("q", query);
    url
}

fn year_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\d{4}").expect("year pattern compiles"))
}

/// Parse a listing page body into at most [`LISTING_LIMIT`] entries, in
/// document order.
pub fn parse_listing(body: &str, base: &Url) -> Vec<ListingEntry> {
    let doc = Html::parse_document(body);
    let mut entries = Vec::new();

    for card in doc
        .select(&sel("div.b-content__inline_item"))
        .take(LISTING_LIMIT)
    {
        if let Some(entry) = parse_card(&card, base) {
            entries.push(entry);
        } else {
            debug!("listing card without a primary link, skipping");
        }
    }
    entries
}

/// One card. `None` only when the primary link is missing; every other
/// absent sub-element degrades its field.
fn parse_card(card: &ElementRef<'_>, base: &Url) -> Option<ListingEntry> {
    let link = card.select(&sel("a")).next()?;
    let href = link.value().attr("href")?;
    let url = absolutize(href, base)?;

    let title = link.value().attr("title").unwrap_or("").trim().to_string();

    let poster_url = card
        .select(&sel("img"))
        .next()
        .and_then(|img| img.value().attr("src"))
        .and_then(|src| absolutize_poster(src, base));

    let quality = card
        .select(&sel("div.quality"))
        .next()
        .map(|q| element_text(&q));

    let year = card
        .select(&sel("div.b-content__inline_item-link div"))
        .next()
        .and_then(|div| {
            let text = div.text().collect::<String>();
            year_pattern().find(&text).map(|m| m.as_str().to_string())
        });

    let rating = card
        .select(&sel("span.rating"))
        .next()
        .map(|r| element_text(&r));

    Some(ListingEntry {
        url,
        title,
        poster_url,
        quality,
        year,
        rating,
    })
}

/// Rewrite a possibly-relative content link to an absolute URL on the
/// listing's origin.
fn absolutize(href: &str, base: &Url) -> Option<String> {
    if href.starts_with("http://") || href.starts_with("https://") {
        return Some(href.to_string());
    }
    base.join(href).ok().map(Url::into)
}

/// Poster URLs additionally appear protocol-relative (`//host/path`); those
/// get `https:` prefixed rather than the listing origin's scheme.
fn absolutize_poster(src: &str, base: &Url) -> Option<String> {
    if src.starts_with("//") {
        return Some(format!("https:{src}"));
    }
    absolutize(src, base)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("https://hdrezka.ag").unwrap()
    }

    fn card(i: usize) -> String {
        format!(
            r#"<div class="b-content__inline_item">
                 <a href="/films/action/{i}-movie.html" title="Movie {i}"></a>
                 <img src="//static.site/p{i}.jpg">
                 <div class="quality">HD</div>
                 <div class="b-content__inline_item-link"><div>2021, Action</div></div>
                 <span class="rating">7.{i}</span>
               </div>"#
        )
    }

    #[test]
    fn urls_for_each_listing() {
        assert_eq!(
            listing_url(&base(), Listing::Popular).as_str(),
            "https://hdrezka.ag/films/"
        );
        assert_eq!(
            listing_url(&base(), Listing::NowWatching).as_str(),
            "https://hdrezka.ag/film/"
        );
        assert_eq!(
            listing_url(&base(), Listing::Newest { year: 2024 }).as_str(),
            "https://hdrezka.ag/film/2024/"
        );
    }

    #[test]
    fn search_url_encodes_query() {
        let url = search_url(&base(), "blade runner");
        assert_eq!(
            url.as_str(),
            "https://hdrezka.ag/search/?do=search&subaction=search&q=blade+runner"
        );
    }

    #[test]
    fn parses_full_card() {
        let entries = parse_listing(&card(1), &base());
        assert_eq!(entries.len(), 1);
        let entry = &entries[0];
        assert_eq!(entry.url, "https://hdrezka.ag/films/action/1-movie.html");
        assert_eq!(entry.title, "Movie 1");
        assert_eq!(entry.poster_url.as_deref(), Some("https://static.site/p1.jpg"));
        assert_eq!(entry.quality.as_deref(), Some("HD"));
        assert_eq!(entry.year.as_deref(), Some("2021"));
        assert_eq!(entry.rating.as_deref(), Some("7.1"));
    }

    #[test]
    fn caps_at_twenty_entries() {
        let body: String = (0..25).map(card).collect();
        let entries = parse_listing(&body, &base());
        assert_eq!(entries.len(), LISTING_LIMIT);
        assert_eq!(entries[0].title, "Movie 0");
        assert_eq!(entries[19].title, "Movie 19");
    }

    #[test]
    fn card_without_link_is_skipped() {
        let body = format!(
            r#"<div class="b-content__inline_item"><img src="/p.jpg"></div>{}"#,
            card(1)
        );
        let entries = parse_listing(&body, &base());
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].title, "Movie 1");
    }

    #[test]
    fn missing_rating_degrades_only_that_field() {
        let body = r#"<div class="b-content__inline_item">
            <a href="/films/1-x.html" title="X"></a>
            <img src="/posters/x.jpg">
            <div class="quality">4K</div>
            <div class="b-content__inline_item-link"><div>1999</div></div>
          </div>"#;
        let entries = parse_listing(body, &base());
        assert_eq!(entries.len(), 1);
        let entry = &entries[0];
        assert!(entry.rating.is_none());
        assert_eq!(entry.quality.as_deref(), Some("4K"));
        assert_eq!(entry.year.as_deref(), Some("1999"));
        assert_eq!(
            entry.poster_url.as_deref(),
            Some("https://hdrezka.ag/posters/x.jpg")
        );
    }

    #[test]
    fn absolute_links_pass_through() {
        assert_eq!(
            absolutize("https://other.site/x.html", &base()).unwrap(),
            "https://other.site/x.html"
        );
        assert_eq!(
            absolutize("/films/y.html", &base()).unwrap(),
            "https://hdrezka.ag/films/y.html"
        );
    }
}
