//! Identity extraction: content kind, display title, poster.
//!
//! Identity never fails. A page without the expected heading simply yields
//! an empty title; a page without a poster yields none.

use rezka_common::ContentKind;
use scraper::Html;

use super::{element_text, selector};

/// Route segment the origin uses for episodic content.
const SERIES_PATH_SEGMENT: &str = "/series/";

/// Container that only exists on episodic content pages.
const SEASON_LIST_SELECTOR: &str = "div#simple-seasons";

/// Determine whether a page is a movie or a series.
///
/// Either signal is sufficient: an episodic route in the URL, or the
/// season-list container in the document. Absence of both means movie.
pub fn detect_kind(url: &str, doc: &Html) -> ContentKind {
    if url.contains(SERIES_PATH_SEGMENT) {
        return ContentKind::Series;
    }
    if doc.select(&selector(SEASON_LIST_SELECTOR)).next().is_some() {
        return ContentKind::Series;
    }
    ContentKind::Movie
}

/// Extract the display title from the page heading.
///
/// Returns an empty string when the heading is absent; a missing title is
/// cosmetic, not structural.
pub fn extract_title(doc: &Html) -> String {
    doc.select(&selector(r#"h1[itemprop="name"]"#))
        .next()
        .map(|h| element_text(&h))
        .unwrap_or_default()
}

/// Extract the sidebar poster URL, when the page carries one.
pub fn extract_poster(doc: &Html) -> Option<String> {
    doc.select(&selector("img.b-sidecover__image"))
        .next()
        .and_then(|img| img.value().attr("src"))
        .map(str::to_string)
}
