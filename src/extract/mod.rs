//! Pure HTML/script extraction over a fetched content page.
//!
//! Every function here takes a parsed [`scraper::Html`] document and returns
//! plain data; nothing in this module touches the network. Tolerance rules
//! differ per extractor and are documented on each:
//!
//! - [`identity`] -- content kind and display title (never fails)
//! - [`translations`] -- translator catalog (never fails, never empty)
//! - [`seasons`] -- season/episode catalog (malformed entries skipped)
//! - [`cdn`] -- CDN session locator (structural, fails loudly)

pub mod cdn;
pub mod identity;
pub mod seasons;
pub mod translations;

use scraper::Selector;

/// Parse a selector that is a compile-time constant of this crate.
pub(crate) fn selector(css: &str) -> Selector {
    Selector::parse(css).expect("static selector")
}

/// Collect an element's text content, whitespace-trimmed.
pub(crate) fn element_text(element: &scraper::ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}
