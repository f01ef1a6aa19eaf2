//! CDN session locator.
//!
//! The origin page's script calls one of two initializers with the identifier
//! triple the AJAX endpoint needs. This path is structural: when the
//! initializer or its arguments are missing, extraction fails loudly rather
//! than yielding a partial session.

use std::sync::OnceLock;

use regex::Regex;
use rezka_common::{CdnSession, Error, Result};
use scraper::Html;

use super::selector;

/// Initializer the page script calls for episodic content.
const SERIES_INITIALIZER: &str = "initCDNSeriesEvents";

/// Initializer the page script calls for movies.
const MOVIE_INITIALIZER: &str = "initCDNMoviesEvents";

/// Exactly three numeric positional arguments after either initializer name.
fn initializer_args() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"initCDN\w+Events\s*\(\s*(\d+)\s*,\s*(\d+)\s*,\s*(\d+)")
            .expect("initializer pattern compiles")
    })
}

/// Locate the CDN session triple in the page's inline scripts.
///
/// Scripts are scanned in document order and the search stops at the first
/// block containing either initializer name. The triple is returned as
/// unparsed strings; the origin's identifiers can exceed common integer
/// ranges and callers decide how to interpret them.
pub fn locate_session(doc: &Html) -> Result<CdnSession> {
    let script = doc
        .select(&selector("script"))
        .map(|s| s.text().collect::<String>())
        .find(|text| text.contains(SERIES_INITIALIZER) || text.contains(MOVIE_INITIALIZER))
        .ok_or_else(|| Error::extraction("no CDN initializer found"))?;

    let captures = initializer_args()
        .captures(&script)
        .ok_or_else(|| Error::extraction("malformed initializer arguments"))?;

    Ok(CdnSession {
        video_id: captures[1].to_string(),
        cdn_id: captures[2].to_string(),
        translator_id: captures[3].to_string(),
    })
}
