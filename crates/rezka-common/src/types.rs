//! Contract type definitions for content identity, catalogs, and streams.
//!
//! These are the records the extraction engine hands back to its callers;
//! a web layer is expected to serialize them directly, so everything here
//! derives `Serialize`/`Deserialize`.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Kind of content behind a content page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    /// A single movie.
    Movie,
    /// An episodic series with seasons and episodes.
    Series,
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Movie => write!(f, "movie"),
            Self::Series => write!(f, "series"),
        }
    }
}

/// An audio or subtitle track option for a piece of content.
///
/// Collected in page order; display names are unique per page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Translation {
    /// Display name as shown on the page (e.g. a studio or language name).
    pub name: String,
    /// Origin-side translator identifier, kept as a string.
    pub id: String,
}

impl Translation {
    /// The synthetic default substituted when a page exposes no translator
    /// markup at all.
    pub fn default_entry() -> Self {
        Self {
            name: "Original".to_string(),
            id: "1".to_string(),
        }
    }
}

/// A single episode within a season.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Episode {
    /// Origin-side episode identifier.
    pub id: String,
    /// Display label for the episode.
    pub title: String,
}

/// A season and its resolved episodes.
///
/// Seasons with zero resolved episodes are never present in a catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Season {
    /// Season number or identifier as shown on the page.
    pub number: String,
    /// Episodes in page order.
    pub episodes: Vec<Episode>,
}

/// Season/episode catalog for episodic content, in page order.
///
/// Absent entirely for movies; a page where no seasons resolve yields no
/// catalog rather than an empty one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeasonCatalog {
    /// Seasons in page order, each guaranteed non-empty.
    pub seasons: Vec<Season>,
}

impl SeasonCatalog {
    /// Look up a season by its number.
    pub fn season(&self, number: &str) -> Option<&Season> {
        self.seasons.iter().find(|s| s.number == number)
    }
}

/// The identifier triple the origin page's script uses to request actual
/// video URLs.
///
/// All three values are kept as unparsed strings; the origin uses large
/// numeric identifiers and callers decide how to interpret them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CdnSession {
    /// Video identifier (first initializer argument).
    pub video_id: String,
    /// CDN identifier (second initializer argument).
    pub cdn_id: String,
    /// Default translator identifier (third initializer argument).
    pub translator_id: String,
}

/// Result of resolving a stream for one (translator, season, episode,
/// quality) request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamResolution {
    /// Every decoded quality label mapped to its direct media URL.
    pub streams: HashMap<String, String>,
    /// Decoded quality labels sorted ascending by leading integer, with
    /// non-numeric labels after all numeric ones.
    pub available_qualities: Vec<String>,
    /// The translator id the request was issued with.
    pub translator_id: String,
    /// The quality actually selected. Always a key of `streams`; when a
    /// requested quality was unavailable this reveals the substitution.
    pub chosen_quality: String,
}

impl StreamResolution {
    /// Direct media URL for the chosen quality.
    pub fn chosen_url(&self) -> &str {
        &self.streams[&self.chosen_quality]
    }
}

/// One normalized card from a listing page (popular, newest, search
/// results). Produced fresh per listing fetch, never cached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingEntry {
    /// Absolute URL of the content page.
    pub url: String,
    /// Display title.
    pub title: String,
    /// Absolute poster URL, when the card carries one.
    pub poster_url: Option<String>,
    /// Quality badge text (e.g. "HD", "1080p"), when present.
    pub quality: Option<String>,
    /// Four-digit year text, when present.
    pub year: Option<String>,
    /// Rating text, when present.
    pub rating: Option<String>,
}
