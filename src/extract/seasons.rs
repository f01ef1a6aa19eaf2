//! Season/episode catalog extraction for episodic content.
//!
//! Malformed entries are tolerated, not fatal: a season item without its tab
//! id is skipped, a season whose episode list is missing is skipped, an
//! episode without its id is skipped, and a season that resolves zero
//! episodes is dropped even though its container existed. Only when nothing
//! resolves at all is the catalog absent.

use rezka_common::{Episode, Season, SeasonCatalog};
use scraper::Html;
use tracing::debug;

use super::{element_text, selector};

/// Naming pattern the page uses to tie a season tab to its episode list.
fn episode_list_id(tab_id: &str) -> String {
    format!("simple-episodes-list-{tab_id}")
}

/// Build the season/episode catalog from a series page.
///
/// Returns `None` when the page has no season container or no season
/// resolves any episodes.
pub fn extract_seasons(doc: &Html) -> Option<SeasonCatalog> {
    doc.select(&selector("div#simple-seasons")).next()?;

    let mut seasons = Vec::new();
    for item in doc.select(&selector("div#simple-seasons li.b-simple_season__item")) {
        let Some(tab_id) = item.value().attr("data-tab_id") else {
            debug!("season item without data-tab_id, skipping");
            continue;
        };
        let number = item
            .value()
            .attr("data-season_id")
            .unwrap_or(tab_id)
            .to_string();

        let episodes = extract_episodes(doc, tab_id);
        if episodes.is_empty() {
            debug!(tab_id, "season resolved no episodes, dropping");
            continue;
        }
        seasons.push(Season { number, episodes });
    }

    if seasons.is_empty() {
        return None;
    }
    Some(SeasonCatalog { seasons })
}

/// Episodes for one season, located by the interpolated list id.
///
/// The id is matched by string comparison rather than an interpolated CSS
/// selector so that unusual tab-id values cannot break selector parsing.
fn extract_episodes(doc: &Html, tab_id: &str) -> Vec<Episode> {
    let wanted = episode_list_id(tab_id);
    let Some(list) = doc
        .select(&selector("ul"))
        .find(|ul| ul.value().attr("id") == Some(wanted.as_str()))
    else {
        return Vec::new();
    };

    let mut episodes = Vec::new();
    for item in list.select(&selector("li.b-simple_episode__item")) {
        let Some(id) = item.value().attr("data-episode_id") else {
            continue;
        };
        episodes.push(Episode {
            id: id.to_string(),
            title: element_text(&item),
        });
    }
    episodes
}
