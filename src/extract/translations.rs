//! Translation catalog extraction.
//!
//! Three-stage fallback, never failing and never empty: the translator list
//! if present, otherwise the single current-translator element, otherwise a
//! synthetic default entry.

use rezka_common::Translation;
use scraper::Html;
use tracing::debug;

use super::{element_text, selector};

/// Enumerate available translations in page order.
///
/// Items without a `data-translator_id` attribute are ignored. A duplicate
/// display name updates the earlier entry's id in place, keeping names
/// unique while preserving first-seen position.
pub fn extract_translations(doc: &Html) -> Vec<Translation> {
    let mut translations: Vec<Translation> = Vec::new();

    for item in doc.select(&selector("ul.b-translator__list li")) {
        let Some(id) = item.value().attr("data-translator_id") else {
            continue;
        };
        let name = element_text(&item);
        match translations.iter_mut().find(|t| t.name == name) {
            Some(existing) => existing.id = id.to_string(),
            None => translations.push(Translation {
                name,
                id: id.to_string(),
            }),
        }
    }

    // Pages with a single voiced-over track render no list, only the
    // current translator banner. The origin assigns it translator id 1.
    if translations.is_empty() {
        if let Some(current) = doc.select(&selector("div.b-translator__wrapper")).next() {
            translations.push(Translation {
                name: element_text(&current),
                id: "1".to_string(),
            });
        }
    }

    if translations.is_empty() {
        debug!("no translator markup present, substituting default");
        translations.push(Translation::default_entry());
    }

    translations
}
