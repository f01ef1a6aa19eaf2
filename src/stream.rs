//! Stream resolution: the AJAX protocol, packed-descriptor decoding, quality
//! ordering, and the selection policy.
//!
//! One POST per resolution call, no caching across calls. Re-issuing the
//! request for every quality value is deliberate: downstream rate limiting
//! is tuned to the request volume this produces, so callers wanting all
//! qualities fan out one call per quality (see
//! [`RezkaClient::resolve_each_quality`](crate::RezkaClient::resolve_each_quality)).

use std::collections::HashMap;

use rezka_common::{CdnSession, ContentKind, Error, Result, StreamResolution};
use tracing::{debug, warn};
use url::Url;

use crate::fetch::PageFetcher;

/// Path of the origin's stream-retrieval endpoint, relative to the base
/// origin. The same endpoint serves movies and series; the `action` form
/// field switches behavior.
pub const STREAM_ENDPOINT: &str = "/ajax/get_cdn_series/";

/// Parameters for one stream resolution.
#[derive(Debug, Clone, Default)]
pub struct StreamRequest {
    /// Translator to request; defaults to the one the page script embeds.
    pub translator_id: Option<String>,
    /// Quality label to prefer. An unavailable label silently falls back to
    /// the best available one (observable via `chosen_quality`).
    pub quality: Option<String>,
    /// Season identifier; required for series.
    pub season: Option<String>,
    /// Episode identifier; required for series.
    pub episode: Option<String>,
}

/// Issue one stream-retrieval request and decode the response.
pub(crate) async fn resolve(
    fetcher: &PageFetcher,
    base_url: &Url,
    kind: ContentKind,
    session: &CdnSession,
    request: &StreamRequest,
) -> Result<StreamResolution> {
    let translator_id = request
        .translator_id
        .clone()
        .unwrap_or_else(|| session.translator_id.clone());

    let action = match kind {
        ContentKind::Series => "get_episodes",
        ContentKind::Movie => "get_movie",
    };

    let season_episode = match kind {
        ContentKind::Series => {
            let season = request
                .season
                .clone()
                .ok_or_else(|| Error::validation("season is required for series"))?;
            let episode = request
                .episode
                .clone()
                .ok_or_else(|| Error::validation("episode is required for series"))?;
            Some((season, episode))
        }
        ContentKind::Movie => None,
    };

    let mut form: Vec<(&str, &str)> = vec![
        ("id", session.video_id.as_str()),
        ("translator_id", translator_id.as_str()),
        ("action", action),
    ];
    if let Some((season, episode)) = &season_episode {
        form.push(("season", season.as_str()));
        form.push(("episode", episode.as_str()));
    }

    let endpoint = base_url
        .join(STREAM_ENDPOINT)
        .map_err(|e| Error::validation(format!("invalid stream endpoint: {e}")))?;
    let response = fetcher.post_form(endpoint.as_str(), &form).await?;

    if !response
        .get("success")
        .and_then(serde_json::Value::as_bool)
        .unwrap_or(false)
    {
        let message = response
            .get("message")
            .and_then(serde_json::Value::as_str)
            .unwrap_or("origin reported failure")
            .to_string();
        warn!(%message, "stream request rejected by origin");
        return Err(Error::Stream(message));
    }

    let packed = response
        .get("url")
        .and_then(serde_json::Value::as_str)
        .unwrap_or("");
    let decoded = decode_packed(packed);
    if decoded.is_empty() {
        return Err(Error::stream("no usable streams"));
    }

    let available_qualities = order_qualities(decoded.iter().map(|(q, _)| q.clone()).collect());
    let streams: HashMap<String, String> = decoded.into_iter().collect();
    let chosen_quality = select_quality(&available_qualities, request.quality.as_deref(), &streams);
    debug!(chosen = %chosen_quality, available = available_qualities.len(), "stream resolved");

    Ok(StreamResolution {
        streams,
        available_qualities,
        translator_id,
        chosen_quality,
    })
}

/// Decode the packed stream field into (quality, url) pairs in descriptor
/// order.
///
/// The field is a comma-separated sequence of bracket-tagged fragments,
/// `[<quality>]<url>`. A fragment is kept only when its first `[` precedes
/// its first `]`; anything else is discarded.
fn decode_packed(field: &str) -> Vec<(String, String)> {
    let mut entries = Vec::new();
    for fragment in field.split(',') {
        let Some(open) = fragment.find('[') else {
            continue;
        };
        let Some(close) = fragment.find(']') else {
            continue;
        };
        if close < open {
            continue;
        }
        let quality = fragment[open + 1..close].to_string();
        let url = fragment[close + 1..].trim().to_string();
        entries.push((quality, url));
    }
    entries
}

/// Leading integer of a quality label ("1080p Ultra" -> 1080), if any.
fn leading_int(label: &str) -> Option<u64> {
    let digits: String = label.chars().take_while(|c| c.is_ascii_digit()).collect();
    digits.parse().ok()
}

/// Sort quality labels ascending by leading integer.
///
/// Ties between a bare `<n>p` label and a qualified variant ("1080p" vs
/// "1080p Ultra") rank the qualified one higher. Labels without a leading
/// integer are unorderable; they go after every numeric label, keeping
/// their decoded order. The result is deterministic regardless of input
/// ordering.
fn order_qualities(mut labels: Vec<String>) -> Vec<String> {
    labels.sort_by_key(|label| match leading_int(label) {
        Some(n) => {
            let rest = label.trim_start_matches(|c: char| c.is_ascii_digit());
            let qualified = !(rest.is_empty() || rest == "p");
            (0u8, n, u8::from(qualified))
        }
        None => (1, 0, 0),
    });
    labels
}

/// The selection policy: a requested and present quality wins verbatim;
/// otherwise the highest-ranked available quality is substituted. Never
/// fails on an unavailable request.
fn select_quality(
    ordered: &[String],
    requested: Option<&str>,
    streams: &HashMap<String, String>,
) -> String {
    if let Some(wanted) = requested {
        if streams.contains_key(wanted) {
            return wanted.to_string();
        }
        debug!(wanted, "requested quality unavailable, substituting best");
    }
    ordered
        .last()
        .expect("selection runs only on non-empty stream sets")
        .clone()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_packed_field() {
        let decoded = decode_packed("[720p]http://a,[480p]http://b");
        assert_eq!(
            decoded,
            vec![
                ("720p".to_string(), "http://a".to_string()),
                ("480p".to_string(), "http://b".to_string()),
            ]
        );
    }

    #[test]
    fn discards_fragment_without_closing_bracket() {
        let decoded = decode_packed("[720phttp://a,[480p]http://b");
        assert_eq!(decoded, vec![("480p".to_string(), "http://b".to_string())]);
    }

    #[test]
    fn discards_fragment_with_reversed_brackets() {
        let decoded = decode_packed("]720p[http://a,[480p]http://b");
        assert_eq!(decoded, vec![("480p".to_string(), "http://b".to_string())]);
    }

    #[test]
    fn trims_url_whitespace() {
        let decoded = decode_packed("[1080p] http://a ");
        assert_eq!(decoded[0].1, "http://a");
    }

    #[test]
    fn empty_field_decodes_to_nothing() {
        assert!(decode_packed("").is_empty());
        assert!(decode_packed("no brackets here").is_empty());
    }

    #[test]
    fn leading_int_parsing() {
        assert_eq!(leading_int("480p"), Some(480));
        assert_eq!(leading_int("1080p Ultra"), Some(1080));
        assert_eq!(leading_int("2K"), Some(2));
        assert_eq!(leading_int("Ultra"), None);
        assert_eq!(leading_int(""), None);
    }

    #[test]
    fn orders_ascending_by_leading_integer() {
        let ordered = order_qualities(vec![
            "1080p".into(),
            "360p".into(),
            "720p".into(),
            "480p".into(),
        ]);
        assert_eq!(ordered, vec!["360p", "480p", "720p", "1080p"]);
    }

    #[test]
    fn qualified_label_ranks_above_its_base() {
        let ordered = order_qualities(vec!["1080p Ultra".into(), "1080p".into(), "720p".into()]);
        assert_eq!(ordered, vec!["720p", "1080p", "1080p Ultra"]);
    }

    #[test]
    fn non_numeric_labels_go_last_in_decoded_order() {
        let ordered = order_qualities(vec![
            "Ultra".into(),
            "720p".into(),
            "Auto".into(),
            "480p".into(),
        ]);
        assert_eq!(ordered, vec!["480p", "720p", "Ultra", "Auto"]);
    }

    #[test]
    fn ordering_is_deterministic_across_input_orders() {
        let a = order_qualities(vec!["720p".into(), "480p".into(), "1080p".into()]);
        let b = order_qualities(vec!["1080p".into(), "720p".into(), "480p".into()]);
        assert_eq!(a, b);
    }

    fn stream_map(labels: &[&str]) -> HashMap<String, String> {
        labels
            .iter()
            .map(|l| (l.to_string(), format!("http://{l}")))
            .collect()
    }

    #[test]
    fn requested_and_present_wins_verbatim() {
        let ordered = vec!["480p".to_string(), "720p".to_string()];
        let streams = stream_map(&["480p", "720p"]);
        assert_eq!(select_quality(&ordered, Some("480p"), &streams), "480p");
    }

    #[test]
    fn unavailable_request_falls_back_to_best() {
        let ordered = vec!["480p".to_string(), "720p".to_string()];
        let streams = stream_map(&["480p", "720p"]);
        assert_eq!(select_quality(&ordered, Some("4K"), &streams), "720p");
    }

    #[test]
    fn no_request_picks_best() {
        let ordered = vec!["360p".to_string(), "1080p".to_string()];
        let streams = stream_map(&["360p", "1080p"]);
        assert_eq!(select_quality(&ordered, None, &streams), "1080p");
    }
}
