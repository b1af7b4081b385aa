use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::HashMap;
use tracing::{debug, info};

use super::FixtureMerger;
use crate::record::{str_at, RawRecord};
use crate::TARGET_MERGE;

/// Key the odds are attached under in the serialized event.
const ODDS_KEY: &str = "odds";

/// An event paired with its odds. `odds` is an empty object when none were found.
///
/// Serializes as the event's own fields plus `odds`; the id is already among
/// the event's fields.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventOdds {
    #[serde(skip)]
    pub id: String,
    #[serde(flatten)]
    pub event: RawRecord,
    pub odds: RawRecord,
}

impl FixtureMerger {
    /// Pairs each event with odds by its explicit match id. No fuzzy fallback.
    ///
    /// Odds embedded in the event itself take precedence over `odds_by_id`.
    /// Events without a match id cannot be paired and are skipped.
    pub fn merge_events_with_odds(
        &self,
        events: Vec<RawRecord>,
        odds_by_id: &HashMap<String, RawRecord>,
    ) -> Vec<EventOdds> {
        let match_id_field = self.config().match_id_field.as_str();
        let embedded_field = self.config().feed_b.odds.as_str();

        let paired: Vec<EventOdds> = events
            .into_iter()
            .filter_map(|mut event| {
                let id = str_at(&event, &[match_id_field]);
                if id.is_empty() {
                    debug!(target: TARGET_MERGE, "Skipping event without {}", match_id_field);
                    return None;
                }

                let odds = event
                    .get(embedded_field)
                    .cloned()
                    .or_else(|| odds_by_id.get(&id).cloned())
                    .unwrap_or_else(|| Value::Object(Map::new()));

                // Attached odds replace any `odds` field the event carried.
                if let Some(fields) = event.as_object_mut() {
                    fields.remove(ODDS_KEY);
                }

                Some(EventOdds { id, event, odds })
            })
            .collect();

        info!(
            target: TARGET_MERGE,
            "Merged {} matches with their odds",
            paired.len()
        );
        paired
    }
}
