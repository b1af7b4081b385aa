//! Reading and rewriting participant names inside feed records.

use serde_json::Value;

use crate::config::{FeedAFields, FeedBFields};
use crate::record::{object_at_mut, str_at, ParticipantPair};

/// Participants of a reference-feed record.
///
/// The top-level players object wins; any side it leaves empty is taken from
/// the nested event's home/away names.
pub fn feed_a_participants(record: &Value, fields: &FeedAFields) -> ParticipantPair {
    let mut home = str_at(record, &[fields.players.as_str(), fields.home.as_str()]);
    let mut away = str_at(record, &[fields.players.as_str(), fields.away.as_str()]);

    if home.is_empty() {
        home = str_at(
            record,
            &[fields.event.as_str(), fields.home.as_str(), fields.name.as_str()],
        );
    }
    if away.is_empty() {
        away = str_at(
            record,
            &[fields.event.as_str(), fields.away.as_str(), fields.name.as_str()],
        );
    }

    ParticipantPair { home, away }
}

/// The object live-feed event fields are read from: the container when the
/// record has one, otherwise the record itself.
pub fn feed_b_container<'a>(record: &'a Value, fields: &FeedBFields) -> &'a Value {
    match record.get(&fields.container) {
        Some(container) if container.is_object() => container,
        _ => record,
    }
}

fn feed_b_container_mut<'a>(record: &'a mut Value, fields: &FeedBFields) -> &'a mut Value {
    let has_container = record
        .get(&fields.container)
        .map(Value::is_object)
        .unwrap_or(false);
    if has_container {
        &mut record[fields.container.as_str()]
    } else {
        record
    }
}

pub fn feed_b_participants(record: &Value, fields: &FeedBFields) -> ParticipantPair {
    let container = feed_b_container(record, fields);
    ParticipantPair {
        home: str_at(container, &[fields.home.as_str()]),
        away: str_at(container, &[fields.away.as_str()]),
    }
}

/// Writes `pair` into a reference-feed record wherever it already carries
/// names: the nested event's home/away objects and the players object.
pub fn update_names_in_feed_a(record: &mut Value, pair: &ParticipantPair, fields: &FeedAFields) {
    let sides = [
        (fields.home.as_str(), &pair.home),
        (fields.away.as_str(), &pair.away),
    ];
    for (side, name) in sides {
        if let Some(participant) = object_at_mut(record, &[fields.event.as_str(), side]) {
            participant.insert(fields.name.clone(), Value::String(name.clone()));
        }
    }

    if let Some(players) = object_at_mut(record, &[fields.players.as_str()]) {
        players.insert(fields.home.clone(), Value::String(pair.home.clone()));
        players.insert(fields.away.clone(), Value::String(pair.away.clone()));
    }
}

/// Writes `pair` into a live-feed record's home/away fields and rebuilds its
/// combined label. Non-object records are left alone.
pub fn update_names_in_feed_b(record: &mut Value, pair: &ParticipantPair, fields: &FeedBFields) {
    if let Some(container) = feed_b_container_mut(record, fields).as_object_mut() {
        container.insert(fields.home.clone(), Value::String(pair.home.clone()));
        container.insert(fields.away.clone(), Value::String(pair.away.clone()));
        container.insert(fields.label.clone(), Value::String(pair.label()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_feed_a_participants_prefers_players() {
        let fields = FeedAFields::default();
        let record = json!({
            "players": {"home": "Novak Djokovic"},
            "inplay_event": {
                "home": {"name": "Djokovic N."},
                "away": {"name": "Alcaraz C."}
            }
        });
        let pair = feed_a_participants(&record, &fields);
        assert_eq!(pair, ParticipantPair::new("Novak Djokovic", "Alcaraz C."));

        let empty = feed_a_participants(&json!({}), &fields);
        assert!(!empty.is_complete());
    }

    #[test]
    fn test_feed_b_participants_with_and_without_container() {
        let fields = FeedBFields::default();
        let wrapped = json!({"raw_event_data": {"team1": "N. Djokovic", "team2": "C. Alcaraz"}});
        let flat = json!({"team1": "N. Djokovic", "team2": "C. Alcaraz"});
        let expected = ParticipantPair::new("N. Djokovic", "C. Alcaraz");
        assert_eq!(feed_b_participants(&wrapped, &fields), expected);
        assert_eq!(feed_b_participants(&flat, &fields), expected);
    }

    #[test]
    fn test_update_names_in_feed_a() {
        let fields = FeedAFields::default();
        let mut record = json!({
            "players": {"home": "x", "away": "y"},
            "inplay_event": {"home": {"name": "x", "id": "7"}, "away": {"name": "y"}}
        });
        let pair = ParticipantPair::new("Novak Djokovic", "Carlos Alcaraz");
        update_names_in_feed_a(&mut record, &pair, &fields);

        assert_eq!(record["players"]["home"], "Novak Djokovic");
        assert_eq!(record["players"]["away"], "Carlos Alcaraz");
        assert_eq!(record["inplay_event"]["home"]["name"], "Novak Djokovic");
        assert_eq!(record["inplay_event"]["home"]["id"], "7");
        assert_eq!(record["inplay_event"]["away"]["name"], "Carlos Alcaraz");
    }

    #[test]
    fn test_update_names_in_feed_a_does_not_invent_structure() {
        let fields = FeedAFields::default();
        let mut record = json!({"bet365_id": "1"});
        update_names_in_feed_a(&mut record, &ParticipantPair::new("a", "b"), &fields);
        assert_eq!(record, json!({"bet365_id": "1"}));
    }

    #[test]
    fn test_update_names_in_feed_b() {
        let fields = FeedBFields::default();
        let pair = ParticipantPair::new("Novak Djokovic", "Carlos Alcaraz");

        let mut wrapped = json!({
            "raw_event_data": {"team1": "N. Djokovic", "team2": "C. Alcaraz"},
            "raw_odds_data": {"markets": []}
        });
        update_names_in_feed_b(&mut wrapped, &pair, &fields);
        assert_eq!(wrapped["raw_event_data"]["team1"], "Novak Djokovic");
        assert_eq!(wrapped["raw_event_data"]["team2"], "Carlos Alcaraz");
        assert_eq!(
            wrapped["raw_event_data"]["eventName"],
            "Novak Djokovic - Carlos Alcaraz"
        );
        assert!(wrapped.get("team1").is_none());

        let mut flat = json!({"team1": "N. Djokovic"});
        update_names_in_feed_b(&mut flat, &pair, &fields);
        assert_eq!(flat["team2"], "Carlos Alcaraz");

        let mut scalar = json!("not an object");
        update_names_in_feed_b(&mut scalar, &pair, &fields);
        assert_eq!(scalar, json!("not an object"));
    }
}
