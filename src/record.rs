//! Record types shared by the merger and the reporting code.
//!
//! Feed payloads arrive as loosely-structured JSON. Nothing here validates a
//! schema: every accessor returns an empty default when a key is missing or
//! holds an unexpected type.

use serde::Serialize;
use serde_json::{Map, Value};
use std::fmt;

/// A feed record exactly as the fetcher produced it.
pub type RawRecord = Value;

/// Reads a scalar at `path` as a string.
///
/// Strings are returned as-is, numbers are rendered in decimal, everything
/// else (missing keys, objects, arrays, null, booleans) yields an empty string.
pub fn str_at(record: &Value, path: &[&str]) -> String {
    match value_at(record, path) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}

/// Follows `path` through nested objects.
pub fn value_at<'a>(record: &'a Value, path: &[&str]) -> Option<&'a Value> {
    path.iter()
        .try_fold(record, |current, key| current.as_object()?.get(*key))
}

/// Returns the object at `path`, if there is one.
pub fn object_at<'a>(record: &'a Value, path: &[&str]) -> Option<&'a Map<String, Value>> {
    value_at(record, path).and_then(Value::as_object)
}

/// Mutable variant of [`object_at`].
pub fn object_at_mut<'a>(
    record: &'a mut Value,
    path: &[&str],
) -> Option<&'a mut Map<String, Value>> {
    path.iter()
        .try_fold(record, |current, key| current.as_object_mut()?.get_mut(*key))
        .and_then(Value::as_object_mut)
}

/// How a merged record came to hold both feeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchPath {
    /// Feed-A key found inside the live feed's composite event id.
    EventId,
    /// Live feed's market id equals a feed-A key.
    MarketId,
    /// No usable identifier; participant names matched.
    FuzzyNames,
}

impl fmt::Display for MatchPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchPath::EventId => write!(f, "event_id"),
            MatchPath::MarketId => write!(f, "market_id"),
            MatchPath::FuzzyNames => write!(f, "fuzzy_names"),
        }
    }
}

/// One fixture after a merge pass.
///
/// At least one of the two slots is always populated; the constructors are the
/// only way to build one.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MergedRecord {
    #[serde(rename = "match_id")]
    id: Option<String>,
    #[serde(rename = "prematch_data")]
    feed_a: Option<RawRecord>,
    #[serde(rename = "live_data")]
    feed_b: Option<RawRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    matched_by: Option<MatchPath>,
}

impl MergedRecord {
    pub fn from_feed_a(id: String, record: RawRecord) -> Self {
        MergedRecord {
            id: Some(id),
            feed_a: Some(record),
            feed_b: None,
            matched_by: None,
        }
    }

    pub fn from_feed_b(id: Option<String>, record: RawRecord) -> Self {
        MergedRecord {
            id,
            feed_a: None,
            feed_b: Some(record),
            matched_by: None,
        }
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn feed_a(&self) -> Option<&RawRecord> {
        self.feed_a.as_ref()
    }

    pub fn feed_b(&self) -> Option<&RawRecord> {
        self.feed_b.as_ref()
    }

    pub fn matched_by(&self) -> Option<MatchPath> {
        self.matched_by
    }

    pub fn has_both(&self) -> bool {
        self.feed_a.is_some() && self.feed_b.is_some()
    }

    pub(crate) fn feed_a_mut(&mut self) -> Option<&mut RawRecord> {
        self.feed_a.as_mut()
    }

    /// Replaces the feed-A slot; used when two feed-A records share a key.
    pub(crate) fn replace_feed_a(&mut self, record: RawRecord) -> Option<RawRecord> {
        self.feed_a.replace(record)
    }

    pub(crate) fn attach_feed_b(&mut self, record: RawRecord, path: MatchPath) {
        self.feed_b = Some(record);
        self.matched_by = Some(path);
    }
}

/// Home and away names for one fixture, as one feed spells them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParticipantPair {
    pub home: String,
    pub away: String,
}

impl ParticipantPair {
    pub fn new(home: impl Into<String>, away: impl Into<String>) -> Self {
        ParticipantPair {
            home: home.into(),
            away: away.into(),
        }
    }

    pub fn is_complete(&self) -> bool {
        !self.home.is_empty() && !self.away.is_empty()
    }

    /// The same fixture with home and away exchanged.
    pub fn swapped(self) -> Self {
        ParticipantPair {
            home: self.away,
            away: self.home,
        }
    }

    /// Combined label used by the live feed, e.g. "N. Djokovic - C. Alcaraz".
    pub fn label(&self) -> String {
        format!("{} - {}", self.home, self.away)
    }
}

impl fmt::Display for ParticipantPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} vs {}", self.home, self.away)
    }
}
