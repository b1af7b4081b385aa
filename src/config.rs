//! Merge configuration: matching threshold, id digit length, and the field
//! names each feed uses.
//!
//! Defaults describe the reference (pre-match) and live (in-play) tennis
//! payloads as the fetchers deliver them. Everything can be overridden from the
//! environment or from a JSON file.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::environment::{get_env_var_as_vec, get_env_var_opt, get_env_var_or};
use crate::identifier::DEFAULT_MIN_ID_DIGITS;
use crate::players::DEFAULT_THRESHOLD;

pub const ENV_FUZZY_THRESHOLD: &str = "MATCHPOINT_FUZZY_THRESHOLD";
pub const ENV_MIN_ID_DIGITS: &str = "MATCHPOINT_MIN_ID_DIGITS";
pub const ENV_UTC_OFFSET_HOURS: &str = "MATCHPOINT_UTC_OFFSET_HOURS";
pub const ENV_HINT_FIELDS: &str = "MATCHPOINT_HINT_FIELDS";
pub const ENV_MATCH_ID_FIELD: &str = "MATCHPOINT_MATCH_ID_FIELD";

/// Field names in reference-feed records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedAFields {
    /// Explicit reference id, first choice for the canonical id.
    pub reference_id: String,
    /// Nested event object.
    pub event: String,
    /// Id inside the nested event, second choice.
    pub event_id: String,
    /// Fallback numeric id, last choice.
    pub fallback_id: String,
    /// Top-level object holding `home`/`away` strings.
    pub players: String,
    pub home: String,
    pub away: String,
    /// Name key inside the event's home/away objects.
    pub name: String,
}

impl Default for FeedAFields {
    fn default() -> Self {
        Self {
            reference_id: "bet365_id".to_string(),
            event: "inplay_event".to_string(),
            event_id: "id".to_string(),
            fallback_id: "FI".to_string(),
            players: "players".to_string(),
            home: "home".to_string(),
            away: "away".to_string(),
            name: "name".to_string(),
        }
    }
}

/// Field names in live-feed records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedBFields {
    /// Object holding the event fields. A record without it is read directly.
    pub container: String,
    pub composite_id: String,
    pub market_id: String,
    pub home: String,
    pub away: String,
    /// Combined "<home> - <away>" label.
    pub label: String,
    /// Odds embedded alongside the event, preferred over a separate lookup.
    pub odds: String,
}

impl Default for FeedBFields {
    fn default() -> Self {
        Self {
            container: "raw_event_data".to_string(),
            composite_id: "eventId".to_string(),
            market_id: "marketFI".to_string(),
            home: "team1".to_string(),
            away: "team2".to_string(),
            label: "eventName".to_string(),
            odds: "raw_odds_data".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MergeConfig {
    /// Partial-overlap score (0-100) required for two names to match.
    pub fuzzy_threshold: u8,
    /// Shortest digit run taken from a composite id.
    pub min_id_digits: usize,
    /// Hours east of UTC used to decide the calendar day.
    pub utc_offset_hours: i32,
    /// Explicit match id carried by events paired with odds.
    pub match_id_field: String,
    /// Live-feed fields scanned for numbers when reporting an unmatched record.
    pub hint_fields: Vec<String>,
    pub feed_a: FeedAFields,
    pub feed_b: FeedBFields,
}

impl Default for MergeConfig {
    fn default() -> Self {
        let feed_b = FeedBFields::default();
        Self {
            fuzzy_threshold: DEFAULT_THRESHOLD,
            min_id_digits: DEFAULT_MIN_ID_DIGITS,
            utc_offset_hours: 0,
            match_id_field: "match_id".to_string(),
            hint_fields: vec![feed_b.composite_id.clone(), feed_b.market_id.clone()],
            feed_a: FeedAFields::default(),
            feed_b,
        }
    }
}

impl MergeConfig {
    /// Defaults overlaid with any `MATCHPOINT_*` environment variables.
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();
        let hint_fields = get_env_var_as_vec(ENV_HINT_FIELDS, ';');
        let config = Self {
            fuzzy_threshold: get_env_var_or(ENV_FUZZY_THRESHOLD, defaults.fuzzy_threshold),
            min_id_digits: get_env_var_or(ENV_MIN_ID_DIGITS, defaults.min_id_digits),
            utc_offset_hours: get_env_var_or(ENV_UTC_OFFSET_HOURS, defaults.utc_offset_hours),
            match_id_field: get_env_var_opt(ENV_MATCH_ID_FIELD)
                .unwrap_or_else(|| defaults.match_id_field.clone()),
            hint_fields: if hint_fields.is_empty() {
                defaults.hint_fields.clone()
            } else {
                hint_fields
            },
            ..defaults
        };
        config.validate()?;
        Ok(config)
    }

    /// Loads a full configuration from JSON; omitted keys keep their defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: Self = serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.fuzzy_threshold > 100 {
            bail!(
                "fuzzy_threshold must be between 0 and 100, got {}",
                self.fuzzy_threshold
            );
        }
        if self.min_id_digits == 0 {
            bail!("min_id_digits must be at least 1");
        }
        if !(-12..=14).contains(&self.utc_offset_hours) {
            bail!(
                "utc_offset_hours must be between -12 and 14, got {}",
                self.utc_offset_hours
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = MergeConfig::default();
        assert_eq!(config.fuzzy_threshold, 80);
        assert_eq!(config.min_id_digits, 9);
        assert_eq!(config.feed_a.reference_id, "bet365_id");
        assert_eq!(config.feed_b.composite_id, "eventId");
        assert_eq!(config.hint_fields, vec!["eventId", "marketFI"]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_out_of_range() {
        let config = MergeConfig {
            fuzzy_threshold: 101,
            ..MergeConfig::default()
        };
        assert!(config.validate().is_err());

        let config = MergeConfig {
            min_id_digits: 0,
            ..MergeConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let path = std::env::temp_dir().join(format!(
            "matchpoint-config-{}.json",
            std::process::id()
        ));
        let mut file = fs::File::create(&path).unwrap();
        write!(
            file,
            r#"{{"fuzzy_threshold": 85, "feed_a": {{"reference_id": "reference_id", "event": "event"}}}}"#
        )
        .unwrap();

        let config = MergeConfig::from_json_file(&path).unwrap();
        fs::remove_file(&path).ok();

        assert_eq!(config.fuzzy_threshold, 85);
        assert_eq!(config.feed_a.reference_id, "reference_id");
        assert_eq!(config.feed_a.event, "event");
        assert_eq!(config.feed_a.fallback_id, "FI");
        assert_eq!(config.feed_b, FeedBFields::default());
    }

    #[test]
    fn test_missing_file_is_an_error() {
        assert!(MergeConfig::from_json_file("/nonexistent/matchpoint.json").is_err());
    }
}
