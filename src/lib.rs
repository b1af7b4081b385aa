//! Reconciliation of tennis fixtures reported by a reference (pre-match) feed
//! and a live (in-play) feed.
//!
//! The two feeds use different identifier schemes and spell player names
//! differently. [`merger::FixtureMerger`] correlates them by embedded ids where
//! possible and by fuzzy name matching otherwise, producing one
//! [`record::MergedRecord`] per fixture.

pub mod config;
pub mod environment;
pub mod fallback;
pub mod identifier;
pub mod logging;
pub mod merger;
pub mod players;
pub mod record;
pub mod stats;

pub use config::MergeConfig;
pub use fallback::{DayClock, FallbackRateTracker, OffsetClock};
pub use merger::{EventOdds, FixtureMerger, MergeOutcome, MergeReport};
pub use record::{MatchPath, MergedRecord, ParticipantPair, RawRecord};
pub use stats::{stats, MatchStatistics};

pub const TARGET_MERGE: &str = "merge";
pub const TARGET_PLAYERS: &str = "players";
