//! Reconciliation of reference-feed and live-feed fixture records.
//!
//! A merge pass indexes the reference records by canonical id, then walks the
//! live records through a cascade of correlation strategies:
//!
//! 1. the reference id embedded in the live composite event id,
//! 2. the live record's market id,
//! 3. fuzzy matching of the two participants' names, either orientation.
//!
//! Live records that find no partner are kept as live-only records. Matched
//! records get the reference feed's spelling of the participants' names.

mod engine;
mod names;
mod odds;

pub use self::engine::{FixtureMerger, MergeOutcome, MergeReport};
pub use self::names::{
    feed_a_participants, feed_b_container, feed_b_participants, update_names_in_feed_a,
    update_names_in_feed_b,
};
pub use self::odds::EventOdds;
