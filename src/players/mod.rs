//! Participant name handling for the fuzzy fallback path.
//!
//! [`normalizer`] canonicalizes raw player names; [`matching`] scores two
//! normalized names and decides whether two fixtures name the same players.

pub mod matching;
pub mod normalizer;

pub use matching::{partial_ratio, FuzzyMatcher, DEFAULT_THRESHOLD};
pub use normalizer::normalize_name;
