//! Correlation ids hidden inside the live feed's composite identifiers.
//!
//! A live event id such as `6V170281242C13A_1_1` embeds the reference feed's
//! fixture number (`170281242`). The reference numbers are long, so any run of
//! at least [`DEFAULT_MIN_ID_DIGITS`] digits is taken as the candidate.

use lazy_static::lazy_static;
use regex::Regex;
use serde_json::Value;
use std::collections::BTreeSet;

use crate::record::str_at;

/// Shortest digit run accepted as a reference-feed fixture number.
pub const DEFAULT_MIN_ID_DIGITS: usize = 9;

lazy_static! {
    static ref DIGIT_RUN: Regex = Regex::new(r"[0-9]+").expect("digit run pattern is valid");
}

/// First run of at least `min_digits` consecutive digits in `composite_id`.
pub fn extract_correlation_id(composite_id: &str, min_digits: usize) -> Option<String> {
    DIGIT_RUN
        .find_iter(composite_id)
        .map(|m| m.as_str())
        .find(|run| run.len() >= min_digits.max(1))
        .map(str::to_string)
}

/// Every digit run found in the given top-level fields of `record`.
///
/// Used to report which numbers an unmatched record carried, so a missed
/// correlation can be diagnosed from the logs.
pub fn possible_ids(record: &Value, fields: &[&str]) -> BTreeSet<String> {
    fields
        .iter()
        .map(|field| str_at(record, &[*field]))
        .filter(|value| !value.is_empty())
        .flat_map(|value| {
            DIGIT_RUN
                .find_iter(&value)
                .map(|m| m.as_str().to_string())
                .collect::<Vec<_>>()
        })
        .collect()
}
