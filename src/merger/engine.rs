use serde::Serialize;
use std::collections::HashMap;
use tracing::{debug, info};

use super::names::{
    feed_a_participants, feed_b_container, feed_b_participants, update_names_in_feed_a,
    update_names_in_feed_b,
};
use crate::config::MergeConfig;
use crate::fallback::FallbackRateTracker;
use crate::identifier::{extract_correlation_id, possible_ids};
use crate::players::FuzzyMatcher;
use crate::record::{str_at, MatchPath, MergedRecord, ParticipantPair, RawRecord};
use crate::TARGET_MERGE;

/// Per-pass tallies of how records were placed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MergeReport {
    /// Reference records that produced an index entry.
    pub feed_a_indexed: usize,
    /// Reference records with no usable id.
    pub feed_a_dropped: usize,
    /// Reference records that replaced an earlier record with the same id.
    pub feed_a_replaced: usize,
    pub by_event_id: usize,
    pub by_market_id: usize,
    pub by_fuzzy_names: usize,
    /// Live records emitted without a reference counterpart.
    pub feed_b_standalone: usize,
}

impl MergeReport {
    fn record_attachment(&mut self, path: MatchPath) {
        match path {
            MatchPath::EventId => self.by_event_id += 1,
            MatchPath::MarketId => self.by_market_id += 1,
            MatchPath::FuzzyNames => self.by_fuzzy_names += 1,
        }
    }
}

#[derive(Debug, Clone)]
pub struct MergeOutcome {
    pub records: Vec<MergedRecord>,
    pub report: MergeReport,
}

/// Unifies reference-feed and live-feed records describing the same fixture.
///
/// Each pass builds its index from scratch; the only state that outlives a
/// pass is the caller's [`FallbackRateTracker`].
#[derive(Debug, Clone)]
pub struct FixtureMerger {
    config: MergeConfig,
    matcher: FuzzyMatcher,
}

impl Default for FixtureMerger {
    fn default() -> Self {
        Self::new(MergeConfig::default())
    }
}

/// Merged records in insertion order plus a lookup from canonical id to position.
struct MergeIndex {
    entries: Vec<MergedRecord>,
    positions: HashMap<String, usize>,
}

impl MergeIndex {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            positions: HashMap::with_capacity(capacity),
        }
    }

    /// Position of the entry keyed `id`, provided its live slot is still empty.
    fn vacant(&self, id: &str) -> Option<usize> {
        let position = *self.positions.get(id)?;
        if self.entries[position].feed_b().is_some() {
            debug!(
                target: TARGET_MERGE,
                "Entry {} already holds live data, trying next strategy", id
            );
            return None;
        }
        Some(position)
    }

    fn push(&mut self, key: Option<String>, record: MergedRecord) {
        if let Some(key) = key {
            self.positions.entry(key).or_insert(self.entries.len());
        }
        self.entries.push(record);
    }
}

impl FixtureMerger {
    pub fn new(config: MergeConfig) -> Self {
        let matcher = FuzzyMatcher::new().with_threshold(config.fuzzy_threshold);
        Self { config, matcher }
    }

    pub fn config(&self) -> &MergeConfig {
        &self.config
    }

    /// Canonical id of a reference record: explicit reference id, then the
    /// nested event id, then the fallback numeric field. First non-empty wins.
    pub fn canonical_id(&self, record: &RawRecord) -> Option<String> {
        let fields = &self.config.feed_a;
        [
            str_at(record, &[fields.reference_id.as_str()]),
            str_at(record, &[fields.event.as_str(), fields.event_id.as_str()]),
            str_at(record, &[fields.fallback_id.as_str()]),
        ]
        .into_iter()
        .map(|id| id.trim().to_string())
        .find(|id| !id.is_empty())
    }

    /// Runs one merge pass and returns the merged records.
    ///
    /// Output order: reference records in input order, then unmatched live
    /// records in input order.
    pub fn merge(
        &self,
        feed_a: Vec<RawRecord>,
        feed_b: Vec<RawRecord>,
        tracker: &mut FallbackRateTracker,
    ) -> Vec<MergedRecord> {
        self.merge_with_report(feed_a, feed_b, tracker).records
    }

    pub fn merge_with_report(
        &self,
        feed_a: Vec<RawRecord>,
        feed_b: Vec<RawRecord>,
        tracker: &mut FallbackRateTracker,
    ) -> MergeOutcome {
        let mut report = MergeReport::default();
        let mut index = self.build_index(feed_a, &mut report);

        for record in feed_b {
            self.place_live_record(&mut index, record, &mut report, tracker);
        }

        info!(
            target: TARGET_MERGE,
            "Merged {} records: {} by event id, {} by market id, {} by names, {} live-only, {} reference records dropped",
            index.entries.len(),
            report.by_event_id,
            report.by_market_id,
            report.by_fuzzy_names,
            report.feed_b_standalone,
            report.feed_a_dropped
        );

        MergeOutcome {
            records: index.entries,
            report,
        }
    }

    fn build_index(&self, feed_a: Vec<RawRecord>, report: &mut MergeReport) -> MergeIndex {
        let mut index = MergeIndex::with_capacity(feed_a.len());

        for record in feed_a {
            let Some(id) = self.canonical_id(&record) else {
                info!(
                    target: TARGET_MERGE,
                    "Skipping reference record without any usable id"
                );
                report.feed_a_dropped += 1;
                continue;
            };

            match index.positions.get(&id) {
                Some(&position) => {
                    debug!(
                        target: TARGET_MERGE,
                        "Reference id {} seen again, keeping the later record", id
                    );
                    index.entries[position].replace_feed_a(record);
                    report.feed_a_replaced += 1;
                }
                None => {
                    index.push(Some(id.clone()), MergedRecord::from_feed_a(id, record));
                    report.feed_a_indexed += 1;
                }
            }
        }

        index
    }

    fn place_live_record(
        &self,
        index: &mut MergeIndex,
        mut record: RawRecord,
        report: &mut MergeReport,
        tracker: &mut FallbackRateTracker,
    ) {
        let fields = &self.config.feed_b;
        let container = feed_b_container(&record, fields);
        let composite_id = str_at(container, &[fields.composite_id.as_str()]);
        let market_id = str_at(container, &[fields.market_id.as_str()]).trim().to_string();
        let extracted_id = extract_correlation_id(&composite_id, self.config.min_id_digits);
        let participants = feed_b_participants(&record, fields);

        let found = self.locate(index, extracted_id.as_deref(), &market_id, &participants);

        match found {
            Some((position, path)) => {
                let entry = &mut index.entries[position];
                info!(
                    target: TARGET_MERGE,
                    "Matched live event {} to {} by {}",
                    composite_id,
                    entry.id().unwrap_or_default(),
                    path
                );
                if let Some(reference) = entry.feed_a_mut() {
                    let canonical = feed_a_participants(reference, &self.config.feed_a);
                    if canonical.is_complete() {
                        update_names_in_feed_a(reference, &canonical, &self.config.feed_a);
                        let oriented = self.orient_to_live(&participants, canonical);
                        update_names_in_feed_b(&mut record, &oriented, fields);
                    }
                }
                entry.attach_feed_b(record, path);
                report.record_attachment(path);
                if path == MatchPath::FuzzyNames {
                    tracker.record_fallback();
                }
            }
            None => {
                let hint_fields: Vec<&str> =
                    self.config.hint_fields.iter().map(String::as_str).collect();
                info!(
                    target: TARGET_MERGE,
                    "Live event {} (market: {}, players: {}) not found in reference data; ids seen: {:?}",
                    composite_id,
                    market_id,
                    participants,
                    possible_ids(feed_b_container(&record, fields), &hint_fields)
                );
                let key = extracted_id.or_else(|| Some(market_id).filter(|id| !id.is_empty()));
                index.push(key.clone(), MergedRecord::from_feed_b(key, record));
                report.feed_b_standalone += 1;
            }
        }
    }

    /// Runs the correlation cascade: extracted event id, then market id, then
    /// participant names.
    fn locate(
        &self,
        index: &MergeIndex,
        extracted_id: Option<&str>,
        market_id: &str,
        participants: &ParticipantPair,
    ) -> Option<(usize, MatchPath)> {
        if let Some(position) = extracted_id.and_then(|id| index.vacant(id)) {
            return Some((position, MatchPath::EventId));
        }
        if !market_id.is_empty() {
            if let Some(position) = index.vacant(market_id) {
                return Some((position, MatchPath::MarketId));
            }
        }
        self.find_by_participants(index, participants)
            .map(|position| (position, MatchPath::FuzzyNames))
    }

    /// First reference entry, in index order, still lacking live data whose
    /// participants match. Not a best-score search: the earliest match wins.
    fn find_by_participants(
        &self,
        index: &MergeIndex,
        participants: &ParticipantPair,
    ) -> Option<usize> {
        index.entries.iter().position(|entry| {
            if entry.feed_b().is_some() {
                return false;
            }
            let Some(reference) = entry.feed_a() else {
                return false;
            };
            let candidate = feed_a_participants(reference, &self.config.feed_a);
            self.matcher.pair_equivalent(
                &participants.home,
                &participants.away,
                &candidate.home,
                &candidate.away,
            )
        })
    }

    /// Reference names arranged in the live record's home/away order, so each
    /// live slot keeps its player and only the spelling changes.
    fn orient_to_live(
        &self,
        live: &ParticipantPair,
        canonical: ParticipantPair,
    ) -> ParticipantPair {
        let flipped = self.matcher.pair_is_flipped(
            &live.home,
            &live.away,
            &canonical.home,
            &canonical.away,
        );
        if flipped {
            debug!(
                target: TARGET_MERGE,
                "Live record lists {} in reverse order", canonical
            );
            canonical.swapped()
        } else {
            canonical
        }
    }
}
