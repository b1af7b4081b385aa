use serde::Serialize;

use crate::record::MergedRecord;

/// Counts over one merged set. `total == both_sources + feed_a_only + feed_b_only`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MatchStatistics {
    pub total: usize,
    pub both_sources: usize,
    pub feed_a_only: usize,
    pub feed_b_only: usize,
}

impl MatchStatistics {
    /// Share of records that joined both feeds, 0.0 for an empty set.
    pub fn match_rate(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.both_sources as f64 / self.total as f64
        }
    }
}

pub fn stats(merged: &[MergedRecord]) -> MatchStatistics {
    merged
        .iter()
        .fold(MatchStatistics::default(), |mut acc, record| {
            acc.total += 1;
            match (record.feed_a().is_some(), record.feed_b().is_some()) {
                (true, true) => acc.both_sources += 1,
                (true, false) => acc.feed_a_only += 1,
                (false, true) => acc.feed_b_only += 1,
                (false, false) => {}
            }
            acc
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::MatchPath;
    use serde_json::json;

    #[test]
    fn test_stats_counts() {
        let mut joined = MergedRecord::from_feed_a("1".to_string(), json!({}));
        joined.attach_feed_b(json!({}), MatchPath::EventId);
        let merged = vec![
            joined,
            MergedRecord::from_feed_a("2".to_string(), json!({})),
            MergedRecord::from_feed_a("3".to_string(), json!({})),
            MergedRecord::from_feed_b(None, json!({})),
        ];

        let stats = stats(&merged);
        assert_eq!(
            stats,
            MatchStatistics {
                total: 4,
                both_sources: 1,
                feed_a_only: 2,
                feed_b_only: 1,
            }
        );
        assert_eq!(
            stats.total,
            stats.both_sources + stats.feed_a_only + stats.feed_b_only
        );
        assert_eq!(stats.match_rate(), 0.25);
    }

    #[test]
    fn test_stats_empty() {
        let stats = stats(&[]);
        assert_eq!(stats, MatchStatistics::default());
        assert_eq!(stats.match_rate(), 0.0);
    }
}
