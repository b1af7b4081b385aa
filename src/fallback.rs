//! Day-scoped counter of fuzzy-fallback attachments.
//!
//! The counter is observational: it never blocks or throttles the fallback
//! path. It resets the first time it is touched on a new calendar day, where
//! "day" is decided by a [`DayClock`] shared with the caller so both agree on
//! when midnight happens.

use chrono::{FixedOffset, NaiveDate, Offset, Utc};
use std::sync::Arc;
use tracing::info;

use crate::TARGET_MERGE;

/// Source of the current calendar date.
pub trait DayClock: Send + Sync {
    fn today(&self) -> NaiveDate;
}

/// Calendar date at a fixed UTC offset.
#[derive(Debug, Clone, Copy)]
pub struct OffsetClock {
    offset: FixedOffset,
}

impl OffsetClock {
    /// `hours` east of UTC; out-of-range values fall back to UTC.
    pub fn from_hours(hours: i32) -> Self {
        let offset =
            FixedOffset::east_opt(hours.saturating_mul(3600)).unwrap_or_else(|| Utc.fix());
        Self { offset }
    }

    pub fn utc() -> Self {
        Self::from_hours(0)
    }
}

impl DayClock for OffsetClock {
    fn today(&self) -> NaiveDate {
        Utc::now().with_timezone(&self.offset).date_naive()
    }
}

pub struct FallbackRateTracker {
    clock: Arc<dyn DayClock>,
    count: u64,
    last_reset: NaiveDate,
}

impl FallbackRateTracker {
    pub fn new(clock: Arc<dyn DayClock>) -> Self {
        let last_reset = clock.today();
        Self {
            clock,
            count: 0,
            last_reset,
        }
    }

    /// Zero the counter if `today` differs from the last reset date.
    pub fn check_and_reset_daily(&mut self, today: NaiveDate) {
        if today != self.last_reset {
            info!(
                target: TARGET_MERGE,
                "Resetting fuzzy fallback count ({} on {}) for {}",
                self.count, self.last_reset, today
            );
            self.count = 0;
            self.last_reset = today;
        }
    }

    pub fn record_fallback(&mut self) {
        let today = self.clock.today();
        self.check_and_reset_daily(today);
        self.count += 1;
    }

    /// Fallbacks recorded today.
    pub fn count(&mut self) -> u64 {
        let today = self.clock.today();
        self.check_and_reset_daily(today);
        self.count
    }

    pub fn last_reset(&self) -> NaiveDate {
        self.last_reset
    }
}

impl std::fmt::Debug for FallbackRateTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FallbackRateTracker")
            .field("count", &self.count)
            .field("last_reset", &self.last_reset)
            .finish()
    }
}
