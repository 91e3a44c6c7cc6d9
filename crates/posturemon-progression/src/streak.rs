//! Daily good-posture streak tracking.
//!
//! Good-posture time is tallied per UTC day. The first time a day's tally
//! reaches the threshold, that day qualifies. A qualifying day continues
//! the streak when it falls within `1 + grace_days` days of the previous
//! qualifying day; otherwise the streak restarts at 1.

use chrono::NaiveDate;
use posturemon_types::StreakState;

use crate::config::ProgressionConfig;

/// A day that just crossed the good-posture threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QualifiedDay {
    /// The qualifying UTC day.
    pub day: NaiveDate,
    /// Whether this day continues the previous streak.
    pub continues: bool,
}

/// Accumulates good-posture time and reports qualifying days.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreakTracker {
    state: StreakState,
    threshold_ms: u64,
    grace_days: u32,
}

impl StreakTracker {
    /// A tracker resuming from persisted state.
    pub fn new(state: StreakState, config: &ProgressionConfig) -> Self {
        Self {
            state,
            threshold_ms: config.streak_threshold_ms(),
            grace_days: config.streak_grace_days,
        }
    }

    /// The persistable state.
    pub const fn state(&self) -> &StreakState {
        &self.state
    }

    /// Good-posture milliseconds tallied for `day` so far.
    pub fn tally_for(&self, day: NaiveDate) -> u64 {
        if self.state.tally_day == Some(day) {
            self.state.tally_good_ms
        } else {
            0
        }
    }

    /// Credit `good_ms` of good posture to `day`.
    ///
    /// Returns the day when this credit makes it qualify for the first
    /// time. Credits for a day earlier than the current tally day are
    /// ignored.
    pub fn record_good_time(&mut self, day: NaiveDate, good_ms: u64) -> Option<QualifiedDay> {
        match self.state.tally_day {
            Some(current) if day < current => return None,
            Some(current) if day == current => {}
            _ => {
                self.state.tally_day = Some(day);
                self.state.tally_good_ms = 0;
            }
        }
        self.state.tally_good_ms = self.state.tally_good_ms.saturating_add(good_ms);

        if self.state.tally_good_ms < self.threshold_ms {
            return None;
        }
        if self.state.last_qualifying_day.is_some_and(|last| last >= day) {
            return None;
        }

        let continues = self
            .state
            .last_qualifying_day
            .is_some_and(|last| self.within_grace(last, day));
        self.state.last_qualifying_day = Some(day);
        Some(QualifiedDay { day, continues })
    }

    /// Whether the streak has lapsed by `today`: no qualifying day within
    /// the grace window and no chance to continue it today.
    pub fn is_lapsed(&self, today: NaiveDate) -> bool {
        self.state
            .last_qualifying_day
            .is_some_and(|last| !self.within_grace(last, today) && today > last)
    }

    fn within_grace(&self, last: NaiveDate, day: NaiveDate) -> bool {
        let gap = day.signed_duration_since(last).num_days();
        let limit = i64::from(self.grace_days).saturating_add(1);
        gap >= 1 && gap <= limit
    }
}
