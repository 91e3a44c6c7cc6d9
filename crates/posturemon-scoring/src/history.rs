//! Bounded FIFO ring of recent posture snapshots.
//!
//! The ring holds at most `capacity` entries; pushing onto a full ring
//! evicts the oldest. Summaries are computed on demand from the retained
//! window only.

use std::collections::VecDeque;

use posturemon_types::{PostureSnapshot, PostureStatus};
use serde::{Deserialize, Serialize};

use crate::metrics;

/// Default number of retained snapshots.
pub const MAX_HISTORY_POINTS: usize = 300;

/// Default cap on the time credited to a single sample gap (ms).
pub const DEFAULT_MAX_SAMPLE_GAP_MS: u64 = 5_000;

/// Fixed-capacity history of posture snapshots, oldest first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostureHistory {
    capacity: usize,
    samples: VecDeque<PostureSnapshot>,
}

/// Aggregates over the retained history window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct HistorySummary {
    /// Number of snapshots in the window.
    pub samples: usize,
    /// Mean overall score (0 when empty).
    pub average_score: f64,
    /// Lowest overall score.
    pub min_score: Option<f64>,
    /// Highest overall score.
    pub max_score: Option<f64>,
    /// Snapshots with a good status.
    pub good_samples: usize,
    /// Snapshots with a bad status.
    pub bad_samples: usize,
    /// Milliseconds credited to good posture.
    pub good_ms: u64,
    /// Milliseconds credited to bad posture.
    pub bad_ms: u64,
}

impl Default for PostureHistory {
    fn default() -> Self {
        Self::new(MAX_HISTORY_POINTS)
    }
}

impl PostureHistory {
    /// An empty ring. A capacity of 0 is raised to 1.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            samples: VecDeque::with_capacity(capacity),
        }
    }

    /// Maximum number of retained snapshots.
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of retained snapshots.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Whether the ring is empty.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Append a snapshot, evicting the oldest when full.
    pub fn push(&mut self, snapshot: PostureSnapshot) {
        while self.samples.len() >= self.capacity {
            self.samples.pop_front();
        }
        self.samples.push_back(snapshot);
    }

    /// Snapshots from oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &PostureSnapshot> {
        self.samples.iter()
    }

    /// Most recent snapshot.
    pub fn latest(&self) -> Option<&PostureSnapshot> {
        self.samples.back()
    }

    /// Drop every snapshot.
    pub fn clear(&mut self) {
        self.samples.clear();
    }

    /// Mean overall score of the newest `window` snapshots (0 when empty).
    pub fn recent_average(&self, window: usize) -> f64 {
        let scores: Vec<f64> = self.samples.iter().map(|s| s.score.overall).collect();
        metrics::sma(&scores, window)
    }

    /// Aggregate the whole window.
    ///
    /// Each gap between adjacent snapshots is credited to the earlier
    /// snapshot's status, capped at `max_gap_ms`. Out-of-order timestamps
    /// credit nothing.
    pub fn summary(&self, max_gap_ms: u64) -> HistorySummary {
        let scores: Vec<f64> = self.samples.iter().map(|s| s.score.overall).collect();
        let mut summary = HistorySummary {
            samples: scores.len(),
            average_score: metrics::average(&scores),
            min_score: metrics::min(&scores),
            max_score: metrics::max(&scores),
            ..HistorySummary::default()
        };

        for snapshot in &self.samples {
            match snapshot.score.status {
                PostureStatus::Good => {
                    summary.good_samples = summary.good_samples.saturating_add(1);
                }
                PostureStatus::Bad => {
                    summary.bad_samples = summary.bad_samples.saturating_add(1);
                }
                PostureStatus::Warning | PostureStatus::Unknown => {}
            }
        }

        for (earlier, later) in self.samples.iter().zip(self.samples.iter().skip(1)) {
            let gap = later.timestamp_ms.saturating_sub(earlier.timestamp_ms);
            let gap = u64::try_from(gap).unwrap_or(0).min(max_gap_ms);
            match earlier.score.status {
                PostureStatus::Good => summary.good_ms = summary.good_ms.saturating_add(gap),
                PostureStatus::Bad => summary.bad_ms = summary.bad_ms.saturating_add(gap),
                PostureStatus::Warning | PostureStatus::Unknown => {}
            }
        }

        summary
    }
}

#[cfg(test)]
mod tests {
    use posturemon_types::{PostureScore, ScoreBreakdown};

    use super::*;

    fn snap(timestamp_ms: i64, overall: f64, status: PostureStatus) -> PostureSnapshot {
        PostureSnapshot {
            timestamp_ms,
            score: PostureScore {
                overall,
                status,
                breakdown: ScoreBreakdown::uniform(overall),
                confidence: 100.0,
            },
            distance: 0.0,
            alerts: Vec::new(),
        }
    }

    #[test]
    fn ring_evicts_oldest() {
        let mut history = PostureHistory::default();
        for i in 0..301_i64 {
            history.push(snap(i, 50.0, PostureStatus::Warning));
        }
        assert_eq!(history.len(), MAX_HISTORY_POINTS);
        assert_eq!(history.iter().next().map(|s| s.timestamp_ms), Some(1));
        assert_eq!(history.latest().map(|s| s.timestamp_ms), Some(300));
    }

    #[test]
    fn zero_capacity_is_raised() {
        let mut history = PostureHistory::new(0);
        history.push(snap(1, 10.0, PostureStatus::Bad));
        history.push(snap(2, 20.0, PostureStatus::Bad));
        assert_eq!(history.capacity(), 1);
        assert_eq!(history.latest().map(|s| s.timestamp_ms), Some(2));
    }

    #[test]
    fn empty_summary_is_neutral() {
        let summary = PostureHistory::default().summary(DEFAULT_MAX_SAMPLE_GAP_MS);
        assert_eq!(summary.samples, 0);
        assert!(summary.average_score.abs() < f64::EPSILON);
        assert_eq!(summary.min_score, None);
        assert_eq!(summary.good_ms, 0);
    }

    #[test]
    fn summary_credits_gaps_to_earlier_status() {
        let mut history = PostureHistory::default();
        history.push(snap(0, 90.0, PostureStatus::Good));
        history.push(snap(1_000, 30.0, PostureStatus::Bad));
        history.push(snap(3_000, 60.0, PostureStatus::Warning));
        history.push(snap(4_000, 90.0, PostureStatus::Good));

        let summary = history.summary(DEFAULT_MAX_SAMPLE_GAP_MS);
        assert_eq!(summary.samples, 4);
        assert_eq!(summary.good_samples, 2);
        assert_eq!(summary.bad_samples, 1);
        assert_eq!(summary.good_ms, 1_000);
        assert_eq!(summary.bad_ms, 2_000);
        assert!((summary.average_score - 67.5).abs() < 1e-9);
        assert_eq!(summary.max_score, Some(90.0));
    }

    #[test]
    fn long_gaps_are_capped() {
        let mut history = PostureHistory::default();
        history.push(snap(0, 90.0, PostureStatus::Good));
        history.push(snap(3_600_000, 90.0, PostureStatus::Good));
        history.push(snap(3_599_000, 90.0, PostureStatus::Good));
        let summary = history.summary(5_000);
        assert_eq!(summary.good_ms, 5_000);
    }

    #[test]
    fn recent_average_uses_newest() {
        let mut history = PostureHistory::default();
        history.push(snap(0, 10.0, PostureStatus::Bad));
        history.push(snap(1, 80.0, PostureStatus::Good));
        history.push(snap(2, 100.0, PostureStatus::Good));
        assert!((history.recent_average(2) - 90.0).abs() < 1e-9);
        history.clear();
        assert!(history.is_empty());
        assert!(history.recent_average(5).abs() < f64::EPSILON);
    }
}
