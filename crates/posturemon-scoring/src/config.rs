//! Tunable scoring parameters.

use posturemon_types::PostureWeights;
use serde::{Deserialize, Serialize};

use crate::history::{DEFAULT_MAX_SAMPLE_GAP_MS, MAX_HISTORY_POINTS};
use crate::mood::MoodThresholds;

/// Scoring, mood, and history parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Score-to-mood table.
    pub mood: MoodThresholds,
    /// Region weights for the overall score.
    pub weights: PostureWeights,
    /// Snapshots retained in the history ring (default: 300).
    pub history_capacity: usize,
    /// Cap on time credited to one sample gap in ms (default: 5000).
    pub max_sample_gap_ms: u64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            mood: MoodThresholds::default(),
            weights: PostureWeights::default(),
            history_capacity: MAX_HISTORY_POINTS,
            max_sample_gap_ms: DEFAULT_MAX_SAMPLE_GAP_MS,
        }
    }
}
