//! Core entity structs: player statistics, pet state, and posture data.
//!
//! These are the outbound shapes the presentation layer reads and the
//! inbound reading delivered by the polling collaborator.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::{PetEvolution, PetMood, PostureStatus};
use crate::ids::PetId;

// ---------------------------------------------------------------------------
// Player
// ---------------------------------------------------------------------------

/// Progression counters for one player profile.
///
/// Mutated only through the progression engine (`add_xp`, `complete_quest`,
/// streak updates). `total_xp` and `quests_completed` never decrease.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct PlayerStats {
    /// Current level (always at least 1).
    pub level: u32,
    /// Experience earned inside the current level.
    pub xp: u64,
    /// Lifetime experience.
    pub total_xp: u64,
    /// Consecutive qualifying days.
    pub streak: u32,
    /// Longest streak ever reached.
    #[serde(default)]
    pub longest_streak: u32,
    /// Lifetime quest completions.
    pub quests_completed: u32,
    /// Time-of-day and calendar record of quest completions.
    #[serde(default)]
    pub activity: QuestActivity,
}

impl Default for PlayerStats {
    fn default() -> Self {
        Self {
            level: 1,
            xp: 0,
            total_xp: 0,
            streak: 0,
            longest_streak: 0,
            quests_completed: 0,
            activity: QuestActivity::default(),
        }
    }
}

/// When quests were completed, in a bounded form.
///
/// Hours are UTC hours of day (0--23). Only the most recent weekend is
/// tracked in detail; `best_weekend_days` keeps the best coverage seen.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct QuestActivity {
    /// Completion count per hour of day.
    pub completions_by_hour: BTreeMap<u32, u32>,
    /// Coverage of the most recent weekend with a completion.
    pub weekend: Option<WeekendCoverage>,
    /// Most weekend days (0--2) covered within a single weekend.
    pub best_weekend_days: u32,
}

/// Which days of one weekend had at least one quest completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct WeekendCoverage {
    /// The Saturday that starts this weekend.
    pub saturday_of: NaiveDate,
    /// A quest was completed on Saturday.
    pub saturday: bool,
    /// A quest was completed on Sunday.
    pub sunday: bool,
}

// ---------------------------------------------------------------------------
// Pet
// ---------------------------------------------------------------------------

/// The virtual pet's visible state.
///
/// `evolution` is a monotonic function of `level`; `mood` is recomputed
/// from each posture reading. Gauges are bounded to 0--100.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct PetState {
    /// Pet identifier.
    pub id: PetId,
    /// Display name.
    pub name: String,
    /// Current mood.
    pub mood: PetMood,
    /// Current evolution stage.
    pub evolution: PetEvolution,
    /// Mirrors the player level.
    pub level: u32,
    /// Health gauge (0--100).
    pub health: u32,
    /// Happiness gauge (0--100).
    pub happiness: u32,
    /// Energy gauge (0--100).
    pub energy: u32,
    /// Body color as a CSS hex string.
    pub color: String,
    /// Number of direct interactions (feeding).
    #[serde(default)]
    pub interactions: u32,
    /// Unix milliseconds of the last state-changing action.
    #[serde(default)]
    pub last_action_ms: i64,
}

// ---------------------------------------------------------------------------
// Posture
// ---------------------------------------------------------------------------

/// Per-region posture sub-scores (each 0--100).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct ScoreBreakdown {
    /// Head position.
    pub head: f64,
    /// Shoulder alignment.
    pub shoulders: f64,
    /// Spine curvature.
    pub spine: f64,
    /// Left/right balance.
    pub symmetry: f64,
}

impl ScoreBreakdown {
    /// A breakdown where every region carries the same score.
    pub const fn uniform(score: f64) -> Self {
        Self {
            head: score,
            shoulders: score,
            spine: score,
            symmetry: score,
        }
    }
}

/// Relative weight of each region in the overall score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
#[serde(default)]
pub struct PostureWeights {
    /// Weight of head position (default: 0.3).
    pub head: f64,
    /// Weight of shoulder alignment (default: 0.25).
    pub shoulders: f64,
    /// Weight of spine curvature (default: 0.25).
    pub spine: f64,
    /// Weight of left/right balance (default: 0.2).
    pub symmetry: f64,
}

impl Default for PostureWeights {
    fn default() -> Self {
        Self {
            head: 0.3,
            shoulders: 0.25,
            spine: 0.25,
            symmetry: 0.2,
        }
    }
}

impl ScoreBreakdown {
    /// Weighted mean of the four regions. Returns 0 when the weights sum
    /// to zero.
    pub fn weighted_overall(&self, weights: &PostureWeights) -> f64 {
        let weight_sum = weights.head + weights.shoulders + weights.spine + weights.symmetry;
        if weight_sum == 0.0 {
            return 0.0;
        }
        let weighted = self.symmetry.mul_add(
            weights.symmetry,
            self.spine.mul_add(
                weights.spine,
                self.head.mul_add(weights.head, self.shoulders * weights.shoulders),
            ),
        );
        weighted / weight_sum
    }
}

/// A normalized posture score.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct PostureScore {
    /// Overall score (0--100).
    pub overall: f64,
    /// Discrete category.
    pub status: PostureStatus,
    /// Per-region sub-scores.
    pub breakdown: ScoreBreakdown,
    /// Detector confidence (0--100).
    pub confidence: f64,
}

/// A point-in-time posture record retained in the history ring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct PostureSnapshot {
    /// Unix milliseconds when the reading was taken.
    pub timestamp_ms: i64,
    /// Derived score.
    pub score: PostureScore,
    /// Raw distance from the calibrated baseline.
    pub distance: f64,
    /// User-facing alerts for this reading.
    pub alerts: Vec<String>,
}

/// A raw reading handed over by the polling collaborator.
///
/// Field aliases accept the backend's own key names (`status`,
/// `timestamp`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct PostureReading {
    /// Free-form status label from the detector (e.g. `"GOOD POSTURE"`).
    #[serde(alias = "status")]
    pub status_label: String,
    /// Distance from the calibrated baseline.
    pub distance: f64,
    /// Whether a person is in frame. Missing means detected.
    #[serde(default = "default_true")]
    pub person_detected: bool,
    /// Whether the detector has a baseline.
    #[serde(default)]
    pub calibrated: bool,
    /// Unix milliseconds.
    #[serde(alias = "timestamp")]
    pub timestamp_ms: i64,
}

const fn default_true() -> bool {
    true
}
