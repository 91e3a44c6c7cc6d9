//! Per-user progress records and the persisted snapshot.
//!
//! Catalog definitions are shared and read-only; everything a player
//! accumulates against them lives in these records, keyed by the
//! definition's slug.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::ids::{AchievementId, QuestId, UserId};
use crate::structs::{PetState, PlayerStats};

/// Current snapshot schema version.
pub const SNAPSHOT_VERSION: u32 = 1;

/// A player's completion history for one quest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct QuestRecord {
    /// The quest this record tracks.
    pub quest_id: QuestId,
    /// Number of completions.
    pub times_completed: u32,
    /// When the quest was last completed.
    pub last_completed: Option<DateTime<Utc>>,
}

/// A player's progress toward one achievement.
///
/// Once `unlocked` is set it never reverts and `unlocked_at` never changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct AchievementProgress {
    /// The achievement this record tracks.
    pub achievement_id: AchievementId,
    /// Peak observed value of the measured statistic.
    pub current: u32,
    /// Integer percent toward the target (0--100).
    pub progress: u32,
    /// Whether the achievement has been unlocked.
    pub unlocked: bool,
    /// When the achievement was unlocked.
    pub unlocked_at: Option<DateTime<Utc>>,
}

impl AchievementProgress {
    /// A fresh, locked record with no progress.
    pub const fn locked(achievement_id: AchievementId) -> Self {
        Self {
            achievement_id,
            current: 0,
            progress: 0,
            unlocked: false,
            unlocked_at: None,
        }
    }
}

/// Persisted state of the daily streak tracker.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct StreakState {
    /// Most recent day that counted toward the streak.
    pub last_qualifying_day: Option<NaiveDate>,
    /// Day the good-posture tally belongs to.
    pub tally_day: Option<NaiveDate>,
    /// Good-posture milliseconds accumulated on `tally_day`.
    pub tally_good_ms: u64,
}

/// The durable subset of game state, written at lifecycle points and read
/// once at startup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct GameSnapshot {
    /// Schema version ([`SNAPSHOT_VERSION`]).
    pub version: u32,
    /// Owner of this snapshot.
    pub user_id: UserId,
    /// Whether the detector had a baseline.
    pub is_calibrated: bool,
    /// Pet state.
    pub pet: PetState,
    /// Player counters.
    pub player: PlayerStats,
    /// Achievement progress in catalog order.
    pub achievements: Vec<AchievementProgress>,
    /// Quest completion history.
    #[serde(default)]
    pub quest_log: Vec<QuestRecord>,
    /// Daily streak tracker state.
    #[serde(default)]
    pub streak: StreakState,
    /// When the snapshot was written.
    #[serde(default)]
    pub saved_at: Option<DateTime<Utc>>,
}
