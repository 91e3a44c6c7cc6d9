//! Change notifications for the presentation layer.
//!
//! Events are dispatched after a command commits, so an observer always
//! sees the post-transition [`GameState`].

use posturemon_types::{AchievementId, PetEvolution, PetMood, QuestId};
use serde::Serialize;

use crate::store::GameState;

/// What produced an XP award.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum XpSource {
    /// A completed quest.
    Quest,
    /// An unlocked achievement's reward.
    Achievement,
    /// A direct award.
    Direct,
}

/// A committed state change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum GameEvent {
    /// The pet's mood changed.
    MoodChanged {
        /// Mood before the reading.
        previous: PetMood,
        /// Mood after the reading.
        current: PetMood,
    },
    /// The player gained one or more levels.
    LevelUp {
        /// Level before the award.
        previous_level: u32,
        /// Level after the award.
        new_level: u32,
    },
    /// The pet reached a new evolution stage.
    EvolutionChanged {
        /// Stage before the level-up.
        previous: PetEvolution,
        /// Stage after the level-up.
        current: PetEvolution,
    },
    /// XP was credited.
    XpAwarded {
        /// Amount credited.
        amount: u64,
        /// Where it came from.
        source: XpSource,
    },
    /// A quest session began.
    QuestStarted {
        /// The quest being played.
        quest_id: QuestId,
    },
    /// A quest was completed and rewarded.
    QuestCompleted {
        /// The completed quest.
        quest_id: QuestId,
        /// Quest XP before achievement rewards.
        xp_awarded: u64,
    },
    /// A quest session ended without completion.
    QuestEnded {
        /// The abandoned quest.
        quest_id: QuestId,
    },
    /// An achievement unlocked.
    AchievementUnlocked {
        /// The unlocked achievement.
        achievement_id: AchievementId,
        /// Its reward XP.
        reward_xp: u32,
    },
    /// The streak moved (extended, or restarted at 1).
    StreakExtended {
        /// Streak after the change.
        streak: u32,
    },
    /// The detector's calibration flag flipped.
    CalibrationChanged {
        /// New calibration flag.
        calibrated: bool,
    },
}

/// Receives committed state changes.
pub trait StoreObserver: Send {
    /// Called once per event, after the transition commits.
    fn on_event(&mut self, event: &GameEvent, state: &GameState);
}

/// An observer that ignores every event.
pub struct NoOpObserver;

impl StoreObserver for NoOpObserver {
    fn on_event(&mut self, _event: &GameEvent, _state: &GameState) {}
}
