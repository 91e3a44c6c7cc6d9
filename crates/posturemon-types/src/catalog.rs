//! Read-only catalog definitions for quests and achievements.
//!
//! Definitions are template data. Nothing here is mutated at runtime;
//! per-user counters live in [`crate::records`].

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::{
    AchievementCategory, AchievementRarity, BonusType, QuestDifficulty, QuestType, RequirementType,
};
use crate::ids::{AchievementId, QuestId};

// ---------------------------------------------------------------------------
// Quests
// ---------------------------------------------------------------------------

/// An immutable quest template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct QuestDefinition {
    /// Stable slug.
    pub quest_id: QuestId,
    /// Exercise kind.
    pub quest_type: QuestType,
    /// Display title.
    pub title: String,
    /// One-line description.
    pub description: String,
    /// Difficulty tier.
    pub difficulty: QuestDifficulty,
    /// Total duration in seconds.
    pub duration_secs: u32,
    /// Ordered phases.
    pub phases: Vec<QuestPhase>,
    /// Reward table.
    pub rewards: QuestRewards,
    /// Gates that must pass before the quest can start.
    #[serde(default)]
    pub requirements: Option<QuestRequirements>,
    /// Shown in the recommended list.
    #[serde(default)]
    pub recommended: bool,
}

/// One timed step of a quest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct QuestPhase {
    /// Slug unique within the quest.
    pub phase_id: String,
    /// Display name.
    pub name: String,
    /// One-line description.
    pub description: String,
    /// Duration in seconds.
    pub duration_secs: u32,
    /// Ordered instructions shown to the player.
    pub instructions: Vec<String>,
    /// Optional posture validation for this phase.
    #[serde(default)]
    pub validation: Option<ValidationCriteria>,
    /// Message shown when the phase completes.
    pub success_message: String,
}

/// Checks a phase may impose on the live posture signal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct ValidationCriteria {
    /// Minimum overall score (0--100) the player must hold.
    #[serde(default)]
    pub min_posture_score: Option<u32>,
    /// Named movements the player must perform.
    #[serde(default)]
    pub required_movements: Vec<String>,
}

/// What a quest pays out on completion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct QuestRewards {
    /// Base experience.
    pub xp: u32,
    /// Extra pet happiness on top of the standard completion gain.
    #[serde(default)]
    pub happiness: Option<u32>,
    /// Extra pet energy on top of the standard break gain.
    #[serde(default)]
    pub energy: Option<u32>,
    /// Conditional multiplier.
    #[serde(default)]
    pub bonus: Option<QuestBonus>,
    /// Cosmetic unlocks granted on completion.
    #[serde(default)]
    pub pet_unlocks: Vec<String>,
}

/// A multiplier applied when its condition holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct QuestBonus {
    /// Condition that activates the multiplier.
    pub bonus_type: BonusType,
    /// Factor applied to the base XP.
    #[ts(as = "String")]
    pub multiplier: Decimal,
}

/// Start conditions for a quest.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct QuestRequirements {
    /// Minimum player level.
    #[serde(default)]
    pub min_level: Option<u32>,
    /// Quests that must have been completed first.
    #[serde(default)]
    pub completed_quests: Vec<QuestId>,
}

// ---------------------------------------------------------------------------
// Achievements
// ---------------------------------------------------------------------------

/// An immutable achievement template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct AchievementDefinition {
    /// Stable slug.
    pub achievement_id: AchievementId,
    /// Gallery grouping.
    pub category: AchievementCategory,
    /// Rarity tier.
    pub rarity: AchievementRarity,
    /// Display name.
    pub name: String,
    /// One-line description.
    pub description: String,
    /// Emoji icon.
    pub icon: String,
    /// Unlock condition.
    pub requirement: AchievementRequirement,
    /// Payout on unlock.
    pub rewards: AchievementRewards,
    /// Hidden from locked listings until unlocked.
    pub hidden: bool,
    /// Eligible for the profile showcase.
    pub showcase: bool,
}

/// The statistic and target an achievement is measured against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct AchievementRequirement {
    /// Statistic being measured.
    pub requirement_type: RequirementType,
    /// Value at which the achievement unlocks.
    pub target: u32,
    /// Hour-of-day window for [`RequirementType::QuestTime`].
    #[serde(default)]
    pub window: Option<HourWindow>,
}

/// A half-open UTC hour-of-day window `[start_hour, end_hour)`.
///
/// When `start_hour > end_hour` the window wraps past midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct HourWindow {
    /// First hour inside the window (0--23).
    pub start_hour: u32,
    /// First hour after the window (1--24).
    pub end_hour: u32,
}

impl HourWindow {
    /// Whether `hour` falls inside the window.
    pub const fn contains(self, hour: u32) -> bool {
        if self.start_hour <= self.end_hour {
            hour >= self.start_hour && hour < self.end_hour
        } else {
            hour >= self.start_hour || hour < self.end_hour
        }
    }
}

/// Payout granted when an achievement unlocks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct AchievementRewards {
    /// Bonus experience.
    pub xp: u32,
    /// Cosmetic unlocks.
    #[serde(default)]
    pub pet_unlocks: Vec<String>,
    /// Profile title.
    #[serde(default)]
    pub title: Option<String>,
    /// Profile badge.
    #[serde(default)]
    pub badge: Option<String>,
}
