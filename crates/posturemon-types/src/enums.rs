//! Enumeration types for the Posturemon progression engine.
//!
//! Wire names are kebab-case (`"micro-break"`, `"perfect-score"`,
//! `"quests-completed"`) so persisted snapshots stay readable by the web
//! client that consumes the generated TypeScript bindings.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

// ---------------------------------------------------------------------------
// Pet
// ---------------------------------------------------------------------------

/// The pet's current emotional state, derived from the latest posture score.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[serde(rename_all = "kebab-case")]
#[ts(export, export_to = "bindings/")]
pub enum PetMood {
    /// Excellent posture.
    Cheerful,
    /// Good posture.
    Happy,
    /// Acceptable posture, or no usable score yet.
    #[default]
    Neutral,
    /// Posture is slipping.
    Worried,
    /// Poor posture.
    Sad,
    /// Nobody is in front of the camera.
    Sleeping,
}

impl PetMood {
    /// Return the wire name of this mood.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Cheerful => "cheerful",
            Self::Happy => "happy",
            Self::Neutral => "neutral",
            Self::Worried => "worried",
            Self::Sad => "sad",
            Self::Sleeping => "sleeping",
        }
    }
}

/// Evolution stage of the pet, a step function of player level.
///
/// Variants are declared in ascending order so the derived [`Ord`] matches
/// evolutionary progression (`Egg < Baby < ... < Legendary`).
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[serde(rename_all = "kebab-case")]
#[ts(export, export_to = "bindings/")]
pub enum PetEvolution {
    /// Level 1.
    #[default]
    Egg,
    /// Levels 2--4.
    Baby,
    /// Levels 5--9.
    Juvenile,
    /// Levels 10--19.
    Adult,
    /// Levels 20--34.
    Master,
    /// Level 35 and above.
    Legendary,
}

impl PetEvolution {
    /// Return the wire name of this stage.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Egg => "egg",
            Self::Baby => "baby",
            Self::Juvenile => "juvenile",
            Self::Adult => "adult",
            Self::Master => "master",
            Self::Legendary => "legendary",
        }
    }
}

// ---------------------------------------------------------------------------
// Posture
// ---------------------------------------------------------------------------

/// Discrete posture category attached to every score.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[serde(rename_all = "kebab-case")]
#[ts(export, export_to = "bindings/")]
pub enum PostureStatus {
    /// Sitting close to the calibrated baseline.
    Good,
    /// Unrecognized signal; neutral default.
    #[default]
    Warning,
    /// Slouching away from the baseline.
    Bad,
    /// No baseline yet (calibration needed).
    Unknown,
}

// ---------------------------------------------------------------------------
// Quests
// ---------------------------------------------------------------------------

/// The kind of guided micro-exercise a quest represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "kebab-case")]
#[ts(export, export_to = "bindings/")]
pub enum QuestType {
    /// Short breathing plus shoulder reset.
    MicroBreak,
    /// Extended breathing exercise.
    Breathing,
    /// Stretch routines.
    Stretching,
    /// Full-body movement.
    Movement,
    /// Guided posture check.
    PostureCheck,
}

/// Quest difficulty tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "kebab-case")]
#[ts(export, export_to = "bindings/")]
pub enum QuestDifficulty {
    /// Beginner friendly.
    Easy,
    /// Intermediate.
    Medium,
    /// Advanced.
    Hard,
}

/// Condition attached to a quest's bonus multiplier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "kebab-case")]
#[ts(export, export_to = "bindings/")]
pub enum BonusType {
    /// Multiplier applies when every validated phase was passed perfectly.
    PerfectScore,
    /// Multiplier tied to completion speed.
    Speed,
    /// Multiplier tied to the player's streak.
    Streak,
}

// ---------------------------------------------------------------------------
// Achievements
// ---------------------------------------------------------------------------

/// Grouping used by the achievement gallery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "kebab-case")]
#[ts(export, export_to = "bindings/")]
pub enum AchievementCategory {
    /// Quest completion milestones.
    Quests,
    /// Consecutive-day streaks.
    Streaks,
    /// Posture quality milestones.
    Posture,
    /// Player level milestones.
    Milestones,
    /// Time-of-day and calendar specials.
    Special,
}

/// Rarity tier of an achievement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "kebab-case")]
#[ts(export, export_to = "bindings/")]
pub enum AchievementRarity {
    /// Most players unlock it.
    Common,
    /// Requires some dedication.
    Uncommon,
    /// Requires sustained effort.
    Rare,
    /// Requires long-term commitment.
    Epic,
    /// The hardest tier.
    Legendary,
}

/// The player statistic an achievement requirement is measured against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "kebab-case")]
#[ts(export, export_to = "bindings/")]
pub enum RequirementType {
    /// Total quests completed.
    QuestsCompleted,
    /// Current qualifying-day streak.
    Streak,
    /// Player level.
    Level,
    /// Hours of near-perfect posture (not evaluated by the engine).
    PerfectHour,
    /// Days with a near-perfect average (not evaluated by the engine).
    PerfectDay,
    /// Quests completed inside an hour-of-day window.
    QuestTime,
    /// Distinct weekend days with a completed quest.
    WeekendQuests,
}

impl RequirementType {
    /// Return the wire name of this requirement type.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::QuestsCompleted => "quests-completed",
            Self::Streak => "streak",
            Self::Level => "level",
            Self::PerfectHour => "perfect-hour",
            Self::PerfectDay => "perfect-day",
            Self::QuestTime => "quest-time",
            Self::WeekendQuests => "weekend-quests",
        }
    }
}

impl core::fmt::Display for RequirementType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn evolution_order_follows_progression() {
        assert!(PetEvolution::Egg < PetEvolution::Baby);
        assert!(PetEvolution::Adult < PetEvolution::Master);
        assert!(PetEvolution::Master < PetEvolution::Legendary);
    }

    #[test]
    fn enums_use_kebab_case_on_the_wire() {
        let quest = serde_json::to_string(&QuestType::MicroBreak).unwrap_or_default();
        assert_eq!(quest, "\"micro-break\"");
        let bonus = serde_json::to_string(&BonusType::PerfectScore).unwrap_or_default();
        assert_eq!(bonus, "\"perfect-score\"");
        let req = serde_json::to_string(&RequirementType::QuestsCompleted).unwrap_or_default();
        assert_eq!(req, "\"quests-completed\"");
    }

    #[test]
    fn requirement_as_str_matches_serde() {
        for req in [
            RequirementType::QuestsCompleted,
            RequirementType::Streak,
            RequirementType::Level,
            RequirementType::PerfectHour,
            RequirementType::PerfectDay,
            RequirementType::QuestTime,
            RequirementType::WeekendQuests,
        ] {
            let json = serde_json::to_string(&req).unwrap_or_default();
            assert_eq!(json, format!("\"{}\"", req.as_str()));
        }
    }

    #[test]
    fn mood_defaults_to_neutral() {
        assert_eq!(PetMood::default(), PetMood::Neutral);
        assert_eq!(PetMood::Sleeping.as_str(), "sleeping");
    }
}
