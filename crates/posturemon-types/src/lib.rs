//! Shared type definitions for the Posturemon progression engine.
//!
//! This crate is the single source of truth for the data model shared by
//! the scoring, progression, quest, and achievement crates. Types flow to
//! `TypeScript` via `ts-rs` for the web client that renders them.
//!
//! # Modules
//!
//! - [`ids`] -- UUID and slug identifier newtypes
//! - [`enums`] -- Moods, evolution stages, quest and achievement enums
//! - [`structs`] -- Player stats, pet state, posture scores and readings
//! - [`catalog`] -- Read-only quest and achievement definitions
//! - [`records`] -- Per-user progress records and the persisted snapshot

pub mod catalog;
pub mod enums;
pub mod ids;
pub mod records;
pub mod structs;

// Re-export all public types at crate root for convenience.
pub use catalog::{
    AchievementDefinition, AchievementRequirement, AchievementRewards, HourWindow, QuestBonus,
    QuestDefinition, QuestPhase, QuestRequirements, QuestRewards, ValidationCriteria,
};
pub use enums::{
    AchievementCategory, AchievementRarity, BonusType, PetEvolution, PetMood, PostureStatus,
    QuestDifficulty, QuestType, RequirementType,
};
pub use ids::{AchievementId, PetId, QuestId, UserId};
pub use records::{
    AchievementProgress, GameSnapshot, QuestRecord, SNAPSHOT_VERSION, StreakState,
};
pub use structs::{
    PetState, PlayerStats, PostureReading, PostureScore, PostureSnapshot, PostureWeights,
    QuestActivity, ScoreBreakdown, WeekendCoverage,
};
