//! Progression rules for the Posturemon progression engine.
//!
//! Everything here is a pure transition over [`PlayerStats`] and
//! [`PetState`]: the level curve, pet evolution, XP and quest awards,
//! pet gauges, and the daily good-posture streak.
//!
//! # Modules
//!
//! - [`config`] -- Tunable progression parameters
//! - [`curve`] -- Geometric level curve with exact thresholds
//! - [`evolution`] -- Level to evolution stage table
//! - [`pet`] -- Pet construction and gauge helpers
//! - [`player`] -- XP, quest completion, and streak transitions
//! - [`streak`] -- Per-day good-posture tally
//! - [`activity`] -- Time-of-day and weekend completion record
//! - [`error`] -- Error types
//!
//! [`PlayerStats`]: posturemon_types::PlayerStats
//! [`PetState`]: posturemon_types::PetState

pub mod activity;
pub mod config;
pub mod curve;
pub mod error;
pub mod evolution;
pub mod pet;
pub mod player;
pub mod streak;

pub use config::ProgressionConfig;
pub use curve::{
    cumulative_xp_for_level, level_from_total_xp, progress_to_next, xp_into_level,
    xp_required_for_level, xp_to_next_level,
};
pub use error::ProgressionError;
pub use evolution::{EVOLUTION_STAGES, EvolutionStage, evolution_for_level};
pub use player::{
    LevelMismatch, LevelUp, QuestCompletion, add_xp, complete_quest, increment_streak,
    reset_streak, verify_consistency,
};
pub use streak::{QualifiedDay, StreakTracker};
