//! Achievements for the Posturemon progression engine.
//!
//! # Modules
//!
//! - [`catalog`] -- Read-only achievement definitions and the stock set
//! - [`tracker`] -- Per-user progress and unlock evaluation
//! - [`error`] -- Error types

pub mod catalog;
pub mod error;
pub mod tracker;

pub use catalog::AchievementCatalog;
pub use error::AchievementError;
pub use tracker::{AchievementTracker, AchievementView, UnlockedAchievement, is_supported};
