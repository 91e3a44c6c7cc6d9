//! Error types for the posturemon-achievements crate.

use posturemon_types::{AchievementId, RequirementType};

/// Errors that can occur during achievement evaluation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AchievementError {
    /// No achievement with the given id exists in the catalog.
    #[error("achievement not found: {0}")]
    NotFound(AchievementId),

    /// Two definitions share the same id.
    #[error("duplicate achievement id: {0}")]
    DuplicateAchievement(AchievementId),

    /// The achievement measures a statistic the tracker cannot observe.
    #[error("achievement {achievement_id} uses unsupported requirement {requirement_type}")]
    UnsupportedRequirement {
        /// The achievement that cannot be evaluated.
        achievement_id: AchievementId,
        /// Its requirement type.
        requirement_type: RequirementType,
    },
}
