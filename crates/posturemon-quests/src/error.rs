//! Error types for the posturemon-quests crate.

use posturemon_types::QuestId;

/// Errors that can occur during quest operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QuestError {
    /// No quest with the given id exists in the catalog.
    #[error("quest not found: {0}")]
    NotFound(QuestId),

    /// Two definitions share the same id.
    #[error("duplicate quest id: {0}")]
    DuplicateQuest(QuestId),

    /// The player does not meet the quest's requirements.
    #[error("quest {quest_id} not available: {reason}")]
    NotEligible {
        /// The rejected quest.
        quest_id: QuestId,
        /// Which requirement failed.
        reason: String,
    },

    /// An operation needed an active quest but none is running.
    #[error("no active quest")]
    NoActiveQuest,

    /// A quest was started while another is still running.
    #[error("quest already active: {0}")]
    AlreadyActive(QuestId),
}
