//! Error types for the posturemon-core crate.

use posturemon_achievements::AchievementError;
use posturemon_progression::ProgressionError;
use posturemon_quests::QuestError;

use crate::snapshot::PersistError;

/// Errors returned by [`GameStore`](crate::store::GameStore) commands.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// A progression transition failed.
    #[error("progression error: {source}")]
    Progression {
        /// The underlying progression error.
        #[from]
        source: ProgressionError,
    },

    /// A quest lookup, gate, or session operation failed.
    #[error("quest error: {source}")]
    Quest {
        /// The underlying quest error.
        #[from]
        source: QuestError,
    },

    /// An achievement evaluation failed.
    #[error("achievement error: {source}")]
    Achievement {
        /// The underlying achievement error.
        #[from]
        source: AchievementError,
    },

    /// Reading or writing a snapshot failed.
    #[error("persistence error: {source}")]
    Persist {
        /// The underlying persistence error.
        #[from]
        source: PersistError,
    },

    /// The snapshot was written by a newer schema.
    #[error("unsupported snapshot version {found} (supported up to {supported})")]
    UnsupportedSnapshotVersion {
        /// Version found in the snapshot.
        found: u32,
        /// Highest version this build reads.
        supported: u32,
    },
}
