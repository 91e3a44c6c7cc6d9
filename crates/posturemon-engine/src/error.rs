//! Error types for the engine binary.
//!
//! [`EngineError`] is the top-level error type that wraps all possible
//! failure modes during startup, intake, and shutdown.

/// Top-level error for the engine binary.
///
/// Each variant wraps a specific subsystem error, providing a single
/// error type that `main` can propagate with `?`.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: posturemon_core::ConfigError,
    },

    /// Restoring the game store failed.
    #[error("store error: {source}")]
    Core {
        /// The underlying store error.
        #[from]
        source: posturemon_core::CoreError,
    },

    /// Loading or saving the snapshot failed.
    #[error("snapshot error: {source}")]
    Persist {
        /// The underlying persistence error.
        #[from]
        source: posturemon_core::PersistError,
    },

    /// Reading input or writing the report failed.
    #[error("I/O error: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// The final report could not be encoded.
    #[error("report encoding failed: {source}")]
    Report {
        /// The underlying JSON error.
        #[from]
        source: serde_json::Error,
    },
}
