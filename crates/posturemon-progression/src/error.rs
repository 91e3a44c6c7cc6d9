//! Error types for the posturemon-progression crate.

/// Errors that can occur while applying progression rules.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProgressionError {
    /// A counter or curve computation overflowed.
    #[error("arithmetic overflow in progression: {context}")]
    ArithmeticOverflow {
        /// Description of what was being computed.
        context: String,
    },

    /// A configuration value cannot produce a valid level curve.
    #[error("invalid progression config: {reason}")]
    InvalidConfig {
        /// Description of the rejected value.
        reason: String,
    },
}

impl ProgressionError {
    /// Shorthand for an overflow with a static description.
    pub(crate) fn overflow(context: &str) -> Self {
        Self::ArithmeticOverflow {
            context: String::from(context),
        }
    }
}
