//! Error types for the mock-data crate.

use thiserror::Error;

/// Errors that can occur while generating mock records.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationError {
    /// The requested batch exceeds the supported maximum.
    #[error("requested batch of {requested} exceeds the maximum of {max}")]
    BatchTooLarge {
        /// Number of records requested by the caller.
        requested: usize,
        /// Largest batch the generator accepts.
        max: usize,
    },

    /// No unused email could be produced within the retry budget.
    #[error("failed to generate a unique email after {max_attempts} attempts")]
    EmailGenerationFailed {
        /// Number of attempts made before giving up.
        max_attempts: usize,
    },
}
