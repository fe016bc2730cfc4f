//! Observer error types.

use thiserror::Error;

/// Errors an [`Observer`](crate::observe::Observer) may report.
///
/// The engine logs and drops these; they never change a transition's outcome.
#[derive(Debug, Error)]
pub enum ObserveError {
    /// The observer's internal buffer lock was poisoned by a panicking writer
    #[error("Observer buffer poisoned")]
    Poisoned,

    /// Trace events could not be encoded
    #[error("Trace encoding failed: {0}")]
    Encoding(#[from] serde_json::Error),

    /// Observer-specific failure
    #[error("Observer failed: {0}")]
    Failed(String),
}
