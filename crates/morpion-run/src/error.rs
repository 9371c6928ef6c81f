//! Run-level errors.

use morpion_core::GridError;
use morpion_search::SearchError;

/// Errors that end a run.
#[derive(Debug, thiserror::Error)]
pub enum RunError {
    /// A configuration value is out of range.
    #[error("invalid configuration: {reason}")]
    InvalidConfig {
        /// What is wrong.
        reason: String,
    },

    /// An algorithm name could not be parsed.
    #[error("unknown algorithm: {name} (expected nrpa or nmcs)")]
    UnknownAlgorithm {
        /// The name that failed to parse.
        name: String,
    },

    /// The search aborted.
    #[error(transparent)]
    Search(#[from] SearchError),

    /// Re-anchoring on the best game failed.
    #[error(transparent)]
    Grid(#[from] GridError),
}
