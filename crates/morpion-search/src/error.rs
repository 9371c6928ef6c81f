//! Search error types.

use morpion_core::GridError;

/// Errors that abort a search.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SearchError {
    /// The legality engine reported a broken invariant.
    #[error(transparent)]
    Grid(#[from] GridError),
    /// Weighted selection found no candidate for the drawn number, which
    /// happens when the weights overflow or vanish.
    #[error("selection exhausted: draw {draw} over {candidates} candidates with total weight {total}")]
    SelectionExhausted {
        /// The uniform draw in `[0, 1)`.
        draw: f64,
        /// Number of candidates.
        candidates: usize,
        /// Sum of the scaled weights.
        total: f64,
    },
    /// A rollout worker thread panicked.
    #[error("rollout worker {iteration} panicked")]
    WorkerPanicked {
        /// Iteration the worker was running.
        iteration: usize,
    },
}
