//! Search control: stop flag and playout time budget.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

/// Controls when a search should stop.
///
/// The stop flag is checked between iterations of every nested level; once
/// set, each level returns the best result it has so far. The optional
/// playout budget truncates uniform playouts that run too long.
#[derive(Debug)]
pub struct SearchControl {
    stopped: Arc<AtomicBool>,
    playout_budget: Option<Duration>,
}

impl SearchControl {
    /// Create control with no playout budget.
    pub fn new(stopped: Arc<AtomicBool>) -> Self {
        Self {
            stopped,
            playout_budget: None,
        }
    }

    /// Create control with a fresh stop flag and no playout budget.
    pub fn unlimited() -> Self {
        Self::new(Arc::new(AtomicBool::new(false)))
    }

    /// Limit every uniform playout to `budget` of wall-clock time.
    pub fn with_playout_budget(mut self, budget: Duration) -> Self {
        self.playout_budget = Some(budget);
        self
    }

    /// The per-playout budget, if any.
    pub fn playout_budget(&self) -> Option<Duration> {
        self.playout_budget
    }

    /// Deadline for a playout starting now.
    pub fn playout_deadline(&self) -> Option<Instant> {
        self.playout_budget.map(|b| Instant::now() + b)
    }

    /// Return `true` once a stop has been requested.
    #[inline]
    pub fn should_stop(&self) -> bool {
        self.stopped.load(Ordering::Relaxed)
    }

    /// Request every search sharing this flag to wind down.
    pub fn stop(&self) {
        self.stopped.store(true, Ordering::Release);
    }

    /// Reference to the shared stop flag.
    pub fn stop_flag(&self) -> &Arc<AtomicBool> {
        &self.stopped
    }
}

impl Default for SearchControl {
    fn default() -> Self {
        Self::unlimited()
    }
}
