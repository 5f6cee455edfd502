//! Cooperative cancellation flag.
//!
//! Every blocking point in the crate (action wait, freeze wait, resume
//! wait, submission poll, generator backpressure) checks this flag on a
//! short cadence so all threads unwind promptly when the game stops.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Shared stop flag, cheap to clone into every thread.
///
/// Setting it is idempotent and one-way: a stopped game never resumes.
#[derive(Clone, Debug, Default)]
pub struct StopFlag(Arc<AtomicBool>);

impl StopFlag {
    /// Create a new, unset flag.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Request that all game threads stop.
    pub fn set(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    /// Check whether a stop has been requested.
    #[must_use]
    pub fn is_set(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}
