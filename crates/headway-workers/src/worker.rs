//! Worker iteration loop.
//!
//! A worker operates on a value type and a cloned counter handle, with no
//! references back to the crew's bookkeeping. It runs exactly once: `run`
//! consumes the worker, so a terminated worker cannot be restarted.
//!
//! # Design Principles
//!
//! - Cancellation is polled at the top of every iteration; a worker never
//!   blocks, so a cancel request is observed within one iteration.
//! - Stopping early is graceful: the loop exits at an iteration boundary
//!   and partial progress stays in the counter.
//! - Completion signaling happens after the loop, exhausted or cancelled
//!   alike, and only on the designated worker.

use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;

use headway_core::progress::{ProgressCounter, WorkerId, WorkerOutcome};

/// One crew member: identity, iteration budget, and signaling role.
///
/// This is a value type containing everything the iteration loop needs,
/// with no references back to the crew.
#[derive(Clone, Debug)]
pub struct Worker {
    /// This worker's identity within its crew.
    pub id: WorkerId,
    /// Maximum number of iterations to perform.
    pub budget: u64,
    /// Whether this worker marks the counter complete after its loop.
    pub signals_completion: bool,
}

impl Worker {
    /// Create a worker that does not signal completion.
    #[must_use]
    pub const fn new(id: WorkerId, budget: u64) -> Self {
        Self {
            id,
            budget,
            signals_completion: false,
        }
    }

    /// Make this worker the completion signaler.
    #[must_use]
    pub const fn signaling(mut self) -> Self {
        self.signals_completion = true;
        self
    }

    /// Run the iteration loop to a terminal outcome.
    ///
    /// Each iteration first polls the cancellation token and stops at the
    /// boundary if cancellation was requested; otherwise it records one
    /// unit on the counter. A designated signaler calls `mark_complete`
    /// after its loop regardless of how the loop ended.
    pub fn run(self, counter: &ProgressCounter, cancel: &CancellationToken) -> WorkerReport {
        let mut iterations = 0;
        let mut outcome = WorkerOutcome::Exhausted;
        while iterations < self.budget {
            if cancel.is_cancelled() {
                outcome = WorkerOutcome::Cancelled;
                break;
            }
            counter.increment();
            iterations += 1;
        }

        if self.signals_completion {
            // INVARIANT: the signal comes after this worker's own loop, so
            // its increments are visible to any waiter the signal wakes.
            counter.mark_complete();
        }

        tracing::debug!(
            target: "headway.worker",
            worker = %self.id,
            iterations,
            outcome = outcome.as_str(),
            "worker finished"
        );

        WorkerReport {
            worker: self.id,
            iterations,
            outcome,
        }
    }
}

/// Result of one worker's run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkerReport {
    /// The worker that produced this report.
    pub worker: WorkerId,
    /// Iterations actually performed. Equals this worker's contribution to
    /// the counter: at most the budget, less when cancelled early.
    pub iterations: u64,
    /// Why the loop ended.
    pub outcome: WorkerOutcome,
}
