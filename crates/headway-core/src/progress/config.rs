//! Run configuration for a worker crew.

use serde::{Deserialize, Serialize};

use super::errors::ProgressError;
use super::types::WorkerId;

/// Default number of workers in a crew.
pub const DEFAULT_WORKERS: u32 = 2;

/// Default iteration budget per worker.
pub const DEFAULT_BUDGET: u64 = 1_000_000;

/// Which event marks the tracked work complete.
///
/// The counter itself only provides the one-shot transition; this policy
/// decides who performs it. Under [`Worker`], completion means "the
/// designated worker finished its own loop" and other workers may still be
/// running, so only the designated worker's increments are guaranteed
/// visible to a woken observer. Under [`AllWorkers`], completion means
/// every worker has finished and the whole total is exact at the wake.
///
/// [`Worker`]: Self::Worker
/// [`AllWorkers`]: Self::AllWorkers
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompletionPolicy {
    /// Nobody signals. The caller decides when the work is done, typically
    /// by joining the crew and then reading the total.
    #[default]
    Manual,
    /// The designated worker signals after its own loop, even if other
    /// workers are still running.
    Worker(WorkerId),
    /// The last worker to finish signals, so completion covers every
    /// worker's progress.
    AllWorkers,
}

impl CompletionPolicy {
    /// Whether `worker` is the designated signaler under this policy.
    #[must_use]
    pub const fn designates(self, worker: WorkerId) -> bool {
        match self {
            Self::Worker(w) => w.index() == worker.index(),
            Self::Manual | Self::AllWorkers => false,
        }
    }
}

/// Configuration for one crew run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunConfig {
    /// Number of workers to spawn. Zero is allowed; see
    /// [`CompletionPolicy::AllWorkers`] for what completion means then.
    pub workers: u32,
    /// Iteration budget for each worker.
    pub budget: u64,
    /// Which event marks the run complete.
    #[serde(default)]
    pub policy: CompletionPolicy,
}

impl RunConfig {
    /// Create a config with the [`CompletionPolicy::Manual`] policy.
    #[must_use]
    pub const fn new(workers: u32, budget: u64) -> Self {
        Self {
            workers,
            budget,
            policy: CompletionPolicy::Manual,
        }
    }

    /// Replace the completion policy.
    #[must_use]
    pub const fn with_policy(mut self, policy: CompletionPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Validate the configuration.
    ///
    /// A designated signaling worker must exist in the crew.
    pub fn validate(&self) -> Result<(), ProgressError> {
        if let CompletionPolicy::Worker(id) = self.policy {
            if id.index() >= self.workers {
                return Err(ProgressError::invalid_config(format!(
                    "signaling worker {id} does not exist (crew size {})",
                    self.workers
                )));
            }
        }
        Ok(())
    }
}

impl Default for RunConfig {
    fn default() -> Self {
        Self::new(DEFAULT_WORKERS, DEFAULT_BUDGET)
    }
}
