//! Identity and outcome types shared across the progress components.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Ordinal identity of a worker within a crew.
///
/// Ids are assigned densely from zero in spawn order, so an id doubles as an
/// index into the crew's reports.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WorkerId(u32);

impl WorkerId {
    /// Create an id from a crew index.
    #[must_use]
    pub const fn new(index: u32) -> Self {
        Self(index)
    }

    /// The crew index this id was assigned from.
    #[must_use]
    pub const fn index(self) -> u32 {
        self.0
    }

    /// Name for this worker's OS thread.
    #[must_use]
    pub fn thread_name(self) -> String {
        format!("headway-worker-{}", self.0)
    }
}

impl fmt::Display for WorkerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Terminal outcome of a worker's run.
///
/// Both outcomes are graceful: a cancelled worker stopped at an iteration
/// boundary and its partial progress remains in the counter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkerOutcome {
    /// The worker used its full iteration budget.
    Exhausted,
    /// The worker observed a cancellation request and stopped early.
    Cancelled,
}

impl WorkerOutcome {
    /// Convert to string representation for logs and reports.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Exhausted => "exhausted",
            Self::Cancelled => "cancelled",
        }
    }

    /// Parse from string representation.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s {
            "cancelled" => Self::Cancelled,
            // "exhausted" or unknown values default to Exhausted
            _ => Self::Exhausted,
        }
    }

    /// Check if the worker stopped because cancellation was requested.
    #[must_use]
    pub const fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}

impl fmt::Display for WorkerOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
