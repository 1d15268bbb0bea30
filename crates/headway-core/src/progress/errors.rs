//! Progress run error types.
//!
//! Thread-spawn failures capture the host's message as a string, keeping
//! every variant serializable.
//!
//! Cancellation is absent: a cancelled worker is a normal early exit
//! (`WorkerOutcome::Cancelled`), not a failure.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::types::WorkerId;

/// Error type for crew and observer operations.
///
/// Designed to be serializable across process boundaries (CLI `--json`
/// output, structured logs) without depending on non-serializable types like
/// `std::io::Error`.
#[derive(Clone, Debug, Error, Serialize, Deserialize, PartialEq, Eq)]
pub enum ProgressError {
    /// The host refused to allocate an OS thread for a worker.
    #[error("failed to spawn worker {worker}: {message}")]
    Spawn {
        /// Worker whose thread could not be created.
        worker: WorkerId,
        /// Detailed error message from the host.
        message: String,
    },

    /// A worker thread panicked before producing its report.
    #[error("worker {worker} panicked")]
    WorkerPanicked {
        /// Worker whose thread terminated abnormally.
        worker: WorkerId,
    },

    /// An observer thread panicked before reporting a final total.
    #[error("observer panicked")]
    ObserverPanicked,

    /// Run configuration failed validation.
    #[error("invalid configuration: {message}")]
    InvalidConfig {
        /// What was wrong with the configuration.
        message: String,
    },

    /// General/uncategorized error.
    #[error("{message}")]
    Other {
        /// Error message.
        message: String,
    },
}

impl ProgressError {
    /// Create a spawn error for a worker.
    pub fn spawn(worker: WorkerId, message: impl Into<String>) -> Self {
        Self::Spawn {
            worker,
            message: message.into(),
        }
    }

    /// Create a worker panic error.
    #[must_use]
    pub const fn worker_panicked(worker: WorkerId) -> Self {
        Self::WorkerPanicked { worker }
    }

    /// Create an invalid configuration error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Create a generic error.
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other {
            message: message.into(),
        }
    }

    /// Check if this error came from a panicked thread.
    #[must_use]
    pub const fn is_panic(&self) -> bool {
        matches!(self, Self::WorkerPanicked { .. } | Self::ObserverPanicked)
    }

    /// Check if this error is a configuration problem.
    #[must_use]
    pub const fn is_config(&self) -> bool {
        matches!(self, Self::InvalidConfig { .. })
    }

    /// Convert to a user-friendly message.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Spawn { worker, message } => {
                format!("Could not start worker {worker}: {message}")
            }
            Self::WorkerPanicked { worker } => {
                format!("Worker {worker} crashed. Its progress up to the crash is still counted.")
            }
            Self::ObserverPanicked => "The observer crashed before reporting.".to_string(),
            Self::InvalidConfig { message } => format!("Invalid configuration: {message}"),
            Self::Other { message } => message.clone(),
        }
    }
}

/// Convenience result type for progress operations.
pub type ProgressResult<T> = Result<T, ProgressError>;
