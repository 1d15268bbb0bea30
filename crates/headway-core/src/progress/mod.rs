//! Progress domain types: the shared counter, run configuration, and errors.
//!
//! This module contains the synchronization primitive and pure data types
//! for the progress system. No I/O or runtime dependencies allowed; the
//! counter itself is the only place that blocks, and only in its explicit
//! waiting operations.
//!
//! # Structure
//!
//! - `counter` - The shared counter and completion signal (`ProgressCounter`)
//! - `config` - Crew run configuration (`RunConfig`, `CompletionPolicy`)
//! - `types` - Identity and outcome types (`WorkerId`, `WorkerOutcome`)
//! - `errors` - Error types for crew and observer operations

pub mod config;
pub mod counter;
pub mod errors;
pub mod types;

// Re-export commonly used types
pub use config::{CompletionPolicy, DEFAULT_BUDGET, DEFAULT_WORKERS, RunConfig};
pub use counter::{CounterSnapshot, ProgressCounter};
pub use errors::{ProgressError, ProgressResult};
pub use types::{WorkerId, WorkerOutcome};
