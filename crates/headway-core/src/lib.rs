//! Core progress-counter types and the completion contract for headway.
//!
//! Everything here is runtime-agnostic: plain threads, hardware atomics,
//! and a condition variable. Execution (workers, crews, observers) lives in
//! `headway-workers`; this crate owns the primitive and the vocabulary.
#![deny(unused_crate_dependencies)]

pub mod progress;

// Re-export commonly used types for convenience
pub use progress::{
    CompletionPolicy, CounterSnapshot, DEFAULT_BUDGET, DEFAULT_WORKERS, ProgressCounter,
    ProgressError, ProgressResult, RunConfig, WorkerId, WorkerOutcome,
};
