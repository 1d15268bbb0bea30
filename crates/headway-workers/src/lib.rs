//! Worker crews, observers, and async adapters over the headway counter.
//!
//! - `worker` - The single-run iteration loop
//! - `crew` - Spawning, cancelling, and joining a set of workers
//! - `observer` - Blocking wait-then-report, with optional live sampling
//! - `report` - The progress reporting seam (`cli` feature adds a terminal bar)
//! - `bridge` - `spawn_blocking` adapters for async callers
//! - `latency` - Bounded random delays for demos
#![deny(unused_crate_dependencies)]

pub mod bridge;
pub mod crew;
pub mod latency;
pub mod observer;
pub mod report;
pub mod worker;

// Re-export core types so downstream callers need one import root
pub use headway_core::progress::{
    CompletionPolicy, CounterSnapshot, ProgressCounter, ProgressError, ProgressResult, RunConfig,
    WorkerId, WorkerOutcome,
};

pub use crew::{Crew, CrewReport};
pub use observer::{DEFAULT_POLL_INTERVAL, Observer, ObserverHandle};
pub use report::{NoopReporter, ProgressReporter};
pub use worker::{Worker, WorkerReport};

#[cfg(feature = "cli")]
pub use report::bar::BarReporter;
