//! Main commands enum and primary subcommands.
//!
//! This module defines the available commands for the CLI tool.

use clap::Subcommand;

use headway_core::{DEFAULT_BUDGET, DEFAULT_WORKERS};

/// Available commands for the headway counting demos.
///
/// Each command runs one scenario against a shared progress counter:
/// exact counting, completion signaling with a live observer, cooperative
/// cancellation, or concurrent quote fetching with a deadline.
#[derive(Subcommand)]
pub enum Commands {
    /// Run a crew of counting workers to exhaustion and report the total
    Count {
        /// Number of workers in the crew
        #[arg(short, long, env = "HEADWAY_WORKERS", default_value_t = DEFAULT_WORKERS)]
        workers: u32,
        /// Iterations each worker performs
        #[arg(short, long, env = "HEADWAY_BUDGET", default_value_t = DEFAULT_BUDGET)]
        budget: u64,
    },

    /// Watch a run through a blocking observer with a progress bar
    Observe {
        /// Number of workers in the crew
        #[arg(short, long, env = "HEADWAY_WORKERS", default_value_t = DEFAULT_WORKERS)]
        workers: u32,
        /// Iterations each worker performs
        #[arg(short, long, env = "HEADWAY_BUDGET", default_value_t = DEFAULT_BUDGET)]
        budget: u64,
        /// Index of the worker that signals completion (defaults to 0)
        #[arg(long, conflicts_with = "all_workers")]
        signaler: Option<u32>,
        /// Signal completion only after every worker has finished
        #[arg(long)]
        all_workers: bool,
    },

    /// Cancel a crew mid-run and report the partial progress it kept
    Cancel {
        /// Number of workers in the crew
        #[arg(short, long, env = "HEADWAY_WORKERS", default_value_t = DEFAULT_WORKERS)]
        workers: u32,
        /// Iteration budget per worker (unbounded when omitted)
        #[arg(long)]
        budget: Option<u64>,
        /// Milliseconds to let the crew run before cancelling
        #[arg(long, default_value_t = 250)]
        after_ms: u64,
    },

    /// Fetch simulated price quotes concurrently and pick the best one
    Quotes {
        /// Number of quote sources to query
        #[arg(short, long, default_value_t = 5)]
        sources: u32,
        /// Minimum simulated latency per source in milliseconds
        #[arg(long, default_value_t = 500)]
        min_ms: u64,
        /// Maximum simulated latency per source in milliseconds
        #[arg(long, default_value_t = 4500)]
        max_ms: u64,
        /// Deadline after which a source is counted as timed out
        #[arg(long, default_value_t = 4000)]
        timeout_ms: u64,
    },
}
