//! Command-line interface for the headway progress counter.
//!
//! The CLI is a thin layer: parsing lives in [`parser`] and [`commands`],
//! each subcommand has a handler module, and all counting semantics come
//! from `headway-core` and `headway-workers`.
#![deny(unused_crate_dependencies)]

// tracing_subscriber is wired up in main.rs
use tracing_subscriber as _;

pub mod commands;
pub mod handlers;
pub mod parser;
pub mod presentation;

// Re-export primary types for convenient access
pub use commands::Commands;
pub use parser::Cli;
