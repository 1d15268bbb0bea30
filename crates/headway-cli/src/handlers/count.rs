//! Count command handler.
//!
//! Runs a crew of workers to exhaustion against one shared counter and
//! displays the per-worker and aggregate results.

use anyhow::Result;

use headway_workers::{ProgressCounter, RunConfig, bridge};

use crate::presentation::{format_count, print_separator};

/// Execute the count command.
///
/// Spawns `workers` threads that each increment the shared counter
/// `budget` times, waits for all of them, and prints the exact total.
///
/// # Errors
///
/// This function will return an error if:
/// - A worker thread cannot be spawned or panics mid-run
pub async fn execute(workers: u32, budget: u64, json: bool) -> Result<()> {
    tracing::debug!(target: "headway.cli", workers, budget, "running count");

    let config = RunConfig::new(workers, budget);
    let report = bridge::run_crew(config, ProgressCounter::new()).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!(
        "Counting with {} worker(s), {} iteration(s) each:\n",
        workers,
        format_count(budget)
    );

    println!("{:<10} {:>14}  Outcome", "Worker", "Iterations");
    print_separator(34);
    for worker in &report.reports {
        println!(
            "{:<10} {:>14}  {}",
            worker.worker.to_string(),
            format_count(worker.iterations),
            worker.outcome
        );
    }
    print_separator(34);

    println!(
        "{:<10} {:>14}  in {} ms",
        "Total",
        format_count(report.final_total),
        report.elapsed_ms
    );

    Ok(())
}
