//! Cancel command handler.
//!
//! Lets a crew run for a while, requests cooperative cancellation, and
//! shows the partial progress every worker had banked at its stop point.

use std::time::Duration;

use anyhow::{Context, Result};

use headway_workers::{Crew, ProgressCounter, RunConfig};

use crate::presentation::{format_count, print_separator};

/// Execute the cancel command.
///
/// Without `--budget` the workers run unbounded, so cancellation is the
/// only way the run ends. Cancellation is observed at iteration
/// boundaries and never discards progress.
///
/// # Errors
///
/// This function will return an error if:
/// - A worker thread cannot be spawned or panics mid-run
pub async fn execute(workers: u32, budget: Option<u64>, after_ms: u64, json: bool) -> Result<()> {
    let budget = budget.unwrap_or(u64::MAX);
    let config = RunConfig::new(workers, budget);

    tracing::debug!(target: "headway.cli", workers, after_ms, "running cancel");

    let crew = Crew::spawn(config, ProgressCounter::new())?;
    tokio::time::sleep(Duration::from_millis(after_ms)).await;
    crew.cancel_all();

    let report = tokio::task::spawn_blocking(move || crew.join())
        .await
        .context("crew task failed")??;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("Cancelled {} worker(s) after {} ms:\n", workers, after_ms);

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
        "{} of {} worker(s) stopped on cancellation; partial total {}",
        report.cancelled_count(),
        report.reports.len(),
        format_count(report.final_total)
    );

    Ok(())
}
