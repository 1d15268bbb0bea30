//! Observe command handler.
//!
//! Runs a crew while a blocking observer waits on the completion signal,
//! sampling interim totals into a terminal progress bar. Shows the
//! difference between the total at signal time and the total after the
//! full join.

use std::sync::Arc;

use anyhow::{Context, Result};

use headway_workers::{
    BarReporter, CompletionPolicy, DEFAULT_POLL_INTERVAL, Observer, ProgressCounter, RunConfig,
    WorkerId, bridge,
};

use crate::presentation::{format_count, print_separator};

/// Execute the observe command.
///
/// The completion policy comes from the flags: `--all-workers` signals
/// after the whole crew is done, `--signaler N` lets worker N signal when
/// its own loop finishes, and the default is worker 0. Under a
/// single-worker signal the other workers may still be counting when the
/// observer wakes, so the observed total can trail the joined total.
///
/// # Errors
///
/// This function will return an error if:
/// - The configured signaler does not exist in the crew
/// - A worker or observer thread cannot be spawned or panics
pub async fn execute(
    workers: u32,
    budget: u64,
    signaler: Option<u32>,
    all_workers: bool,
    json: bool,
) -> Result<()> {
    let policy = if all_workers {
        CompletionPolicy::AllWorkers
    } else {
        CompletionPolicy::Worker(WorkerId::new(signaler.unwrap_or(0)))
    };
    let config = RunConfig::new(workers, budget).with_policy(policy);
    let expected = u64::from(workers).saturating_mul(budget);

    tracing::debug!(target: "headway.cli", workers, budget, policy = ?policy, "running observe");

    let counter = ProgressCounter::new();
    let observer = if json {
        // No terminal bar in JSON mode; the observer still blocks on the
        // completion signal.
        Observer::new(counter.clone())
    } else {
        let bar = Arc::new(BarReporter::new(expected));
        Observer::with_reporter(counter.clone(), bar, DEFAULT_POLL_INTERVAL)
    };
    let handle = observer.spawn()?;

    let report = bridge::run_crew(config, counter).await?;
    let observed = tokio::task::spawn_blocking(move || handle.join())
        .await
        .context("observer task failed")??;

    if json {
        let value = serde_json::json!({
            "observed_total": observed,
            "report": report,
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    println!();
    println!("{:<22} {:>14}", "Observed at signal", format_count(observed));
    println!(
        "{:<22} {:>14}",
        "Final after join",
        format_count(report.final_total)
    );
    print_separator(37);

    if observed < report.final_total {
        println!(
            "The crew kept counting after the signal: {} more iteration(s).",
            format_count(report.final_total - observed)
        );
    } else {
        println!("The signal covered the whole run.");
    }
    println!("Elapsed: {} ms", report.elapsed_ms);

    Ok(())
}
