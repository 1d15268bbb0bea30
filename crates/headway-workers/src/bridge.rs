//! Async adapters over the blocking primitives.
//!
//! The counter's wait and the crew's join block the calling thread. These
//! adapters move them onto tokio's blocking pool so async callers can
//! await them without stalling a runtime worker.

use headway_core::progress::{ProgressCounter, ProgressError, ProgressResult, RunConfig};

use crate::crew::{Crew, CrewReport};

/// Resolve once `counter` signals completion, yielding the final total.
pub async fn completion(counter: ProgressCounter) -> ProgressResult<u64> {
    tokio::task::spawn_blocking(move || {
        counter.await_completion();
        counter.total()
    })
    .await
    .map_err(|e| ProgressError::other(format!("completion wait failed: {e}")))
}

/// Run a whole crew to completion off the async runtime.
///
/// Spawns and joins on the blocking pool. Mid-run cancellation needs the
/// sync API, where the crew handle stays accessible.
pub async fn run_crew(config: RunConfig, counter: ProgressCounter) -> ProgressResult<CrewReport> {
    tokio::task::spawn_blocking(move || Crew::spawn(config, counter)?.join())
        .await
        .map_err(|e| ProgressError::other(format!("crew task failed: {e}")))?
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;
    use std::time::Duration;

    #[tokio::test]
    async fn completion_resolves_with_final_total() {
        let counter = ProgressCounter::new();
        let signaler = counter.clone();

        thread::spawn(move || {
            thread::sleep(Duration::from_millis(20));
            signaler.add(9);
            signaler.mark_complete();
        });

        assert_eq!(completion(counter).await.unwrap(), 9);
    }

    #[tokio::test]
    async fn run_crew_matches_the_sync_path() {
        let report = run_crew(RunConfig::new(3, 10_000), ProgressCounter::new())
            .await
            .unwrap();
        assert_eq!(report.final_total, 30_000);
        assert_eq!(report.total_iterations(), 30_000);
    }

    #[tokio::test]
    async fn run_crew_surfaces_config_errors() {
        use headway_core::progress::{CompletionPolicy, WorkerId};

        let config = RunConfig::new(1, 10).with_policy(CompletionPolicy::Worker(WorkerId::new(9)));
        let err = run_crew(config, ProgressCounter::new()).await.unwrap_err();
        assert!(err.is_config());
    }
}
