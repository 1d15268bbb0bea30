//! Crew coordination: spawn, cancel, join.
//!
//! The crew owns the OS threads its workers run on plus the cancellation
//! plumbing. The iteration loop itself lives in [`crate::worker`]; the crew
//! only binds workers to the shared counter and applies the completion
//! policy.
//!
//! # Concurrency Model
//!
//! - One named OS thread per worker. The crew handle stays on the caller's
//!   thread and never blocks until `join`.
//! - A crew-wide parent token fans out to one child token per worker, so
//!   either a single worker or the whole crew can be cancelled.
//! - Under [`CompletionPolicy::AllWorkers`] the threads share a remaining
//!   count and the thread that decrements it to zero performs the
//!   completion transition. The decrement is acquire/release, so every
//!   worker's increments happen before the transition.

use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};
use std::thread::{self, JoinHandle};
use std::time::Instant;

use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;

use headway_core::progress::{
    CompletionPolicy, ProgressCounter, ProgressError, ProgressResult, RunConfig, WorkerId,
};

use crate::worker::{Worker, WorkerReport};

/// A running crew of workers bound to one counter.
///
/// Dropping a crew without calling [`join`] cancels the run and joins the
/// threads, discarding their reports. Use [`join`] to collect them.
///
/// [`join`]: Self::join
#[derive(Debug)]
pub struct Crew {
    counter: ProgressCounter,
    cancel: CancellationToken,
    members: Vec<CrewMember>,
    started: Instant,
}

#[derive(Debug)]
struct CrewMember {
    id: WorkerId,
    cancel: CancellationToken,
    handle: JoinHandle<WorkerReport>,
}

impl Crew {
    /// Validate `config` and start one OS thread per worker.
    ///
    /// Worker threads begin iterating immediately. With zero workers and
    /// the [`CompletionPolicy::AllWorkers`] policy the run is vacuously
    /// complete, so the counter is marked at spawn. If the host refuses a
    /// thread partway through, the workers already started are cancelled
    /// and the spawn error is returned.
    pub fn spawn(config: RunConfig, counter: ProgressCounter) -> ProgressResult<Self> {
        config.validate()?;

        let started = Instant::now();
        let cancel = CancellationToken::new();
        let remaining = match config.policy {
            CompletionPolicy::AllWorkers => {
                if config.workers == 0 {
                    counter.mark_complete();
                }
                Some(Arc::new(AtomicU32::new(config.workers)))
            }
            CompletionPolicy::Manual | CompletionPolicy::Worker(_) => None,
        };

        let mut members = Vec::with_capacity(config.workers as usize);
        for index in 0..config.workers {
            let id = WorkerId::new(index);
            let worker = if config.policy.designates(id) {
                Worker::new(id, config.budget).signaling()
            } else {
                Worker::new(id, config.budget)
            };

            let child = cancel.child_token();
            let thread_counter = counter.clone();
            let thread_cancel = child.clone();
            let thread_remaining = remaining.clone();

            let spawned = thread::Builder::new().name(id.thread_name()).spawn(move || {
                let report = worker.run(&thread_counter, &thread_cancel);
                if let Some(remaining) = thread_remaining {
                    // INVARIANT: AcqRel chains the exits, so the last
                    // thread out sees every earlier worker's increments
                    // before it marks the counter complete.
                    if remaining.fetch_sub(1, Ordering::AcqRel) == 1 {
                        thread_counter.mark_complete();
                    }
                }
                report
            });

            let handle = match spawned {
                Ok(handle) => handle,
                Err(e) => {
                    cancel.cancel();
                    return Err(ProgressError::spawn(id, e.to_string()));
                }
            };

            members.push(CrewMember {
                id,
                cancel: child,
                handle,
            });
        }

        tracing::debug!(
            target: "headway.crew",
            workers = config.workers,
            budget = config.budget,
            policy = ?config.policy,
            "crew started"
        );

        Ok(Self {
            counter,
            cancel,
            members,
            started,
        })
    }

    /// The counter this crew mutates.
    #[must_use]
    pub const fn counter(&self) -> &ProgressCounter {
        &self.counter
    }

    /// Number of workers in the crew.
    #[must_use]
    pub fn size(&self) -> usize {
        self.members.len()
    }

    /// Request cancellation of every worker.
    ///
    /// Cancellation is cooperative: each worker honors it at its next
    /// iteration boundary. Partial progress stays in the counter.
    pub fn cancel_all(&self) {
        tracing::debug!(target: "headway.crew", "cancelling all workers");
        self.cancel.cancel();
    }

    /// Request cancellation of a single worker.
    ///
    /// Returns whether the crew has a worker with this id.
    pub fn cancel_worker(&self, id: WorkerId) -> bool {
        match self.members.iter().find(|m| m.id == id) {
            Some(member) => {
                tracing::debug!(target: "headway.crew", worker = %id, "cancelling worker");
                member.cancel.cancel();
                true
            }
            None => false,
        }
    }

    /// Wait for every worker to finish and collect their reports.
    ///
    /// A panicked worker thread surfaces as
    /// [`ProgressError::WorkerPanicked`]. The final total is read after the
    /// last join, when the mutating side has quiesced, so it is exact
    /// whenever this crew is the counter's only mutator.
    pub fn join(mut self) -> ProgressResult<CrewReport> {
        let members = std::mem::take(&mut self.members);
        let mut reports = Vec::with_capacity(members.len());
        for member in members {
            let report = member
                .handle
                .join()
                .map_err(|_| ProgressError::worker_panicked(member.id))?;
            reports.push(report);
        }

        let report = CrewReport {
            reports,
            final_total: self.counter.total(),
            complete: self.counter.is_complete(),
            elapsed_ms: u64::try_from(self.started.elapsed().as_millis()).unwrap_or(u64::MAX),
        };

        tracing::debug!(
            target: "headway.crew",
            total = report.final_total,
            elapsed_ms = report.elapsed_ms,
            "crew joined"
        );

        Ok(report)
    }
}

impl Drop for Crew {
    fn drop(&mut self) {
        // An abandoned crew must not leave threads spinning. Workers
        // observe the cancel within one iteration, so these joins are
        // short.
        self.cancel.cancel();
        for member in self.members.drain(..) {
            let _ = member.handle.join();
        }
    }
}

/// Aggregate result of a crew run.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrewReport {
    /// Per-worker reports in spawn order.
    pub reports: Vec<WorkerReport>,
    /// Counter total read after the last worker was joined.
    pub final_total: u64,
    /// Whether completion had been signaled by the time of the join.
    pub complete: bool,
    /// Wall-clock duration of the run in milliseconds.
    pub elapsed_ms: u64,
}

impl CrewReport {
    /// Sum of iterations across all workers.
    #[must_use]
    pub fn total_iterations(&self) -> u64 {
        self.reports.iter().map(|r| r.iterations).sum()
    }

    /// Number of workers that stopped because of cancellation.
    #[must_use]
    pub fn cancelled_count(&self) -> usize {
        self.reports
            .iter()
            .filter(|r| r.outcome.is_cancelled())
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use headway_core::progress::WorkerOutcome;
    use std::thread;

    #[test]
    fn crew_counts_exactly_workers_times_budget() {
        let counter = ProgressCounter::new();
        let crew = Crew::spawn(RunConfig::new(4, 25_000), counter.clone()).unwrap();
        assert_eq!(crew.size(), 4);

        let report = crew.join().unwrap();
        assert_eq!(report.final_total, 100_000);
        assert_eq!(report.total_iterations(), 100_000);
        assert_eq!(report.cancelled_count(), 0);
        assert!(!report.complete);
        assert_eq!(counter.total(), 100_000);
    }

    #[test]
    fn zero_workers_join_immediately() {
        let report = Crew::spawn(RunConfig::new(0, 1_000), ProgressCounter::new())
            .unwrap()
            .join()
            .unwrap();
        assert!(report.reports.is_empty());
        assert_eq!(report.final_total, 0);
        assert!(!report.complete);
    }

    #[test]
    fn spawn_rejects_invalid_config() {
        let config =
            RunConfig::new(2, 10).with_policy(CompletionPolicy::Worker(WorkerId::new(2)));
        let err = Crew::spawn(config, ProgressCounter::new()).unwrap_err();
        assert!(err.is_config());
    }

    // ====== Completion Policy Tests ======

    #[test]
    fn designated_worker_signals_completion() {
        let counter = ProgressCounter::new();
        let config = RunConfig::new(3, 5_000).with_policy(CompletionPolicy::Worker(WorkerId::new(1)));

        let report = Crew::spawn(config, counter.clone()).unwrap().join().unwrap();
        assert!(report.complete);
        assert!(counter.is_complete());
        assert_eq!(report.reports[1].worker, WorkerId::new(1));
    }

    #[test]
    fn all_workers_policy_completes_after_every_worker() {
        let counter = ProgressCounter::new();
        let config = RunConfig::new(8, 10_000).with_policy(CompletionPolicy::AllWorkers);

        Crew::spawn(config, counter.clone()).unwrap().join().unwrap();
        assert!(counter.is_complete());
        // The transition happens after the last exit, so a post-completion
        // read covers the whole crew.
        counter.await_completion();
        assert_eq!(counter.total(), 80_000);
    }

    #[test]
    fn zero_workers_all_policy_completes_at_spawn() {
        let counter = ProgressCounter::new();
        let config = RunConfig::new(0, 1_000).with_policy(CompletionPolicy::AllWorkers);

        let crew = Crew::spawn(config, counter.clone()).unwrap();
        assert!(counter.is_complete());
        let report = crew.join().unwrap();
        assert!(report.complete);
        assert_eq!(report.final_total, 0);
    }

    // ====== Cancellation Tests ======

    #[test]
    fn cancel_all_stops_every_worker() {
        let counter = ProgressCounter::new();
        let crew = Crew::spawn(RunConfig::new(3, u64::MAX), counter.clone()).unwrap();

        while counter.total() < 30_000 {
            thread::yield_now();
        }
        crew.cancel_all();
        let report = crew.join().unwrap();

        assert_eq!(report.cancelled_count(), 3);
        // Nothing lost, nothing counted past the boundary.
        assert_eq!(report.total_iterations(), report.final_total);
    }

    #[test]
    fn cancel_worker_targets_one_member() {
        let counter = ProgressCounter::new();
        let crew = Crew::spawn(RunConfig::new(2, u64::MAX), counter.clone()).unwrap();

        assert!(!crew.cancel_worker(WorkerId::new(5)));
        assert!(crew.cancel_worker(WorkerId::new(0)));

        while !crew.members[0].handle.is_finished() {
            thread::yield_now();
        }
        // The sibling keeps running on its own child token.
        assert!(!crew.members[1].handle.is_finished());

        crew.cancel_all();
        let report = crew.join().unwrap();
        assert_eq!(report.reports[0].outcome, WorkerOutcome::Cancelled);
        assert_eq!(report.reports[1].outcome, WorkerOutcome::Cancelled);
        assert_eq!(report.total_iterations(), report.final_total);
    }

    #[test]
    fn dropped_crew_cancels_and_joins() {
        let counter = ProgressCounter::new();
        let crew = Crew::spawn(RunConfig::new(2, u64::MAX), counter.clone()).unwrap();

        while counter.total() < 1_000 {
            thread::yield_now();
        }
        drop(crew);

        // Drop joined the threads, so the total is frozen.
        let settled = counter.total();
        thread::sleep(std::time::Duration::from_millis(20));
        assert_eq!(counter.total(), settled);
    }

    #[test]
    fn test_crew_report_serialization() {
        let report = CrewReport {
            reports: vec![WorkerReport {
                worker: WorkerId::new(0),
                iterations: 7,
                outcome: WorkerOutcome::Exhausted,
            }],
            final_total: 7,
            complete: true,
            elapsed_ms: 12,
        };
        let json = serde_json::to_string(&report).unwrap();
        let parsed: CrewReport = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, report);
    }
}
