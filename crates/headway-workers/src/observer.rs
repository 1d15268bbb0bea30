//! Blocking observer over a shared counter.
//!
//! The observer is the only blocking party in the system. Its wait is the
//! counter's predicate loop: a wake is trusted only once the completion
//! flag reads true, so spurious wakeups cannot produce a premature read,
//! and the final total is read strictly after completion is observed.

use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use headway_core::progress::{ProgressCounter, ProgressError, ProgressResult};

use crate::report::{NoopReporter, ProgressReporter};

/// Default sampling interval for interim progress reports.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Waits for a counter's completion signal, then reports the final total.
pub struct Observer {
    counter: ProgressCounter,
    reporter: Arc<dyn ProgressReporter>,
    poll_interval: Option<Duration>,
}

impl Observer {
    /// Observer that waits silently.
    ///
    /// Without a reporter there is nothing to sample, so the wait parks
    /// until the completion wake and never polls.
    #[must_use]
    pub fn new(counter: ProgressCounter) -> Self {
        Self {
            counter,
            reporter: Arc::new(NoopReporter),
            poll_interval: None,
        }
    }

    /// Observer that samples the counter every `poll_interval` and feeds
    /// each changed total to `reporter` until completion.
    #[must_use]
    pub fn with_reporter(
        counter: ProgressCounter,
        reporter: Arc<dyn ProgressReporter>,
        poll_interval: Duration,
    ) -> Self {
        Self {
            counter,
            reporter,
            poll_interval: Some(poll_interval),
        }
    }

    /// Block the calling thread until completion, then return the final
    /// total.
    ///
    /// The returned value is read after the completion wake, so it covers
    /// at least everything the transition covers: the signaling worker's
    /// whole contribution, or the whole crew's under an all-workers
    /// policy.
    pub fn run(&self) -> u64 {
        match self.poll_interval {
            None => self.counter.await_completion(),
            Some(interval) => {
                let mut last_reported = None;
                while !self.counter.await_completion_for(interval) {
                    let total = self.counter.total();
                    // Only changes are worth a report.
                    if last_reported != Some(total) {
                        self.reporter.update(total);
                        last_reported = Some(total);
                    }
                }
            }
        }

        let total = self.counter.total();
        self.reporter.finish(total);
        tracing::debug!(target: "headway.observer", total, "completion observed");
        total
    }

    /// Run the observer on its own named OS thread.
    pub fn spawn(self) -> ProgressResult<ObserverHandle> {
        let thread = thread::Builder::new()
            .name("headway-observer".into())
            .spawn(move || self.run())
            .map_err(|e| ProgressError::other(format!("failed to spawn observer: {e}")))?;
        Ok(ObserverHandle { thread })
    }
}

/// Handle to a spawned observer thread.
pub struct ObserverHandle {
    thread: JoinHandle<u64>,
}

impl ObserverHandle {
    /// Wait for the observer to see completion and return its final read.
    pub fn join(self) -> ProgressResult<u64> {
        self.thread
            .join()
            .map_err(|_| ProgressError::ObserverPanicked)
    }
}
