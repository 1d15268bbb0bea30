//! Shared progress counter with a one-shot completion signal.
//!
//! The counter is the only shared mutable state between workers and
//! observers. Two pieces make up its contract:
//!
//! - a total, mutated by hardware atomics so any number of workers can
//!   increment concurrently without losing updates;
//! - a completion flag guarded by a mutex and condition variable, so a
//!   blocked observer is woken by the same operation that records the
//!   transition. There is no separate notification path to race with.
//!
//! The flag does not freeze the total: incrementing after completion is
//! permitted and visible. Whether "complete" means the designated worker
//! finished or every worker finished is the caller's policy (see
//! `CompletionPolicy`); the counter only provides the transition.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Condvar, Mutex};
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

/// Point-in-time view of a counter for reports and logs.
///
/// The two fields are read in flag-then-total order, so a snapshot that says
/// `complete` carries a total at least as new as the transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CounterSnapshot {
    /// Units of work recorded so far.
    pub total: u64,
    /// Whether completion has been signaled.
    pub complete: bool,
}

#[derive(Debug)]
struct CounterInner {
    total: AtomicU64,
    completed: Mutex<bool>,
    completion: Condvar,
}

/// Thread-safe progress counter shared by workers and observers.
///
/// Cloning is cheap; every clone refers to the same counter. The counter
/// lives as long as its longest-lived handle, and independent instances
/// never interfere.
///
/// INVARIANT: the total is monotonically non-decreasing. There is no reset
/// and no decrement.
///
/// INVARIANT: the completion flag transitions `false -> true` at most once
/// and never back.
#[derive(Clone, Debug)]
pub struct ProgressCounter {
    inner: Arc<CounterInner>,
}

impl ProgressCounter {
    /// Create a counter at zero with completion unsignaled.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Arc::new(CounterInner {
                total: AtomicU64::new(0),
                completed: Mutex::new(false),
                completion: Condvar::new(),
            }),
        }
    }

    /// Record one unit of work.
    ///
    /// Never fails and never blocks; safe under any number of concurrent
    /// callers.
    pub fn increment(&self) {
        self.inner.total.fetch_add(1, Ordering::SeqCst);
    }

    /// Record `units` of work in one step. Same contract as [`increment`].
    ///
    /// [`increment`]: Self::increment
    pub fn add(&self, units: u64) {
        self.inner.total.fetch_add(units, Ordering::SeqCst);
    }

    /// Read the current total without blocking.
    ///
    /// May race with concurrent increments; the value is exact only once
    /// the mutating side has quiesced (after a join, or for the signaling
    /// worker's own increments, after a wake).
    #[must_use]
    pub fn total(&self) -> u64 {
        self.inner.total.load(Ordering::SeqCst)
    }

    /// Mark the tracked work complete and wake every blocked waiter.
    ///
    /// Returns `true` if this call performed the transition. Any later call
    /// is a no-op that returns `false`; the flag never goes back. The wake
    /// is part of this operation, and waiters re-check the flag under the
    /// same lock, so a woken observer always sees `is_complete() == true`.
    pub fn mark_complete(&self) -> bool {
        let mut completed = self.inner.completed.lock().unwrap();
        if *completed {
            return false;
        }
        *completed = true;
        self.inner.completion.notify_all();
        drop(completed);
        tracing::debug!(
            target: "headway.counter",
            total = self.total(),
            "progress marked complete"
        );
        true
    }

    /// Check whether completion has been signaled, without waiting for it.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        *self.inner.completed.lock().unwrap()
    }

    /// Block the calling thread until completion is signaled.
    ///
    /// Returns immediately if completion was already signaled. The wait
    /// re-checks the flag after every wake, so spurious wakeups never end
    /// it early.
    pub fn await_completion(&self) {
        let mut completed = self.inner.completed.lock().unwrap();
        while !*completed {
            completed = self.inner.completion.wait(completed).unwrap();
        }
    }

    /// Block until completion is signaled or `timeout` elapses.
    ///
    /// Returns whether completion was observed. The deadline is fixed up
    /// front, so spurious wakeups neither satisfy nor extend the wait.
    #[must_use]
    pub fn await_completion_for(&self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        let mut completed = self.inner.completed.lock().unwrap();
        while !*completed {
            let now = Instant::now();
            if now >= deadline {
                return false;
            }
            // The flag decides, not the timeout result: a wake that raced
            // the deadline still counts once the flag is set.
            let (guard, _) = self
                .inner
                .completion
                .wait_timeout(completed, deadline - now)
                .unwrap();
            completed = guard;
        }
        true
    }

    /// Capture the counter's current state.
    #[must_use]
    pub fn snapshot(&self) -> CounterSnapshot {
        let complete = self.is_complete();
        let total = self.total();
        CounterSnapshot { total, complete }
    }
}

impl Default for ProgressCounter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_new_counter_starts_at_zero() {
        let counter = ProgressCounter::new();
        assert_eq!(counter.total(), 0);
        assert!(!counter.is_complete());
    }

    #[test]
    fn test_increment_and_add_accumulate() {
        let counter = ProgressCounter::new();
        counter.increment();
        counter.increment();
        counter.add(40);
        assert_eq!(counter.total(), 42);
    }

    #[test]
    fn test_clones_share_state() {
        let counter = ProgressCounter::new();
        let clone = counter.clone();
        clone.add(5);
        counter.increment();
        assert_eq!(counter.total(), 6);
        assert_eq!(clone.total(), 6);
    }

    // ====== Completion Transition Tests ======

    #[test]
    fn test_mark_complete_performs_first_transition_only() {
        let counter = ProgressCounter::new();
        assert!(counter.mark_complete());
        assert!(!counter.mark_complete());
        assert!(counter.is_complete());
    }

    #[test]
    fn test_concurrent_mark_complete_has_one_winner() {
        let counter = ProgressCounter::new();
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let counter = counter.clone();
                thread::spawn(move || counter.mark_complete())
            })
            .collect();

        let wins = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|won| *won)
            .count();
        assert_eq!(wins, 1);
        assert!(counter.is_complete());
    }

    #[test]
    fn test_increment_after_completion_is_visible() {
        let counter = ProgressCounter::new();
        counter.mark_complete();
        counter.increment();
        assert_eq!(counter.total(), 1);
    }

    // ====== Waiting Tests ======

    #[test]
    fn test_await_completion_returns_immediately_when_complete() {
        let counter = ProgressCounter::new();
        counter.mark_complete();
        counter.await_completion();
    }

    #[test]
    fn test_await_completion_blocks_until_signaled() {
        let counter = ProgressCounter::new();
        let signaler = counter.clone();

        let handle = thread::spawn(move || {
            thread::sleep(Duration::from_millis(30));
            signaler.add(7);
            signaler.mark_complete();
        });

        counter.await_completion();
        assert!(counter.is_complete());
        assert_eq!(counter.total(), 7);
        handle.join().unwrap();
    }

    #[test]
    fn test_await_completion_for_times_out() {
        let counter = ProgressCounter::new();
        assert!(!counter.await_completion_for(Duration::from_millis(20)));
        assert!(!counter.is_complete());
    }

    #[test]
    fn test_await_completion_for_observes_signal() {
        let counter = ProgressCounter::new();
        let signaler = counter.clone();

        let handle = thread::spawn(move || {
            thread::sleep(Duration::from_millis(20));
            signaler.mark_complete();
        });

        assert!(counter.await_completion_for(Duration::from_secs(10)));
        handle.join().unwrap();
    }

    #[test]
    fn test_await_completion_for_zero_is_a_poll() {
        let counter = ProgressCounter::new();
        assert!(!counter.await_completion_for(Duration::ZERO));
        counter.mark_complete();
        assert!(counter.await_completion_for(Duration::ZERO));
    }

    // ====== Independence Tests ======

    #[test]
    fn test_independent_counters_do_not_interfere() {
        let first = ProgressCounter::new();
        let second = ProgressCounter::new();

        first.add(10);
        second.mark_complete();

        assert_eq!(first.total(), 10);
        assert!(!first.is_complete());
        assert_eq!(second.total(), 0);
        assert!(second.is_complete());
    }

    #[test]
    fn test_snapshot_reflects_state() {
        let counter = ProgressCounter::new();
        counter.add(3);
        assert_eq!(
            counter.snapshot(),
            CounterSnapshot {
                total: 3,
                complete: false
            }
        );

        counter.mark_complete();
        let snap = counter.snapshot();
        assert!(snap.complete);
        assert_eq!(snap.total, 3);
    }
}
