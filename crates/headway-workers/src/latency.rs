//! Simulated work latency.
//!
//! Demo scenarios stand in for real I/O with bounded random delays,
//! quantized to milliseconds.

use std::time::Duration;

use rand::Rng;

/// A uniformly random duration in `[min_ms, max_ms]` milliseconds.
///
/// Reversed bounds are swapped rather than rejected.
#[must_use]
pub fn random_latency(min_ms: u64, max_ms: u64) -> Duration {
    let (lo, hi) = if min_ms <= max_ms {
        (min_ms, max_ms)
    } else {
        (max_ms, min_ms)
    };
    Duration::from_millis(rand::thread_rng().gen_range(lo..=hi))
}

/// Sleep a random duration in `[min_ms, max_ms]` and return how long the
/// sleep was.
pub async fn jittered_sleep(min_ms: u64, max_ms: u64) -> Duration {
    let delay = random_latency(min_ms, max_ms);
    tokio::time::sleep(delay).await;
    delay
}
