//! Progress reporting seam.
//!
//! The observer samples the counter; where the samples go is the caller's
//! choice. [`NoopReporter`] discards them, and the `cli` feature adds a
//! terminal bar. Custom sinks (test recorders, log emitters) implement
//! [`ProgressReporter`].

/// Sink for observer progress samples.
///
/// Calls arrive from the observer's thread, one at a time. A slow
/// implementation delays the next sample, never the completion wake.
pub trait ProgressReporter: Send + Sync {
    /// A new total was sampled. Totals arrive in non-decreasing order.
    fn update(&self, total: u64);

    /// Completion was observed; `total` is the final read.
    fn finish(&self, total: u64);
}

/// Reporter that discards every sample.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopReporter;

impl ProgressReporter for NoopReporter {
    fn update(&self, _total: u64) {}
    fn finish(&self, _total: u64) {}
}

/// Terminal progress bar reporter, enabled with the `cli` feature.
#[cfg(feature = "cli")]
pub mod bar {
    use indicatif::{ProgressBar, ProgressStyle};

    use super::ProgressReporter;

    /// Renders observer samples as a terminal bar.
    pub struct BarReporter {
        bar: ProgressBar,
    }

    impl BarReporter {
        /// Create a bar sized for the expected final total.
        #[must_use]
        pub fn new(expected_total: u64) -> Self {
            let bar = ProgressBar::new(expected_total);
            bar.set_style(
                ProgressStyle::default_bar()
                    .template(
                        "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({per_sec})",
                    )
                    .unwrap()
                    .progress_chars("█▓░"),
            );
            Self { bar }
        }
    }

    impl ProgressReporter for BarReporter {
        fn update(&self, total: u64) {
            self.bar.set_position(total);
        }

        fn finish(&self, total: u64) {
            self.bar.set_position(total);
            self.bar.finish();
        }
    }
}
