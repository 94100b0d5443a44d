//! Console progress reporting for render runs.
//!
//! Each worker owns a [`ProgressTracker`]. Between jobs it asks
//! [`ProgressTracker::should_sample`] and, at most once per interval, samples
//! the remaining queue length into a [`ProgressSnapshot`] whose
//! [`render_line`](ProgressSnapshot::render_line) overwrites the console line
//! in place. Figures are advisory: queue lengths are approximate while other
//! workers are popping.

mod snapshot;
mod tracker;

pub use snapshot::{ProgressSnapshot, ProgressStatus};
pub use tracker::ProgressTracker;

use crate::config::DEFAULT_PROGRESS_INTERVAL;
use std::time::Duration;

/// Progress bar settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressOptions {
    /// Show the bar. Per-job messages drop to debug while it is shown.
    pub enabled: bool,
    /// Jobs in the run. `None` uses the number of jobs enqueued.
    pub total_jobs: Option<usize>,
    /// Minimum time between samples of one worker.
    pub interval: Duration,
}

impl ProgressOptions {
    /// Enabled with the default interval.
    pub fn enabled() -> Self {
        Self {
            enabled: true,
            ..Self::default()
        }
    }

    pub fn with_total_jobs(mut self, total: usize) -> Self {
        self.total_jobs = Some(total);
        self
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }
}

impl Default for ProgressOptions {
    fn default() -> Self {
        Self {
            enabled: false,
            total_jobs: None,
            interval: DEFAULT_PROGRESS_INTERVAL,
        }
    }
}
