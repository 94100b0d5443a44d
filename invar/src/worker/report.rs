//! Worker and pool outcome reports.

use std::time::Duration;

use crate::error::{ErrorKind, RenderError};
use crate::progress::ProgressSnapshot;

/// Lifecycle of one worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkerPhase {
    Init,
    Running,
    Terminated,
}

/// What one worker did.
#[derive(Debug)]
pub struct WorkerReport {
    pub worker: usize,
    pub phase: WorkerPhase,
    pub rendered: usize,
    pub skipped: usize,
    pub failed: usize,
    /// Per-job failures in the order they happened.
    pub errors: Vec<RenderError>,
}

impl WorkerReport {
    pub fn new(worker: usize) -> Self {
        Self {
            worker,
            phase: WorkerPhase::Init,
            rendered: 0,
            skipped: 0,
            failed: 0,
            errors: Vec::new(),
        }
    }

    /// Jobs taken from the queues, whatever their outcome.
    pub fn processed(&self) -> usize {
        self.rendered + self.skipped + self.failed
    }

    pub(super) fn record_failure(&mut self, error: RenderError) {
        self.failed += 1;
        self.errors.push(error);
    }
}

/// A worker that returned no report.
#[derive(Debug)]
pub struct WorkerFailure {
    pub worker: usize,
    pub error: RenderError,
}

/// Outcome of [`WorkerPool::run`](super::WorkerPool::run).
#[derive(Debug)]
pub struct PoolReport {
    pub workers: Vec<WorkerReport>,
    /// Workers that failed to spawn or to initialize.
    pub startup_failures: Vec<WorkerFailure>,
    /// Workers whose thread panicked outside a job.
    pub panicked: Vec<WorkerFailure>,
    /// Jobs enqueued when the pool started.
    pub enqueued: usize,
    /// Jobs acknowledged by workers.
    pub acknowledged: usize,
    pub elapsed: Duration,
    /// Last progress sample, printed once after all workers joined.
    pub final_progress: Option<ProgressSnapshot>,
}

impl PoolReport {
    pub fn rendered(&self) -> usize {
        self.workers.iter().map(|w| w.rendered).sum()
    }

    pub fn skipped(&self) -> usize {
        self.workers.iter().map(|w| w.skipped).sum()
    }

    pub fn failed(&self) -> usize {
        self.workers.iter().map(|w| w.failed).sum()
    }

    /// Fraction of enqueued jobs acknowledged, `1.0` for an empty run.
    pub fn completion(&self) -> f64 {
        if self.enqueued == 0 {
            1.0
        } else {
            self.acknowledged as f64 / self.enqueued as f64
        }
    }

    /// All per-job errors across workers.
    pub fn errors(&self) -> impl Iterator<Item = &RenderError> {
        self.workers.iter().flat_map(|w| w.errors.iter())
    }

    /// Per-job errors of a given kind.
    pub fn errors_of(&self, kind: ErrorKind) -> usize {
        self.errors().filter(|e| e.kind() == kind).count()
    }

    pub fn all_terminated(&self) -> bool {
        self.workers
            .iter()
            .all(|w| w.phase == WorkerPhase::Terminated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(worker: usize, rendered: usize, skipped: usize) -> WorkerReport {
        let mut report = WorkerReport::new(worker);
        report.phase = WorkerPhase::Terminated;
        report.rendered = rendered;
        report.skipped = skipped;
        report
    }

    #[test]
    fn test_worker_report_counts() {
        let mut report = report(0, 3, 1);
        report.record_failure(RenderError::render_failure("x.png", "boom"));
        assert_eq!(report.failed, 1);
        assert_eq!(report.processed(), 5);
        assert_eq!(report.errors.len(), 1);
    }

    #[test]
    fn test_pool_totals() {
        let mut second = report(1, 2, 0);
        second.record_failure(RenderError::UnsupportedZoom {
            filename: "deep.png".into(),
            zoom: 20,
            max: 18,
        });
        let pool = PoolReport {
            workers: vec![report(0, 3, 1), second],
            startup_failures: Vec::new(),
            panicked: Vec::new(),
            enqueued: 8,
            acknowledged: 7,
            elapsed: Duration::from_secs(1),
            final_progress: None,
        };

        assert_eq!(pool.rendered(), 5);
        assert_eq!(pool.skipped(), 1);
        assert_eq!(pool.failed(), 1);
        assert_eq!(pool.errors_of(ErrorKind::UnsupportedZoom), 1);
        assert!((pool.completion() - 0.875).abs() < 1e-12);
        assert!(pool.all_terminated());
    }

    #[test]
    fn test_empty_run_is_complete() {
        let pool = PoolReport {
            workers: Vec::new(),
            startup_failures: Vec::new(),
            panicked: Vec::new(),
            enqueued: 0,
            acknowledged: 0,
            elapsed: Duration::ZERO,
            final_progress: None,
        };
        assert_eq!(pool.completion(), 1.0);
    }
}
