//! Thread pool that runs render workers to completion.

use std::sync::Arc;
use std::thread;
use std::time::Instant;

use super::report::{PoolReport, WorkerFailure};
use super::runner::{Worker, WorkerShared};
use super::WorkerReport;
use crate::backend::RenderBackend;
use crate::config::{default_worker_count, RenderConfig};
use crate::coord::{ProjectionTable, DEFAULT_MAX_ZOOM};
use crate::error::RenderError;
use crate::log::{Logger, NoOpLogger};
use crate::progress::{ProgressOptions, ProgressTracker};
use crate::queue::JobQueueSet;
use crate::{log_error, log_info, log_warn};

/// Runs a fixed number of workers over a filled [`JobQueueSet`].
///
/// The pool takes the queue set by value, so all jobs must be pushed
/// before it is built.
///
/// # Example
///
/// ```ignore
/// let queues = JobQueueSet::from_batches([jobs_a, jobs_b]);
/// let report = WorkerPool::new(backend, RenderConfig::new("osm.xml"), queues)
///     .with_workers(4)
///     .with_progress(ProgressOptions::enabled())
///     .run()?;
/// println!("{} rendered", report.rendered());
/// ```
pub struct WorkerPool {
    backend: Arc<dyn RenderBackend>,
    config: RenderConfig,
    queues: JobQueueSet,
    workers: usize,
    progress: ProgressOptions,
    logger: Arc<dyn Logger>,
    max_zoom: u8,
}

impl WorkerPool {
    pub fn new(backend: Arc<dyn RenderBackend>, config: RenderConfig, queues: JobQueueSet) -> Self {
        Self {
            backend,
            config,
            queues,
            workers: default_worker_count(),
            progress: ProgressOptions::default(),
            logger: Arc::new(NoOpLogger),
            max_zoom: DEFAULT_MAX_ZOOM,
        }
    }

    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    pub fn with_progress(mut self, progress: ProgressOptions) -> Self {
        self.progress = progress;
        self
    }

    pub fn with_logger(mut self, logger: Arc<dyn Logger>) -> Self {
        self.logger = logger;
        self
    }

    /// Highest zoom the projection table covers.
    pub fn with_max_zoom(mut self, max_zoom: u8) -> Self {
        self.max_zoom = max_zoom;
        self
    }

    pub fn worker_count(&self) -> usize {
        self.workers
    }

    /// Run every worker to termination.
    ///
    /// Fails only for invalid settings or when no worker got past
    /// initialization. Per-job failures are in the report.
    pub fn run(self) -> Result<PoolReport, RenderError> {
        self.config.validate()?;
        if self.workers == 0 {
            return Err(RenderError::Configuration(
                "worker count must be at least 1".to_string(),
            ));
        }
        let table = ProjectionTable::new(self.max_zoom)
            .map_err(|e| RenderError::Configuration(e.to_string()))?;

        let enqueued = self.queues.total_enqueued();
        let started = Instant::now();
        let shared = WorkerShared {
            queues: Arc::new(self.queues),
            table: Arc::new(table),
            config: Arc::new(self.config),
            total_jobs: self.progress.total_jobs.unwrap_or(enqueued),
            progress: self.progress,
            started,
            logger: Arc::clone(&self.logger),
        };

        log_info!(
            self.logger,
            "Starting {} render workers ({} backend) for {} jobs in {} queues",
            self.workers,
            self.backend.name(),
            enqueued,
            shared.queues.queue_count()
        );

        let mut handles = Vec::with_capacity(self.workers);
        let mut startup_failures = Vec::new();
        for id in 0..self.workers {
            let backend = Arc::clone(&self.backend);
            let worker_shared = shared.clone();
            let spawned = thread::Builder::new()
                .name(format!("render-worker-{}", id))
                .spawn(move || {
                    let worker = Worker::init(id, backend.as_ref(), &worker_shared)?;
                    Ok::<WorkerReport, RenderError>(worker.run())
                });
            match spawned {
                Ok(handle) => handles.push((id, handle)),
                Err(e) => startup_failures.push(WorkerFailure {
                    worker: id,
                    error: RenderError::Configuration(format!(
                        "failed to spawn render-worker-{}: {}",
                        id, e
                    )),
                }),
            }
        }

        let mut reports = Vec::with_capacity(handles.len());
        let mut panicked = Vec::new();
        for (id, handle) in handles {
            match handle.join() {
                Ok(Ok(report)) => reports.push(report),
                Ok(Err(error)) => startup_failures.push(WorkerFailure { worker: id, error }),
                Err(_) => panicked.push(WorkerFailure {
                    worker: id,
                    error: RenderError::WorkerPanicked { worker: id },
                }),
            }
        }

        for failure in startup_failures.iter().chain(&panicked) {
            log_error!(self.logger, "Worker {} stopped: {}", failure.worker, failure.error);
        }

        let final_progress = shared.progress.enabled.then(|| {
            ProgressTracker::new(&shared.progress, shared.total_jobs, started)
                .report(shared.queues.remaining(), Instant::now())
        });

        if reports.is_empty() {
            let mut failures = startup_failures.into_iter().chain(panicked);
            return Err(failures.next().map(|f| f.error).unwrap_or_else(|| {
                RenderError::Configuration("no render worker started".to_string())
            }));
        }

        let report = PoolReport {
            workers: reports,
            startup_failures,
            panicked,
            enqueued,
            acknowledged: shared.queues.acknowledged(),
            elapsed: started.elapsed(),
            final_progress,
        };

        if report.failed() > 0 {
            log_warn!(self.logger, "{} jobs failed", report.failed());
        }
        log_info!(
            self.logger,
            "Finished in {:.1}s: {} rendered, {} skipped, {} failed",
            report.elapsed.as_secs_f64(),
            report.rendered(),
            report.skipped(),
            report.failed()
        );
        Ok(report)
    }
}
