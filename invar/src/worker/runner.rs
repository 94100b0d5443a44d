//! A single render worker.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::time::Instant;

use super::report::{WorkerPhase, WorkerReport};
use crate::backend::RenderBackend;
use crate::config::RenderConfig;
use crate::coord::ProjectionTable;
use crate::error::RenderError;
use crate::job::RenderJob;
use crate::log::Logger;
use crate::progress::{ProgressOptions, ProgressTracker};
use crate::projection::MapProjection;
use crate::queue::JobQueueSet;
use crate::strategy::RenderView;
use crate::{log_debug, log_error, log_job};

/// Read-only state every worker starts from.
#[derive(Clone)]
pub struct WorkerShared {
    pub queues: Arc<JobQueueSet>,
    pub table: Arc<ProjectionTable>,
    pub config: Arc<RenderConfig>,
    pub progress: ProgressOptions,
    /// Job count the progress bar measures against.
    pub total_jobs: usize,
    pub started: Instant,
    pub logger: Arc<dyn Logger>,
}

/// An initialized worker, ready to drain the queues.
pub struct Worker {
    id: usize,
    view: RenderView,
    queues: Arc<JobQueueSet>,
    config: Arc<RenderConfig>,
    progress: ProgressTracker,
    logger: Arc<dyn Logger>,
    report: WorkerReport,
}

impl Worker {
    /// Build the worker's own map context and projection.
    ///
    /// Must run on the thread that will render: contexts are not `Send`.
    pub fn init(
        id: usize,
        backend: &dyn RenderBackend,
        shared: &WorkerShared,
    ) -> Result<Self, RenderError> {
        let config = &shared.config;
        log_debug!(
            shared.logger,
            "Worker {} initializing {} context ({}x{})",
            id,
            backend.name(),
            config.width(),
            config.height()
        );

        let mut context = backend.new_context(config.width(), config.height())?;
        context
            .load_style(config.style_path(), config.strict_style())
            .map_err(|e| {
                RenderError::Configuration(format!("{} ({})", e, config.style_path().display()))
            })?;
        context.set_buffer_size(config.buffer_size());

        let projection = MapProjection::from_srs(&context.native_srs())?;
        log_debug!(shared.logger, "Worker {} using {:?}", id, projection);

        let view = RenderView::new(
            context,
            projection,
            Arc::clone(&shared.table),
            Arc::clone(config),
            Arc::clone(&shared.logger),
        )
        .with_quiet(shared.progress.enabled);

        Ok(Self {
            id,
            view,
            queues: Arc::clone(&shared.queues),
            config: Arc::clone(config),
            progress: ProgressTracker::new(&shared.progress, shared.total_jobs, shared.started),
            logger: Arc::clone(&shared.logger),
            report: WorkerReport::new(id),
        })
    }

    pub fn id(&self) -> usize {
        self.id
    }

    pub fn phase(&self) -> WorkerPhase {
        self.report.phase
    }

    /// Drain the queues until a full scan comes back empty.
    pub fn run(mut self) -> WorkerReport {
        self.report.phase = WorkerPhase::Running;
        log_debug!(self.logger, "Worker {} running", self.id);
        let quiet = self.progress.is_enabled();

        while let Some((job, handle)) = self.queues.try_pop_any() {
            let now = Instant::now();
            if self.progress.should_sample(now) {
                self.progress.report(self.queues.remaining(), now);
            }

            let path = job.filename();
            if self.config.skip_existing() && path.exists() {
                log_job!(self.logger, quiet, "Skipping {}", path.display());
                self.report.skipped += 1;
                self.queues.ack(handle);
                continue;
            }

            log_job!(self.logger, quiet, "Rendering {}", path.display());
            match self.render_job(&job) {
                Ok(()) => self.report.rendered += 1,
                Err(e) => {
                    log_error!(self.logger, "{}", e);
                    self.report.record_failure(e);
                }
            }
            self.queues.ack(handle);
        }

        self.report.phase = WorkerPhase::Terminated;
        log_debug!(
            self.logger,
            "Worker {} finished: {} rendered, {} skipped, {} failed",
            self.id,
            self.report.rendered,
            self.report.skipped,
            self.report.failed
        );
        self.report
    }

    /// Render one job, turning a backend panic into a failure of that job.
    fn render_job(&mut self, job: &RenderJob) -> Result<(), RenderError> {
        let view = &mut self.view;
        panic::catch_unwind(AssertUnwindSafe(|| view.render(job))).unwrap_or_else(|payload| {
            Err(RenderError::render_failure(
                job.filename().display().to_string(),
                format!("backend panicked: {}", panic_message(payload.as_ref())),
            ))
        })
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message
    } else {
        "unknown panic"
    }
}
