//! Error taxonomy for render runs.
//!
//! Startup problems surface as [`RenderError::Configuration`] and stop only
//! the worker that hit them. Per-job problems (`UnsupportedZoom`,
//! `RenderFailure`) are logged, counted, and the worker moves on. Running out
//! of queued work is not an error at all.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

use crate::backend::BackendError;
use crate::config::ConfigFileError;
use crate::coord::CoordError;
use crate::projection::ProjectionError;

/// Coarse classification used in reports and counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    UnsupportedZoom,
    RenderFailure,
    Configuration,
    Io,
    WorkerPanicked,
}

#[derive(Debug, Error)]
pub enum RenderError {
    /// The job's zoom is outside the projection table.
    #[error("Unsupported zoom {zoom} for {filename} (max {max})")]
    UnsupportedZoom {
        filename: String,
        zoom: u8,
        max: u8,
    },

    /// The backend could not render or save the job's output.
    #[error("Failed to render {filename}: {reason}")]
    RenderFailure { filename: String, reason: String },

    /// Invalid settings, unloadable style or unusable spatial reference.
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Render worker {worker} panicked")]
    WorkerPanicked { worker: usize },
}

impl RenderError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            RenderError::UnsupportedZoom { .. } => ErrorKind::UnsupportedZoom,
            RenderError::RenderFailure { .. } => ErrorKind::RenderFailure,
            RenderError::Configuration(_) => ErrorKind::Configuration,
            RenderError::Io { .. } => ErrorKind::Io,
            RenderError::WorkerPanicked { .. } => ErrorKind::WorkerPanicked,
        }
    }

    /// Tag a backend or projection failure with the output it was producing.
    pub fn render_failure(filename: impl Into<String>, reason: impl ToString) -> Self {
        RenderError::RenderFailure {
            filename: filename.into(),
            reason: reason.to_string(),
        }
    }

    /// Attach the job's filename to a coordinate error.
    pub fn from_coord(filename: impl Into<String>, err: CoordError) -> Self {
        let filename = filename.into();
        match err {
            CoordError::UnsupportedZoom { zoom, max } => {
                RenderError::UnsupportedZoom { filename, zoom, max }
            }
            other => RenderError::render_failure(filename, other),
        }
    }

    /// True for errors that only affect the current job.
    pub fn is_per_job(&self) -> bool {
        matches!(
            self.kind(),
            ErrorKind::UnsupportedZoom | ErrorKind::RenderFailure | ErrorKind::Io
        )
    }
}

impl From<ProjectionError> for RenderError {
    fn from(err: ProjectionError) -> Self {
        RenderError::Configuration(format!("spatial reference: {err}"))
    }
}

impl From<ConfigFileError> for RenderError {
    fn from(err: ConfigFileError) -> Self {
        RenderError::Configuration(err.to_string())
    }
}

impl From<BackendError> for RenderError {
    /// Backend errors outside a job (context creation, style loading).
    fn from(err: BackendError) -> Self {
        RenderError::Configuration(err.to_string())
    }
}
