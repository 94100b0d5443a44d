//! Rendering backend abstraction.
//!
//! The scheduler never rasterizes anything itself. It talks to a map
//! renderer through two traits, keeping the engine swappable and the worker
//! loop testable with in-memory fakes:
//!
//! ```text
//! ┌──────────────────────────────┐
//! │          WorkerPool          │  (Arc<dyn RenderBackend>)
//! └──────────────────────────────┘
//!                │ new_context(width, height), once per worker thread
//!                ▼
//! ┌──────────────────────────────┐
//! │      Box<dyn MapContext>     │  owned by exactly one worker
//! │ load_style · native_srs      │
//! │ zoom_to_box · render_image   │
//! │ save_image · grids           │
//! └──────────────────────────────┘
//! ```
//!
//! Contexts are created on the worker thread that uses them and are never
//! moved or shared, so `MapContext` does not require `Send`.

mod buffers;

pub use buffers::{Feature, FeatureId, GridBuffer, ImageBuffer};

use crate::projection::BoundingBox;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors reported by a rendering backend.
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("Failed to create map context: {0}")]
    Context(String),

    #[error("Failed to load style: {0}")]
    Style(String),

    #[error("Render failed: {0}")]
    Render(String),

    #[error("Failed to save {}: {reason}", .path.display())]
    Save { path: PathBuf, reason: String },

    #[error("Interaction grid failed: {0}")]
    Grid(String),

    #[error("Backend does not support {0}")]
    Unsupported(&'static str),
}

/// One renderer instance bound to a canvas size and a loaded style.
pub trait MapContext {
    /// Load a style definition. `strict` rejects unknown style properties.
    fn load_style(&mut self, path: &Path, strict: bool) -> Result<(), BackendError>;

    /// Spatial reference of the loaded style (proj4 string or `epsg:N`).
    fn native_srs(&self) -> String;

    /// Set the visible extent for the next render.
    fn zoom_to_box(&mut self, bbox: &BoundingBox);

    /// Pixels rendered around the canvas edge to avoid clipped labels.
    fn set_buffer_size(&mut self, buffer_size: u32);

    /// Render the current view at the context's canvas size.
    fn render_image(&mut self) -> Result<ImageBuffer, BackendError>;

    /// Encode `image` as `file_type` and write it to `path`.
    fn save_image(
        &self,
        image: &ImageBuffer,
        path: &Path,
        file_type: &str,
    ) -> Result<(), BackendError>;

    /// Render a feature-id grid for `layer` at the current view.
    ///
    /// `key` names the attribute that identifies features; only `fields` are
    /// kept as feature attributes.
    fn render_interaction_layer(
        &mut self,
        _layer: usize,
        _key: &str,
        _fields: &[String],
    ) -> Result<GridBuffer, BackendError> {
        Err(BackendError::Unsupported("interaction grids"))
    }

    /// Encode a grid for client-side lookups.
    ///
    /// Defaults to the UTFGrid encoding in [`crate::grid`].
    fn encode_grid(
        &self,
        grid: &GridBuffer,
        resolution: u32,
        include_features: bool,
    ) -> Result<serde_json::Value, BackendError> {
        crate::grid::encode_utfgrid(grid, resolution, include_features)
    }
}

/// Factory for per-worker map contexts.
pub trait RenderBackend: Send + Sync {
    /// Short name for logs.
    fn name(&self) -> &str;

    /// Create a context with a `width × height` canvas.
    fn new_context(&self, width: u32, height: u32) -> Result<Box<dyn MapContext>, BackendError>;
}
