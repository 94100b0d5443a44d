//! Per-variant render strategies.
//!
//! Tiles and frames differ only in how they pick the two pixel-space corners
//! of the view. Everything after that is shared by [`RenderView`]:
//!
//! 1. corners pixel → lat/lng through the [`ProjectionTable`]
//! 2. lat/lng → native map units through the worker's [`MapProjection`]
//! 3. canonical [`BoundingBox`] handed to the backend
//! 4. render, save, and for tiles optionally the interaction grid

mod frame;
mod tile;

use std::path::Path;
use std::sync::Arc;

use crate::backend::MapContext;
use crate::config::RenderConfig;
use crate::coord::{CoordError, PixelPoint, ProjectionTable};
use crate::error::RenderError;
use crate::grid::{self, GRID_LAYER, GRID_RESOLUTION};
use crate::job::RenderJob;
use crate::log::Logger;
use crate::log_job;
use crate::projection::{BoundingBox, MapPoint, MapProjection};

/// Pixel corners of a render view, in world pixels at the job's zoom.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewCorners {
    pub bottom_left: PixelPoint,
    pub top_right: PixelPoint,
}

/// How a job variant is placed on the map.
pub trait RenderStrategy {
    fn filename(&self) -> &Path;

    fn zoom(&self) -> u8;

    /// Pixel corners for a `width × height` canvas.
    fn corners(
        &self,
        table: &ProjectionTable,
        width: u32,
        height: u32,
    ) -> Result<ViewCorners, CoordError>;

    /// Whether the interaction grid is written next to the image.
    fn supports_grid(&self) -> bool {
        false
    }
}

/// A worker's rendering state: its own map context plus shared read-only
/// projection data and settings.
pub struct RenderView {
    context: Box<dyn MapContext>,
    projection: MapProjection,
    table: Arc<ProjectionTable>,
    config: Arc<RenderConfig>,
    logger: Arc<dyn Logger>,
    quiet: bool,
}

impl RenderView {
    pub fn new(
        context: Box<dyn MapContext>,
        projection: MapProjection,
        table: Arc<ProjectionTable>,
        config: Arc<RenderConfig>,
        logger: Arc<dyn Logger>,
    ) -> Self {
        Self {
            context,
            projection,
            table,
            config,
            logger,
            quiet: false,
        }
    }

    /// Demote per-job messages to debug (progress bar is on).
    pub fn with_quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    pub fn projection(&self) -> &MapProjection {
        &self.projection
    }

    /// Render `job` with its variant's strategy.
    pub fn render(&mut self, job: &RenderJob) -> Result<(), RenderError> {
        match job {
            RenderJob::Tile(tile) => self.render_with(tile),
            RenderJob::Frame(frame) => self.render_with(frame),
        }
    }

    /// Map-unit bounding box for a strategy's corners.
    pub fn bounding_box<S: RenderStrategy + ?Sized>(
        &self,
        strategy: &S,
    ) -> Result<BoundingBox, RenderError> {
        let filename = strategy.filename().display().to_string();
        let zoom = strategy.zoom();

        let corners = strategy
            .corners(&self.table, self.config.width(), self.config.height())
            .map_err(|e| RenderError::from_coord(filename.as_str(), e))?;

        let bottom_left = self.to_map(corners.bottom_left, zoom, &filename)?;
        let top_right = self.to_map(corners.top_right, zoom, &filename)?;
        Ok(BoundingBox::from_corners(bottom_left, top_right))
    }

    fn to_map(&self, pixel: PixelPoint, zoom: u8, filename: &str) -> Result<MapPoint, RenderError> {
        let lat_lng = self
            .table
            .pixel_to_lat_lng(pixel, zoom)
            .map_err(|e| RenderError::from_coord(filename, e))?;
        self.projection
            .forward(lat_lng)
            .map_err(|e| RenderError::render_failure(filename, e))
    }

    fn render_with<S: RenderStrategy + ?Sized>(&mut self, strategy: &S) -> Result<(), RenderError> {
        let bbox = self.bounding_box(strategy)?;
        let path = strategy.filename();
        let filename = path.display().to_string();

        self.context.zoom_to_box(&bbox);
        self.context.set_buffer_size(self.config.buffer_size());

        let image = self
            .context
            .render_image()
            .map_err(|e| RenderError::render_failure(filename.as_str(), e))?;
        self.context
            .save_image(&image, path, self.config.file_type())
            .map_err(|e| RenderError::render_failure(filename.as_str(), e))?;

        if strategy.supports_grid() {
            self.render_grid(path)?;
        }
        Ok(())
    }

    fn render_grid(&mut self, image_path: &Path) -> Result<(), RenderError> {
        let Some(options) = self.config.grid() else {
            return Ok(());
        };

        let grid_path = grid::companion_path(image_path);
        log_job!(self.logger, self.quiet, "Rendering {}", grid_path.display());

        let filename = grid_path.display().to_string();
        let buffer = self
            .context
            .render_interaction_layer(GRID_LAYER, options.key_field(), options.fields())
            .map_err(|e| RenderError::render_failure(filename.as_str(), e))?;
        let encoded = self
            .context
            .encode_grid(&buffer, GRID_RESOLUTION, true)
            .map_err(|e| RenderError::render_failure(filename.as_str(), e))?;

        grid::write_companion(&grid_path, &encoded).map_err(|source| RenderError::Io {
            path: grid_path.clone(),
            source,
        })
    }
}

#[cfg(test)]
mod tests;
