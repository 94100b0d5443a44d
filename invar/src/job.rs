//! Render job descriptors.
//!
//! Jobs are produced by an external generator, pushed into a
//! [`JobQueueSet`](crate::queue::JobQueueSet) before the pool starts, and
//! consumed exactly once by one worker.

use std::fmt;
use std::path::{Path, PathBuf};

/// Render one slippy-map tile.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TileJob {
    pub filename: PathBuf,
    pub tile_x: u32,
    pub tile_y: u32,
    pub zoom: u8,
}

/// Render a map crop centred on a geographic point.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameJob {
    pub filename: PathBuf,
    pub latitude: f64,
    pub longitude: f64,
    pub zoom: u8,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RenderJob {
    Tile(TileJob),
    Frame(FrameJob),
}

impl RenderJob {
    /// Job for tile `(x, y)` at `zoom`, written to `filename`.
    pub fn tile(filename: impl Into<PathBuf>, tile_x: u32, tile_y: u32, zoom: u8) -> Self {
        RenderJob::Tile(TileJob {
            filename: filename.into(),
            tile_x,
            tile_y,
            zoom,
        })
    }

    /// Job for a frame centred on `(latitude, longitude)` at `zoom`.
    pub fn frame(filename: impl Into<PathBuf>, latitude: f64, longitude: f64, zoom: u8) -> Self {
        RenderJob::Frame(FrameJob {
            filename: filename.into(),
            latitude,
            longitude,
            zoom,
        })
    }

    /// Output path of the primary image.
    pub fn filename(&self) -> &Path {
        match self {
            RenderJob::Tile(job) => &job.filename,
            RenderJob::Frame(job) => &job.filename,
        }
    }

    pub fn zoom(&self) -> u8 {
        match self {
            RenderJob::Tile(job) => job.zoom,
            RenderJob::Frame(job) => job.zoom,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            RenderJob::Tile(_) => "tile",
            RenderJob::Frame(_) => "frame",
        }
    }
}

impl fmt::Display for RenderJob {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderJob::Tile(job) => write!(
                f,
                "tile {}/{}/{} -> {}",
                job.zoom,
                job.tile_x,
                job.tile_y,
                job.filename.display()
            ),
            RenderJob::Frame(job) => write!(
                f,
                "frame {:.5},{:.5}@{} -> {}",
                job.latitude,
                job.longitude,
                job.zoom,
                job.filename.display()
            ),
        }
    }
}

impl From<TileJob> for RenderJob {
    fn from(job: TileJob) -> Self {
        RenderJob::Tile(job)
    }
}

impl From<FrameJob> for RenderJob {
    fn from(job: FrameJob) -> Self {
        RenderJob::Frame(job)
    }
}
