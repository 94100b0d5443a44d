use std::path::Path;

use super::{RenderStrategy, ViewCorners};
use crate::coord::{CoordError, PixelPoint, ProjectionTable};
use crate::job::TileJob;

impl RenderStrategy for TileJob {
    fn filename(&self) -> &Path {
        &self.filename
    }

    fn zoom(&self) -> u8 {
        self.zoom
    }

    /// Bottom-left `(x·w, (y+1)·h)`, top-right `((x+1)·w, y·h)`.
    fn corners(
        &self,
        table: &ProjectionTable,
        width: u32,
        height: u32,
    ) -> Result<ViewCorners, CoordError> {
        table.level(self.zoom)?;

        let (w, h) = (width as f64, height as f64);
        let (x, y) = (self.tile_x as f64, self.tile_y as f64);
        Ok(ViewCorners {
            bottom_left: PixelPoint::new(x * w, (y + 1.0) * h),
            top_right: PixelPoint::new((x + 1.0) * w, y * h),
        })
    }

    fn supports_grid(&self) -> bool {
        true
    }
}
