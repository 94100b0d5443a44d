use std::path::Path;

use super::{RenderStrategy, ViewCorners};
use crate::coord::{CoordError, LatLng, ProjectionTable};
use crate::job::FrameJob;

impl RenderStrategy for FrameJob {
    fn filename(&self) -> &Path {
        &self.filename
    }

    fn zoom(&self) -> u8 {
        self.zoom
    }

    /// Canvas centred on the job's point.
    fn corners(
        &self,
        table: &ProjectionTable,
        width: u32,
        height: u32,
    ) -> Result<ViewCorners, CoordError> {
        let center = table.lat_lng_to_pixel(LatLng::new(self.latitude, self.longitude), self.zoom)?;
        let (half_w, half_h) = (width as f64 / 2.0, height as f64 / 2.0);
        Ok(ViewCorners {
            bottom_left: center.offset(-half_w, half_h),
            top_right: center.offset(half_w, -half_h),
        })
    }
}
