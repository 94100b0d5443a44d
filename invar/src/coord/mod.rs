//! Pixel ↔ geographic coordinate conversion.
//!
//! Implements the spherical web-mercator tile projection used to turn tile
//! and frame addresses into geographic corners. The world is `256 · 2^zoom`
//! pixels wide at each zoom; constants for every supported zoom are computed
//! once into a [`ProjectionTable`] and shared read-only between workers.

mod types;

pub use types::{
    CoordError, LatLng, PixelPoint, ZoomLevel, BASE_TILE_SIZE, DEFAULT_MAX_ZOOM, MAX_LAT,
    MAX_SUPPORTED_ZOOM, MIN_LAT, SIN_LAT_LIMIT,
};

/// Precomputed per-zoom scale constants.
///
/// # Example
///
/// ```
/// use invar::coord::{PixelPoint, ProjectionTable};
///
/// let table = ProjectionTable::default();
/// let ll = table.pixel_to_lat_lng(PixelPoint::new(128.0, 128.0), 0).unwrap();
/// assert!(ll.lat.abs() < 1e-9 && ll.lng.abs() < 1e-9);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectionTable {
    levels: Vec<ZoomLevel>,
}

impl ProjectionTable {
    /// Build a table covering zoom levels `0..=max_zoom`.
    pub fn new(max_zoom: u8) -> Result<Self, CoordError> {
        if max_zoom > MAX_SUPPORTED_ZOOM {
            return Err(CoordError::InvalidMaxZoom(max_zoom));
        }

        Ok(Self::build(max_zoom))
    }

    fn build(max_zoom: u8) -> Self {
        let mut levels = Vec::with_capacity(max_zoom as usize + 1);
        let mut world_size = BASE_TILE_SIZE;
        for _ in 0..=max_zoom {
            levels.push(ZoomLevel::for_world_size(world_size));
            world_size *= 2.0;
        }
        Self { levels }
    }

    /// Highest zoom level this table covers.
    #[inline]
    pub fn max_zoom(&self) -> u8 {
        (self.levels.len() - 1) as u8
    }

    /// Constants for `zoom`, or `UnsupportedZoom`.
    #[inline]
    pub fn level(&self, zoom: u8) -> Result<&ZoomLevel, CoordError> {
        self.levels
            .get(zoom as usize)
            .ok_or(CoordError::UnsupportedZoom {
                zoom,
                max: self.max_zoom(),
            })
    }

    /// Converts a global pixel position to latitude/longitude.
    pub fn pixel_to_lat_lng(&self, pixel: PixelPoint, zoom: u8) -> Result<LatLng, CoordError> {
        let level = self.level(zoom)?;

        let lng = (pixel.x - level.origin.x) / level.pixels_per_degree;
        let g = (pixel.y - level.origin.y) / -level.pixels_per_radian;
        let lat = (2.0 * g.exp().atan() - 0.5 * std::f64::consts::PI).to_degrees();

        Ok(LatLng::new(lat, lng))
    }

    /// Converts latitude/longitude to a global pixel position.
    ///
    /// The result is not rounded. Latitudes beyond the mercator limit are
    /// clamped through [`SIN_LAT_LIMIT`] instead of producing infinities.
    pub fn lat_lng_to_pixel(&self, lat_lng: LatLng, zoom: u8) -> Result<PixelPoint, CoordError> {
        let level = self.level(zoom)?;

        let x = level.origin.x + lat_lng.lng * level.pixels_per_degree;
        let f = lat_lng
            .lat
            .to_radians()
            .sin()
            .clamp(-SIN_LAT_LIMIT, SIN_LAT_LIMIT);
        let y = level.origin.y + 0.5 * ((1.0 + f) / (1.0 - f)).ln() * -level.pixels_per_radian;

        Ok(PixelPoint::new(x, y))
    }
}

impl Default for ProjectionTable {
    fn default() -> Self {
        Self::build(DEFAULT_MAX_ZOOM)
    }
}
