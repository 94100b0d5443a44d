//! Coordinate type definitions

use std::fmt;

/// Width and height of the zoom-0 world in pixels.
pub const BASE_TILE_SIZE: f64 = 256.0;

/// Default highest zoom level covered by a [`ProjectionTable`](super::ProjectionTable).
pub const DEFAULT_MAX_ZOOM: u8 = 18;

/// Hard ceiling for table construction; 256·2³⁰ px is still exact in `f64`.
pub const MAX_SUPPORTED_ZOOM: u8 = 30;

/// `sin(lat)` is clamped to this magnitude before the mercator log.
pub const SIN_LAT_LIMIT: f64 = 0.9999;

/// Web Mercator valid latitude range
pub const MIN_LAT: f64 = -85.05112878;
pub const MAX_LAT: f64 = 85.05112878;

/// A point in global pixel space at some zoom level.
///
/// Origin is the north-west corner of the world, Y grows southwards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelPoint {
    pub x: f64,
    pub y: f64,
}

impl PixelPoint {
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Returns this point shifted by `(dx, dy)`.
    #[inline]
    pub fn offset(self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

/// Geographic coordinates in degrees (WGS84).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    #[inline]
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// Scale constants for one zoom level.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomLevel {
    /// World width in pixels (`256 · 2^zoom`).
    pub world_size: f64,
    /// Pixels per degree of longitude.
    pub pixels_per_degree: f64,
    /// Pixels per radian of mercator northing.
    pub pixels_per_radian: f64,
    /// Pixel coordinates of (0°, 0°).
    pub origin: PixelPoint,
}

impl ZoomLevel {
    pub(super) fn for_world_size(world_size: f64) -> Self {
        let half = world_size / 2.0;
        Self {
            world_size,
            pixels_per_degree: world_size / 360.0,
            pixels_per_radian: world_size / (2.0 * std::f64::consts::PI),
            origin: PixelPoint::new(half, half),
        }
    }
}

/// Errors that can occur during coordinate conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoordError {
    /// Zoom level is not covered by the projection table.
    UnsupportedZoom { zoom: u8, max: u8 },
    /// Requested table size exceeds [`MAX_SUPPORTED_ZOOM`].
    InvalidMaxZoom(u8),
}

impl fmt::Display for CoordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoordError::UnsupportedZoom { zoom, max } => {
                write!(
                    f,
                    "Unsupported zoom level: {} (must be between 0 and {})",
                    zoom, max
                )
            }
            CoordError::InvalidMaxZoom(zoom) => {
                write!(
                    f,
                    "Invalid maximum zoom: {} (must be at most {})",
                    zoom, MAX_SUPPORTED_ZOOM
                )
            }
        }
    }
}

impl std::error::Error for CoordError {}
