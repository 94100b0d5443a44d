//! Native map projection adapter.
//!
//! The rendering backend declares the spatial reference its style is drawn
//! in. Workers parse it once during startup into a [`MapProjection`] and use
//! it to carry geographic corners into map units before building the render
//! [`BoundingBox`].
//!
//! Spherical mercator and plain lon/lat are handled inline; any other proj4
//! definition goes through `proj4rs`.

mod bbox;
mod srs;

pub use bbox::{BoundingBox, MapPoint};
pub use srs::{resolve_srs, EPSG_GOOGLE, EPSG_WEB_MERCATOR, EPSG_WGS84, EPSG_WORLD_MERCATOR};

use crate::coord::LatLng;
use proj4rs::proj::Proj;
use std::f64::consts::PI;
use thiserror::Error;

/// WGS84 semi-major axis used by spherical mercator.
pub const EARTH_RADIUS: f64 = 6_378_137.0;

/// Proj definition of the geographic source system.
const WGS84_PROJ: &str = "+proj=longlat +datum=WGS84 +no_defs";

/// Errors raised while interpreting or applying a spatial reference.
#[derive(Debug, Error)]
pub enum ProjectionError {
    #[error("Empty spatial reference")]
    Empty,

    #[error("Unknown EPSG code in spatial reference: {0}")]
    UnknownEpsg(String),

    #[error("Invalid spatial reference '{srs}': {reason}")]
    Invalid { srs: String, reason: String },

    #[error("Failed to project ({lat}, {lng}): {reason}")]
    Transform { lat: f64, lng: f64, reason: String },
}

enum Strategy {
    /// Target is geographic; degrees pass through.
    LonLat,
    /// Spherical (web) mercator on the WGS84 semi-major axis.
    SphericalMercator,
    /// Anything else, delegated to proj4rs.
    Proj4 { source: Box<Proj>, target: Box<Proj> },
}

/// Forward projection from WGS84 degrees into the map's native units.
pub struct MapProjection {
    srs: String,
    strategy: Strategy,
}

impl std::fmt::Debug for MapProjection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let kind = match self.strategy {
            Strategy::LonLat => "lonlat",
            Strategy::SphericalMercator => "spherical-mercator",
            Strategy::Proj4 { .. } => "proj4",
        };
        f.debug_struct("MapProjection")
            .field("srs", &self.srs)
            .field("strategy", &kind)
            .finish()
    }
}

impl MapProjection {
    /// Parse a spatial reference as reported by the rendering backend.
    ///
    /// Accepts proj4 strings and `epsg:N` / `+init=epsg:N` for the codes known
    /// to [`resolve_srs`].
    pub fn from_srs(srs: &str) -> Result<Self, ProjectionError> {
        let definition = resolve_srs(srs)?;

        let strategy = if is_lon_lat(&definition) {
            Strategy::LonLat
        } else if is_spherical_mercator(&definition) {
            Strategy::SphericalMercator
        } else {
            let source = Proj::from_proj_string(WGS84_PROJ).map_err(|e| ProjectionError::Invalid {
                srs: WGS84_PROJ.to_string(),
                reason: format!("{e:?}"),
            })?;
            let target =
                Proj::from_proj_string(&definition).map_err(|e| ProjectionError::Invalid {
                    srs: srs.to_string(),
                    reason: format!("{e:?}"),
                })?;
            Strategy::Proj4 {
                source: Box::new(source),
                target: Box::new(target),
            }
        };

        Ok(Self {
            srs: srs.trim().to_string(),
            strategy,
        })
    }

    /// Spherical mercator projection (EPSG:3857).
    pub fn web_mercator() -> Self {
        Self {
            srs: format!("epsg:{EPSG_WEB_MERCATOR}"),
            strategy: Strategy::SphericalMercator,
        }
    }

    /// The spatial reference this projection was built from.
    pub fn srs(&self) -> &str {
        &self.srs
    }

    /// True if map units are degrees.
    pub fn is_geographic(&self) -> bool {
        matches!(self.strategy, Strategy::LonLat)
    }

    /// Project a geographic coordinate into map units.
    pub fn forward(&self, lat_lng: LatLng) -> Result<MapPoint, ProjectionError> {
        match &self.strategy {
            Strategy::LonLat => Ok(MapPoint::new(lat_lng.lng, lat_lng.lat)),
            Strategy::SphericalMercator => Ok(mercator_forward(lat_lng)),
            Strategy::Proj4 { source, target } => {
                let mut point = (lat_lng.lng.to_radians(), lat_lng.lat.to_radians(), 0.0);
                proj4rs::transform::transform(source, target, &mut point).map_err(|e| {
                    ProjectionError::Transform {
                        lat: lat_lng.lat,
                        lng: lat_lng.lng,
                        reason: format!("{e:?}"),
                    }
                })?;
                Ok(MapPoint::new(point.0, point.1))
            }
        }
    }
}

#[inline]
fn mercator_forward(lat_lng: LatLng) -> MapPoint {
    let x = EARTH_RADIUS * lat_lng.lng.to_radians();
    let y = EARTH_RADIUS * (PI / 4.0 + lat_lng.lat.to_radians() / 2.0).tan().ln();
    MapPoint::new(x, y)
}

fn proj_param<'a>(definition: &'a str, key: &str) -> Option<&'a str> {
    definition.split_whitespace().find_map(|token| {
        let token = token.strip_prefix('+')?;
        let (k, v) = token.split_once('=')?;
        (k == key).then_some(v)
    })
}

fn is_lon_lat(definition: &str) -> bool {
    matches!(
        proj_param(definition, "proj"),
        Some("longlat") | Some("latlong") | Some("lonlat") | Some("latlon")
    )
}

/// Matches both the `+proj=merc +a=+b=` sphere form and `+proj=webmerc`.
fn is_spherical_mercator(definition: &str) -> bool {
    match proj_param(definition, "proj") {
        Some("webmerc") => true,
        Some("merc") => {
            let a = proj_param(definition, "a").and_then(|v| v.parse::<f64>().ok());
            let b = proj_param(definition, "b").and_then(|v| v.parse::<f64>().ok());
            let offsets_zero = ["lon_0", "x_0", "y_0", "lat_ts"]
                .iter()
                .all(|k| proj_param(definition, k).map_or(true, |v| v.parse::<f64>() == Ok(0.0)));
            let unit_scale = proj_param(definition, "k").map_or(true, |v| v.parse::<f64>() == Ok(1.0));
            a == Some(EARTH_RADIUS) && b == Some(EARTH_RADIUS) && offsets_zero && unit_scale
        }
        _ => false,
    }
}
