//! Spatial reference string resolution.

use super::ProjectionError;

/// WGS84 geographic
pub const EPSG_WGS84: u32 = 4326;
/// Web Mercator
pub const EPSG_WEB_MERCATOR: u32 = 3857;
/// Legacy Google alias of 3857
pub const EPSG_GOOGLE: u32 = 900913;
/// Ellipsoidal World Mercator
pub const EPSG_WORLD_MERCATOR: u32 = 3395;

fn epsg_definition(code: u32) -> Option<&'static str> {
    match code {
        EPSG_WGS84 => Some("+proj=longlat +datum=WGS84 +no_defs"),
        EPSG_WEB_MERCATOR | EPSG_GOOGLE => Some(
            "+proj=merc +a=6378137 +b=6378137 +lat_ts=0 +lon_0=0 +x_0=0 +y_0=0 +k=1 +units=m +no_defs",
        ),
        EPSG_WORLD_MERCATOR => {
            Some("+proj=merc +lon_0=0 +k=1 +x_0=0 +y_0=0 +datum=WGS84 +units=m +no_defs")
        }
        _ => None,
    }
}

/// Turn a backend-reported spatial reference into a proj4 definition.
///
/// `epsg:N` and `+init=epsg:N` (case-insensitive) are expanded, other
/// `+proj=` strings are returned trimmed.
pub fn resolve_srs(srs: &str) -> Result<String, ProjectionError> {
    let trimmed = srs.trim();
    if trimmed.is_empty() {
        return Err(ProjectionError::Empty);
    }

    let lowered = trimmed.to_ascii_lowercase();
    let code = lowered
        .strip_prefix("+init=epsg:")
        .or_else(|| lowered.strip_prefix("epsg:"));

    if let Some(code) = code {
        let code = code.split_whitespace().next().unwrap_or_default();
        return code
            .parse::<u32>()
            .ok()
            .and_then(epsg_definition)
            .map(str::to_string)
            .ok_or_else(|| ProjectionError::UnknownEpsg(trimmed.to_string()));
    }

    if !trimmed.contains("+proj=") {
        return Err(ProjectionError::Invalid {
            srs: trimmed.to_string(),
            reason: "expected a proj4 definition or epsg code".to_string(),
        });
    }

    Ok(trimmed.to_string())
}
