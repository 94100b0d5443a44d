//! INI parsing for [`ConfigFile`].

use ini::Ini;
use std::str::FromStr;
use std::time::Duration;

use super::file::{ConfigFile, ConfigFileError};
use super::render::GridOptions;
use crate::coord::MAX_SUPPORTED_ZOOM;

/// Parse an `Ini` object into a `ConfigFile`.
///
/// Starts from `ConfigFile::default()` and overlays any values found in the INI.
pub(super) fn parse_ini(ini: &Ini) -> Result<ConfigFile, ConfigFileError> {
    let mut config = ConfigFile::default();

    // [render] section
    if let Some(section) = ini.section(Some("render")) {
        let mut width = config.render.width();
        let mut height = config.render.height();
        if let Some(v) = section.get("width") {
            width = parse_number("render", "width", v)?;
        }
        if let Some(v) = section.get("height") {
            height = parse_number("render", "height", v)?;
        }
        if width == 0 || height == 0 {
            let (key, value) = if width == 0 {
                ("width", width)
            } else {
                ("height", height)
            };
            return Err(invalid("render", key, &value.to_string(), "must be greater than 0"));
        }
        config.render = config.render.with_size(width, height);

        if let Some(v) = section.get("buffer_size") {
            let buffer: u32 = parse_number("render", "buffer_size", v)?;
            config.render = config.render.with_buffer_size(buffer);
        }
        if let Some(v) = section.get("file_type") {
            let v = v.trim();
            if v.is_empty() {
                return Err(invalid("render", "file_type", v, "must not be empty"));
            }
            config.render = config.render.with_file_type(v);
        }
        if let Some(v) = section.get("style") {
            let v = v.trim();
            if !v.is_empty() {
                config.render = config.render.with_style_path(v);
            }
        }
        if let Some(v) = section.get("skip_existing") {
            config.render = config.render.with_skip_existing(parse_bool(v));
        }
        if let Some(v) = section.get("strict_style") {
            config.render = config.render.with_strict_style(parse_bool(v));
        }
        if let Some(v) = section.get("max_zoom") {
            let zoom: u8 = parse_number("render", "max_zoom", v)?;
            if zoom > MAX_SUPPORTED_ZOOM {
                return Err(invalid(
                    "render",
                    "max_zoom",
                    v,
                    &format!("must be at most {}", MAX_SUPPORTED_ZOOM),
                ));
            }
            config.max_zoom = zoom;
        }
    }

    // [grid] section
    if let Some(section) = ini.section(Some("grid")) {
        let enabled = section.get("enabled").map(parse_bool).unwrap_or(true);
        if enabled {
            let mut grid = GridOptions::new();
            if let Some(v) = section.get("key") {
                let v = v.trim();
                if !v.is_empty() {
                    grid = grid.with_key(v);
                }
            }
            if let Some(v) = section.get("fields") {
                grid = grid.with_fields(parse_list(v));
            }
            config.render = config.render.with_grid(grid);
        }
    }

    // [progress] section
    if let Some(section) = ini.section(Some("progress")) {
        if let Some(v) = section.get("enabled") {
            config.progress.enabled = parse_bool(v);
        }
        if let Some(v) = section.get("interval_secs") {
            let secs: u64 = parse_number("progress", "interval_secs", v)?;
            config.progress.interval = Duration::from_secs(secs);
        }
        if let Some(v) = section.get("total_jobs") {
            let v = v.trim();
            if !v.is_empty() {
                config.progress.total_jobs = Some(parse_number("progress", "total_jobs", v)?);
            }
        }
    }

    // [workers] section
    if let Some(section) = ini.section(Some("workers")) {
        if let Some(v) = section.get("count") {
            let count: usize = parse_number("workers", "count", v)?;
            if count == 0 {
                return Err(invalid("workers", "count", v, "must be at least 1"));
            }
            config.workers = count;
        }
    }

    Ok(config)
}

fn parse_number<T: FromStr>(section: &str, key: &str, value: &str) -> Result<T, ConfigFileError> {
    value
        .trim()
        .parse()
        .map_err(|_| invalid(section, key, value, "must be a non-negative integer"))
}

fn invalid(section: &str, key: &str, value: &str, reason: &str) -> ConfigFileError {
    ConfigFileError::InvalidValue {
        section: section.to_string(),
        key: key.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Parse a comma-separated list, dropping empty entries.
pub(super) fn parse_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Parse a boolean value from a string.
pub(super) fn parse_bool(value: &str) -> bool {
    let v = value.trim().to_lowercase();
    v == "true" || v == "1" || v == "yes" || v == "on"
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_GRID_KEY;
    use std::path::Path;

    fn parse(content: &str) -> Result<ConfigFile, ConfigFileError> {
        ConfigFile::parse(content)
    }

    #[test]
    fn test_parse_bool() {
        for v in ["true", "TRUE", "1", "yes", " on "] {
            assert!(parse_bool(v), "{v}");
        }
        for v in ["false", "0", "no", "off", ""] {
            assert!(!parse_bool(v), "{v}");
        }
    }

    #[test]
    fn test_parse_list() {
        assert_eq!(parse_list("NAME, pop ,,id"), vec!["NAME", "pop", "id"]);
        assert!(parse_list(" ").is_empty());
    }

    #[test]
    fn test_render_section() {
        let config = parse(
            "[render]\nwidth = 1024\nheight = 768\nbuffer_size = 64\nfile_type = jpeg\nstyle = /srv/style.xml\nskip_existing = true\nmax_zoom = 20\n",
        )
        .unwrap();

        assert_eq!(config.render.width(), 1024);
        assert_eq!(config.render.height(), 768);
        assert_eq!(config.render.buffer_size(), 64);
        assert_eq!(config.render.file_type(), "jpeg");
        assert_eq!(config.render.style_path(), Path::new("/srv/style.xml"));
        assert!(config.render.skip_existing());
        assert_eq!(config.max_zoom, 20);
    }

    #[test]
    fn test_grid_section() {
        let config = parse("[grid]\nkey = osm_id\nfields = name,population\n").unwrap();
        let grid = config.render.grid().unwrap();
        assert_eq!(grid.key_field(), "osm_id");
        assert_eq!(grid.fields(), ["name".to_string(), "population".to_string()]);

        let config = parse("[grid]\nenabled = false\nkey = osm_id\n").unwrap();
        assert!(config.render.grid().is_none());

        let config = parse("[grid]\n").unwrap();
        assert_eq!(config.render.grid().unwrap().key_field(), DEFAULT_GRID_KEY);
    }

    #[test]
    fn test_progress_and_workers_sections() {
        let config = parse(
            "[progress]\nenabled = on\ninterval_secs = 2\ntotal_jobs = 1500\n\n[workers]\ncount = 3\n",
        )
        .unwrap();
        assert!(config.progress.enabled);
        assert_eq!(config.progress.interval, Duration::from_secs(2));
        assert_eq!(config.progress.total_jobs, Some(1500));
        assert_eq!(config.workers, 3);
    }

    #[test]
    fn test_invalid_values() {
        let err = parse("[render]\nwidth = wide\n").unwrap_err();
        match err {
            ConfigFileError::InvalidValue { section, key, value, .. } => {
                assert_eq!(section, "render");
                assert_eq!(key, "width");
                assert_eq!(value, "wide");
            }
            other => panic!("unexpected error: {other}"),
        }

        assert!(parse("[render]\nheight = 0\n").is_err());
        assert!(parse("[render]\nmax_zoom = 31\n").is_err());
        assert!(parse("[workers]\ncount = 0\n").is_err());
        assert!(parse("[progress]\ninterval_secs = -1\n").is_err());
    }
}
