//! Interaction grid output.
//!
//! Tiles can ship with a companion UTFGrid so web clients can resolve hover
//! and click targets without asking the server. The grid is written next to
//! the image as `<stem>.grid.json` and wrapped in a `grid(...)` call so it can
//! be loaded as JSONP.

mod utfgrid;

pub use utfgrid::{codepoint_for_index, encode_utfgrid};

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Suffix replacing the image extension for grid companions.
pub const GRID_SUFFIX: &str = ".grid.json";

/// JSONP callback wrapping the grid payload.
pub const JSONP_CALLBACK: &str = "grid";

/// Layer rendered into the grid.
pub const GRID_LAYER: usize = 0;

/// Grid cells are sampled every `GRID_RESOLUTION` pixels.
pub const GRID_RESOLUTION: u32 = 4;

/// Companion path for `image_path`: `/out/0/0/1.png` → `/out/0/0/1.grid.json`.
pub fn companion_path(image_path: &Path) -> PathBuf {
    let stem = image_path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    image_path.with_file_name(format!("{stem}{GRID_SUFFIX}"))
}

/// `grid(<json>)`
pub fn jsonp_payload(grid: &serde_json::Value) -> String {
    format!("{JSONP_CALLBACK}({grid})")
}

/// Write `grid` as JSONP to `path`.
pub fn write_companion(path: &Path, grid: &serde_json::Value) -> io::Result<()> {
    fs::write(path, jsonp_payload(grid))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_companion_path_replaces_extension() {
        assert_eq!(
            companion_path(Path::new("/out/0/0/1.png")),
            PathBuf::from("/out/0/0/1.grid.json")
        );
    }

    #[test]
    fn test_companion_path_only_strips_last_extension() {
        assert_eq!(
            companion_path(Path::new("tiles/a.b.jpeg")),
            PathBuf::from("tiles/a.b.grid.json")
        );
    }

    #[test]
    fn test_companion_path_without_extension() {
        assert_eq!(
            companion_path(Path::new("/out/tile")),
            PathBuf::from("/out/tile.grid.json")
        );
    }

    #[test]
    fn test_jsonp_payload_wraps_json() {
        let payload = jsonp_payload(&json!({"grid": [" "], "keys": [""], "data": {}}));
        assert!(payload.starts_with("grid("));
        assert!(payload.ends_with(')'));

        let inner = &payload["grid(".len()..payload.len() - 1];
        let parsed: serde_json::Value = serde_json::from_str(inner).unwrap();
        assert_eq!(parsed["keys"][0], "");
    }

    #[test]
    fn test_write_companion() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("1.grid.json");
        write_companion(&path, &json!({"keys": []})).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content, r#"grid({"keys":[]})"#);
    }
}
