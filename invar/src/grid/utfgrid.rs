//! UTFGrid encoding.
//!
//! Each grid cell becomes one character. Distinct feature keys get
//! consecutive codepoints starting at 32, skipping `"` (34) and `\` (92) so
//! rows stay valid JSON strings without escaping.

use crate::backend::{BackendError, GridBuffer};
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::HashMap;

#[derive(Debug, Serialize)]
struct UtfGrid {
    grid: Vec<String>,
    keys: Vec<String>,
    data: Map<String, Value>,
}

const SURROGATE_START: u32 = 0xD800;
const SURROGATE_LEN: u32 = 0x800;

/// Codepoint for the `index`-th distinct key.
///
/// Surrogates are skipped; `None` only past U+10FFFF.
pub fn codepoint_for_index(index: u32) -> Option<char> {
    if index > char::MAX as u32 {
        return None;
    }
    let mut codepoint = index + 32;
    if codepoint >= 34 {
        codepoint += 1;
    }
    if codepoint >= 92 {
        codepoint += 1;
    }
    if codepoint >= SURROGATE_START {
        codepoint += SURROGATE_LEN;
    }
    char::from_u32(codepoint)
}

/// Encode `grid` sampling one cell every `resolution` pixels.
///
/// With `include_features`, `data` maps every non-empty key to that
/// feature's attributes.
pub fn encode_utfgrid(
    grid: &GridBuffer,
    resolution: u32,
    include_features: bool,
) -> Result<Value, BackendError> {
    if resolution == 0 {
        return Err(BackendError::Grid("resolution must be at least 1".to_string()));
    }

    let cols = grid.width().div_ceil(resolution);
    let rows = grid.height().div_ceil(resolution);

    let mut keys: Vec<String> = Vec::new();
    let mut codes: HashMap<String, char> = HashMap::new();
    let mut data = Map::new();
    let mut lines = Vec::with_capacity(rows as usize);

    for row in 0..rows {
        let mut line = String::with_capacity(cols as usize);
        for col in 0..cols {
            let feature = grid.feature_at(col * resolution, row * resolution);
            let key = feature.map(|f| f.key.as_str()).unwrap_or("");

            let code = match codes.get(key) {
                Some(code) => *code,
                None => {
                    let code = codepoint_for_index(keys.len() as u32).ok_or_else(|| {
                        BackendError::Grid(format!("too many distinct keys ({})", keys.len()))
                    })?;
                    codes.insert(key.to_string(), code);
                    keys.push(key.to_string());
                    if let (true, Some(feature)) = (include_features, feature) {
                        data.insert(key.to_string(), Value::Object(feature.attributes.clone()));
                    }
                    code
                }
            };
            line.push(code);
        }
        lines.push(line);
    }

    serde_json::to_value(UtfGrid {
        grid: lines,
        keys,
        data,
    })
    .map_err(|e| BackendError::Grid(e.to_string()))
}
