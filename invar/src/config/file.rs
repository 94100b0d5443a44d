//! INI configuration file for render runs.
//!
//! Values are overlaid on the defaults by [`super::parser`]. A missing file
//! yields the defaults.

use ini::Ini;
use std::path::Path;
use thiserror::Error;

use super::defaults::default_worker_count;
use super::render::RenderConfig;
use crate::coord::DEFAULT_MAX_ZOOM;
use crate::progress::ProgressOptions;

/// Configuration file errors.
#[derive(Debug, Error)]
pub enum ConfigFileError {
    /// Failed to read config file
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] ini::Error),

    /// Invalid configuration value
    #[error("Invalid configuration: {section}.{key} = '{value}' - {reason}")]
    InvalidValue {
        section: String,
        key: String,
        value: String,
        reason: String,
    },
}

/// Everything a render run reads from its config file.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigFile {
    pub render: RenderConfig,
    pub progress: ProgressOptions,
    pub workers: usize,
    pub max_zoom: u8,
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            render: RenderConfig::default(),
            progress: ProgressOptions::default(),
            workers: default_worker_count(),
            max_zoom: DEFAULT_MAX_ZOOM,
        }
    }
}

impl ConfigFile {
    /// Load configuration from a specific path.
    ///
    /// If the file doesn't exist, returns defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigFileError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let ini = Ini::load_from_file(path)?;
        super::parser::parse_ini(&ini)
    }

    /// Parse configuration from INI text.
    pub fn parse(content: &str) -> Result<Self, ConfigFileError> {
        let ini = Ini::load_from_str(content).map_err(ini::Error::Parse)?;
        super::parser::parse_ini(&ini)
    }
}
