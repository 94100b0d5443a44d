//! Render settings shared by all workers.

use super::defaults::*;
use crate::error::RenderError;
use std::path::{Path, PathBuf};

/// Interaction grid settings.
///
/// The grid key falls back to [`DEFAULT_GRID_KEY`] when unset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GridOptions {
    key: Option<String>,
    fields: Vec<String>,
}

impl GridOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attribute that identifies features in the grid.
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Attributes copied into the grid's feature data.
    pub fn with_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields = fields.into_iter().map(Into::into).collect();
        self
    }

    /// Key attribute actually used for rendering.
    pub fn key_field(&self) -> &str {
        self.key.as_deref().unwrap_or(DEFAULT_GRID_KEY)
    }

    /// Explicitly configured key, if any.
    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    pub fn fields(&self) -> &[String] {
        &self.fields
    }
}

/// Immutable render settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderConfig {
    width: u32,
    height: u32,
    buffer_size: Option<u32>,
    file_type: String,
    skip_existing: bool,
    style_path: PathBuf,
    strict_style: bool,
    grid: Option<GridOptions>,
}

impl RenderConfig {
    /// 256×256 PNG tiles from `style_path`.
    pub fn new(style_path: impl Into<PathBuf>) -> Self {
        Self {
            width: DEFAULT_TILE_WIDTH,
            height: DEFAULT_TILE_HEIGHT,
            buffer_size: None,
            file_type: DEFAULT_FILE_TYPE.to_string(),
            skip_existing: false,
            style_path: style_path.into(),
            strict_style: true,
            grid: None,
        }
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Override the render buffer; defaults to `max(width, height)`.
    pub fn with_buffer_size(mut self, buffer_size: u32) -> Self {
        self.buffer_size = Some(buffer_size);
        self
    }

    pub fn with_file_type(mut self, file_type: impl Into<String>) -> Self {
        self.file_type = file_type.into();
        self
    }

    /// Leave jobs whose output file already exists untouched.
    pub fn with_skip_existing(mut self, skip: bool) -> Self {
        self.skip_existing = skip;
        self
    }

    pub fn with_style_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.style_path = path.into();
        self
    }

    /// Whether the backend should reject unknown style properties.
    pub fn with_strict_style(mut self, strict: bool) -> Self {
        self.strict_style = strict;
        self
    }

    /// Also write an interaction grid next to every tile.
    pub fn with_grid(mut self, grid: GridOptions) -> Self {
        self.grid = Some(grid);
        self
    }

    pub fn without_grid(mut self) -> Self {
        self.grid = None;
        self
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn buffer_size(&self) -> u32 {
        self.buffer_size
            .unwrap_or_else(|| self.width.max(self.height))
    }

    pub fn file_type(&self) -> &str {
        &self.file_type
    }

    pub fn skip_existing(&self) -> bool {
        self.skip_existing
    }

    pub fn style_path(&self) -> &Path {
        &self.style_path
    }

    pub fn strict_style(&self) -> bool {
        self.strict_style
    }

    pub fn grid(&self) -> Option<&GridOptions> {
        self.grid.as_ref()
    }

    /// Check settings before any worker starts.
    pub fn validate(&self) -> Result<(), RenderError> {
        if self.width == 0 || self.height == 0 {
            return Err(RenderError::Configuration(format!(
                "canvas size must be non-zero, got {}x{}",
                self.width, self.height
            )));
        }
        if self.width > MAX_CANVAS_SIZE || self.height > MAX_CANVAS_SIZE {
            return Err(RenderError::Configuration(format!(
                "canvas size {}x{} exceeds {}",
                self.width, self.height, MAX_CANVAS_SIZE
            )));
        }
        if self.buffer_size() > MAX_CANVAS_SIZE {
            return Err(RenderError::Configuration(format!(
                "buffer size {} exceeds {}",
                self.buffer_size(),
                MAX_CANVAS_SIZE
            )));
        }
        if self.file_type.trim().is_empty() {
            return Err(RenderError::Configuration("file type is empty".to_string()));
        }
        if self.style_path.as_os_str().is_empty() {
            return Err(RenderError::Configuration("style path is empty".to_string()));
        }
        Ok(())
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self::new(DEFAULT_STYLE_PATH)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_defaults() {
        let config = RenderConfig::default();
        assert_eq!(config.width(), DEFAULT_TILE_WIDTH);
        assert_eq!(config.height(), DEFAULT_TILE_HEIGHT);
        assert_eq!(config.file_type(), "png");
        assert_eq!(config.style_path(), Path::new(DEFAULT_STYLE_PATH));
        assert!(!config.skip_existing());
        assert!(config.strict_style());
        assert!(config.grid().is_none());
    }

    #[test]
    fn test_buffer_size_defaults_to_largest_edge() {
        let config = RenderConfig::new("s.xml").with_size(300, 200);
        assert_eq!(config.buffer_size(), 300);

        let config = RenderConfig::new("s.xml").with_size(100, 640);
        assert_eq!(config.buffer_size(), 640);
    }

    #[test]
    fn test_explicit_buffer_size_wins() {
        let config = RenderConfig::new("s.xml")
            .with_size(256, 256)
            .with_buffer_size(0);
        assert_eq!(config.buffer_size(), 0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_dimensions_are_rejected() {
        let err = RenderConfig::new("s.xml")
            .with_size(0, 256)
            .validate()
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Configuration);
        assert!(err.to_string().contains("0x256"));
    }

    #[test]
    fn test_oversized_canvas_is_rejected() {
        let result = RenderConfig::new("s.xml")
            .with_size(MAX_CANVAS_SIZE + 1, 10)
            .validate();
        assert!(result.is_err());
    }

    #[test]
    fn test_empty_style_or_file_type_rejected() {
        assert!(RenderConfig::new("").validate().is_err());
        assert!(RenderConfig::new("s.xml")
            .with_file_type(" ")
            .validate()
            .is_err());
    }

    #[test]
    fn test_grid_key_default_and_override() {
        let grid = GridOptions::new();
        assert_eq!(grid.key_field(), DEFAULT_GRID_KEY);
        assert!(grid.key().is_none());

        let grid = GridOptions::new().with_key("osm_id").with_fields(["name", "pop"]);
        assert_eq!(grid.key_field(), "osm_id");
        assert_eq!(grid.fields(), ["name".to_string(), "pop".to_string()]);
    }

    #[test]
    fn test_without_grid_clears_options() {
        let config = RenderConfig::new("s.xml")
            .with_grid(GridOptions::new())
            .without_grid();
        assert!(config.grid().is_none());
    }
}
