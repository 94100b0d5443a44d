//! Default values and limits for configuration settings.

use std::time::Duration;

/// Default canvas width and height in pixels.
pub const DEFAULT_TILE_WIDTH: u32 = 256;
pub const DEFAULT_TILE_HEIGHT: u32 = 256;

/// Largest canvas edge accepted by validation.
pub const MAX_CANVAS_SIZE: u32 = 16_384;

/// Default output format passed to the backend's encoder.
pub const DEFAULT_FILE_TYPE: &str = "png";

/// Style loaded when none is configured.
pub const DEFAULT_STYLE_PATH: &str = "style.xml";

/// Grid key attribute when none is configured.
pub const DEFAULT_GRID_KEY: &str = "__id__";

/// Minimum time between two progress samples of one worker.
pub const DEFAULT_PROGRESS_INTERVAL: Duration = Duration::from_secs(30);

/// Width of the progress bar in characters.
pub const PROGRESS_BAR_WIDTH: usize = 50;

/// Number of available CPU cores.
pub fn num_cpus() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(4)
}

/// One render worker per core.
pub fn default_worker_count() -> usize {
    num_cpus()
}
