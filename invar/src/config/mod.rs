//! Configuration for render runs.
//!
//! - [`RenderConfig`]: immutable per-run render settings handed to every
//!   worker (canvas, buffer, file type, style, skip policy, grid options)
//! - [`ConfigFile`]: optional INI file that produces a `RenderConfig`, the
//!   progress options and the worker count
//!
//! # Example
//!
//! ```
//! use invar::config::{GridOptions, RenderConfig};
//!
//! let config = RenderConfig::new("style.xml")
//!     .with_size(512, 512)
//!     .with_file_type("png256")
//!     .with_grid(GridOptions::new().with_fields(["NAME"]));
//!
//! assert_eq!(config.buffer_size(), 512);
//! assert!(config.validate().is_ok());
//! ```

mod defaults;
mod file;
mod parser;
mod render;

pub use defaults::*;
pub use file::{ConfigFile, ConfigFileError};
pub use render::{GridOptions, RenderConfig};
