//! Invar - parallel map tile and frame rendering
//!
//! Drains queues of render jobs with a pool of independent workers. Each job
//! is a slippy-map tile or a frame centred on a point. Workers turn it into a
//! bounding box in the style's native projection and hand that to a
//! [`RenderBackend`](backend::RenderBackend), which does the actual drawing.
//!
//! # High-Level API
//!
//! ```ignore
//! use invar::config::RenderConfig;
//! use invar::job::RenderJob;
//! use invar::queue::JobQueueSet;
//! use invar::worker::WorkerPool;
//! use std::sync::Arc;
//!
//! let queues = JobQueueSet::from_batches([vec![
//!     RenderJob::tile("tiles/2/0/0.png", 0, 0, 2),
//!     RenderJob::frame("frames/london.png", 51.5074, -0.1278, 12),
//! ]]);
//!
//! let report = WorkerPool::new(Arc::new(backend), RenderConfig::new("osm.xml"), queues)
//!     .with_workers(4)
//!     .run()?;
//! assert_eq!(report.completion(), 1.0);
//! ```

pub mod backend;
pub mod config;
pub mod coord;
pub mod error;
pub mod grid;
pub mod job;
pub mod log;
pub mod logging;
pub mod progress;
pub mod projection;
pub mod queue;
pub mod strategy;
pub mod worker;

pub use error::{ErrorKind, RenderError};

/// Version of the invar library.
///
/// The version is defined in `Cargo.toml` and injected at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
