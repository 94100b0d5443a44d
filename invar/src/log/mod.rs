//! Logging abstraction used by the render workers.
//!
//! Workers, strategies and the pool never call `tracing` directly. They hold an
//! `Arc<dyn Logger>` so tests can swap in a silent or capturing logger and the
//! per-job console chatter (`Rendering ...`, `Skipping ...`) stays assertable.
//!
//! - `Logger`: the interface
//! - `TracingLogger`: production adapter, forwards to `tracing`
//! - `NoOpLogger`: discards everything
//! - `MemoryLogger`: keeps records in memory for assertions
//!
//! ```
//! use invar::log::{Logger, NoOpLogger};
//! use invar::{log_debug, log_info};
//! use std::sync::Arc;
//!
//! let logger: Arc<dyn Logger> = Arc::new(NoOpLogger);
//! log_info!(logger, "Rendering {}", "/tiles/3/2/1.png");
//! log_debug!(logger, "worker {} idle", 0);
//! ```

mod memory;
mod noop;
mod tracing_adapter;
mod r#trait;

pub use memory::{LogRecord, MemoryLogger};
pub use noop::NoOpLogger;
pub use r#trait::{LogLevel, Logger};
pub use tracing_adapter::TracingLogger;
