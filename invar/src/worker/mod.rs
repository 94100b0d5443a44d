//! Render worker pool.
//!
//! A [`WorkerPool`] spawns one OS thread per worker. Every worker:
//!
//! 1. **Init**: creates its own map context from the backend, loads the
//!    style, applies the buffer size and parses the native spatial reference.
//!    A failure here stops only that worker.
//! 2. **Running**: pops jobs from the shared [`JobQueueSet`] until a full scan
//!    finds every queue empty, skipping existing outputs when configured and
//!    acknowledging every job it took.
//! 3. **Terminated**: hands its [`WorkerReport`] back to the pool.
//!
//! Workers never wait on each other; the queue set is the only shared
//! mutable state.
//!
//! [`JobQueueSet`]: crate::queue::JobQueueSet

mod pool;
mod report;
mod runner;

pub use pool::WorkerPool;
pub use report::{PoolReport, WorkerFailure, WorkerPhase, WorkerReport};
pub use runner::{Worker, WorkerShared};
