//! Tracing library adapter implementation.

use crate::log::{LogLevel, Logger};
use std::fmt::Arguments;

/// Logger implementation that forwards to the `tracing` crate.
///
/// Output destinations are decided by whatever subscriber is installed,
/// normally the one from [`crate::logging::init_logging`].
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl TracingLogger {
    pub fn new() -> Self {
        Self
    }
}

impl Logger for TracingLogger {
    fn log(&self, level: LogLevel, args: Arguments<'_>) {
        match level {
            LogLevel::Trace => tracing::trace!(target: "invar", "{}", args),
            LogLevel::Debug => tracing::debug!(target: "invar", "{}", args),
            LogLevel::Info => tracing::info!(target: "invar", "{}", args),
            LogLevel::Warn => tracing::warn!(target: "invar", "{}", args),
            LogLevel::Error => tracing::error!(target: "invar", "{}", args),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tracing_logger_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<TracingLogger>();
    }

    #[test]
    fn test_tracing_logger_without_subscriber() {
        // No subscriber installed: events are dropped, nothing panics.
        let logger: Box<dyn Logger> = Box::new(TracingLogger::new());
        logger.info(format_args!("Rendering {}", "a.png"));
        logger.warn(format_args!("slow render"));
    }
}
