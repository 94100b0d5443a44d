//! In-memory logger that records every message.

use crate::log::{LogLevel, Logger};
use parking_lot::Mutex;
use std::fmt::Arguments;

/// A single captured log line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRecord {
    pub level: LogLevel,
    pub message: String,
}

/// Logger that keeps every record in memory.
///
/// Used by tests to assert which outputs a worker rendered or skipped.
#[derive(Debug, Default)]
pub struct MemoryLogger {
    records: Mutex<Vec<LogRecord>>,
}

impl MemoryLogger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all records captured so far.
    pub fn records(&self) -> Vec<LogRecord> {
        self.records.lock().clone()
    }

    /// Messages logged at exactly `level`.
    pub fn messages_at(&self, level: LogLevel) -> Vec<String> {
        self.records
            .lock()
            .iter()
            .filter(|r| r.level == level)
            .map(|r| r.message.clone())
            .collect()
    }

    /// True if any record contains `needle`.
    pub fn contains(&self, needle: &str) -> bool {
        self.records.lock().iter().any(|r| r.message.contains(needle))
    }
}

impl Logger for MemoryLogger {
    fn log(&self, level: LogLevel, args: Arguments<'_>) {
        self.records.lock().push(LogRecord {
            level,
            message: args.to_string(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{log_info, log_warn};

    #[test]
    fn test_records_messages_in_order() {
        let logger = MemoryLogger::new();
        log_info!(logger, "Rendering {}", "a.png");
        log_warn!(logger, "Skipping {}", "b.png");

        let records = logger.records();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].message, "Rendering a.png");
        assert_eq!(records[1].level, LogLevel::Warn);
    }

    #[test]
    fn test_messages_at_filters_by_level() {
        let logger = MemoryLogger::new();
        log_info!(logger, "one");
        log_warn!(logger, "two");
        log_info!(logger, "three");

        assert_eq!(logger.messages_at(LogLevel::Info), vec!["one", "three"]);
        assert!(logger.contains("two"));
        assert!(!logger.contains("four"));
    }

    #[test]
    fn test_log_job_switches_level() {
        let logger = MemoryLogger::new();
        crate::log_job!(logger, false, "loud");
        crate::log_job!(logger, true, "quiet");

        assert_eq!(logger.messages_at(LogLevel::Info), vec!["loud"]);
        assert_eq!(logger.messages_at(LogLevel::Debug), vec!["quiet"]);
    }
}
