//! Log sinks the verifier writes to

use std::sync::Mutex;
use tracing::{debug, info, trace, warn};

use crate::types::LogLevel;

/// Destination for log messages
///
/// `html` marks the message as already-formatted markup that a report
/// renderer must not escape again.
pub trait LogSink: Send + Sync {
    fn write(&self, level: LogLevel, message: &str, html: bool);
}

/// Sink that forwards to `tracing`, recording the `html` flag as a field
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl LogSink for TracingSink {
    fn write(&self, level: LogLevel, message: &str, html: bool) {
        match level {
            LogLevel::Trace => trace!(html, "{}", message),
            LogLevel::Debug => debug!(html, "{}", message),
            LogLevel::Info => info!(html, "{}", message),
            LogLevel::Warn => warn!(html, "{}", message),
        }
    }
}

/// A message captured by `MemorySink`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRecord {
    pub level: LogLevel,
    pub message: String,
    pub html: bool,
}

/// Sink that keeps every record in memory
#[derive(Debug, Default)]
pub struct MemorySink {
    records: Mutex<Vec<LogRecord>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything written so far
    pub fn records(&self) -> Vec<LogRecord> {
        self.records
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Records written at `level`
    pub fn records_at(&self, level: LogLevel) -> Vec<LogRecord> {
        self.records()
            .into_iter()
            .filter(|r| r.level == level)
            .collect()
    }

    pub fn clear(&self) {
        self.records
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clear();
    }
}

impl LogSink for MemorySink {
    fn write(&self, level: LogLevel, message: &str, html: bool) {
        self.records
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(LogRecord {
                level,
                message: message.to_string(),
                html,
            });
    }
}

#[cfg(test)]
#[path = "logger_test.rs"]
mod logger_test;
