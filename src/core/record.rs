//! Queued task types
//!
//! A task is one unit of queued work: either a finalized log record to emit,
//! or a flush boundary for the console stream. The two are a single sum type
//! matched exhaustively in the worker loop.

use super::log_level::LogLevel;

/// A finalized log record handed off by a logger facade.
///
/// The byte payload is already rendered; this core never formats. Routing
/// flags select the console sink, the file sink registered under
/// `sender_id`, or both. Immutable once constructed.
#[derive(Debug, Clone)]
pub struct LogRecord {
    /// Correlates the record with the file sink of its owning logger instance
    pub sender_id: u64,
    /// Rendered payload, written verbatim to the selected sinks
    pub bytes: Vec<u8>,
    pub to_console: bool,
    pub to_file: bool,
    /// Bracket console output in color codes keyed by `level`
    pub colorize: bool,
    pub level: LogLevel,
}

impl LogRecord {
    pub fn new(sender_id: u64, bytes: Vec<u8>, level: LogLevel) -> Self {
        Self {
            sender_id,
            bytes,
            to_console: false,
            to_file: false,
            colorize: false,
            level,
        }
    }

    #[must_use]
    pub fn to_console(mut self, enabled: bool) -> Self {
        self.to_console = enabled;
        self
    }

    #[must_use]
    pub fn to_file(mut self, enabled: bool) -> Self {
        self.to_file = enabled;
        self
    }

    #[must_use]
    pub fn colorize(mut self, enabled: bool) -> Self {
        self.colorize = enabled;
        self
    }
}

/// One unit of queued work
#[derive(Debug, Clone)]
pub enum Task {
    /// Emit a log record to its selected sinks
    Record(LogRecord),
    /// Flush the console stream
    Flush,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_builder_flags() {
        let record = LogRecord::new(3, b"hello".to_vec(), LogLevel::Warn)
            .to_console(true)
            .to_file(true)
            .colorize(true);

        assert_eq!(record.sender_id, 3);
        assert_eq!(record.bytes, b"hello");
        assert!(record.to_console);
        assert!(record.to_file);
        assert!(record.colorize);
        assert_eq!(record.level, LogLevel::Warn);
    }

    #[test]
    fn test_record_defaults() {
        let record = LogRecord::new(0, Vec::new(), LogLevel::Info);
        assert!(!record.to_console);
        assert!(!record.to_file);
        assert!(!record.colorize);
    }
}
