//! Error types for the logging core

pub type Result<T> = std::result::Result<T, LoggerError>;

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// IO error with context
    #[error("IO error while {operation}: {message}")]
    IoOperation {
        operation: String,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Generic IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Log file could not be opened
    #[error("Failed to open log file '{path}': {message}")]
    FileOpen { path: String, message: String },

    /// Writer used before init or after terminate
    #[error("File writer is not open")]
    WriterClosed,

    /// Invalid configuration with details
    #[error("Invalid configuration for {component}: {message}")]
    InvalidConfiguration { component: String, message: String },
}

impl LoggerError {
    /// Create an IO operation error with context
    pub fn io_operation(
        operation: impl Into<String>,
        message: impl Into<String>,
        source: std::io::Error,
    ) -> Self {
        LoggerError::IoOperation {
            operation: operation.into(),
            message: message.into(),
            source,
        }
    }

    /// Create a file open error
    pub fn file_open(path: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::FileOpen {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create an invalid configuration error
    pub fn config(component: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::InvalidConfiguration {
            component: component.into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = LoggerError::file_open("/var/log/app-1.log", "Permission denied");
        assert!(matches!(err, LoggerError::FileOpen { .. }));

        let err = LoggerError::config("WorkerPool", "worker count must be nonzero");
        assert!(matches!(err, LoggerError::InvalidConfiguration { .. }));
    }

    #[test]
    fn test_error_display() {
        let err = LoggerError::file_open("/var/log/app-1.log", "Disk full");
        assert_eq!(
            err.to_string(),
            "Failed to open log file '/var/log/app-1.log': Disk full"
        );

        assert_eq!(LoggerError::WriterClosed.to_string(), "File writer is not open");
    }

    #[test]
    fn test_io_operation_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let err = LoggerError::io_operation("opening log file", "cannot create directory", io_err);

        assert!(matches!(err, LoggerError::IoOperation { .. }));
        assert!(err.to_string().contains("opening log file"));
        assert!(err.to_string().contains("cannot create directory"));
    }
}
