use std::{fmt, io};

use crate::error::failure::{ErrorInfo, format_operation_failure};

/// Crate-wide `Result` type using [`OpResultError`] as the error.
///
/// This alias is re-exported by the parent `error` module and is intended
/// to be used throughout the crate for fallible operations.
pub type Result<T> = std::result::Result<T, OpResultError>;

/// Top-level error type.
#[derive(Debug)]
pub enum OpResultError {
    /// Configuration errors.
    Config(ConfigError),

    /// The server reported that the operation did not succeed.
    OperationFailure(ErrorInfo),

    /// I/O errors.
    Io(io::Error),
}

/// Configuration-specific errors.
#[derive(Debug)]
pub enum ConfigError {
    /// Config file not found.
    FileNotFound(String),

    /// Invalid config format.
    InvalidFormat(String),

    /// Invalid field value.
    InvalidValue { field: String, value: String },
}

impl OpResultError {
    /// Structured server failure, if this error carries one
    pub fn failure_info(&self) -> Option<&ErrorInfo> {
        match self {
            OpResultError::OperationFailure(info) => Some(info),
            _ => None,
        }
    }
}

/* ========================= Display & Error impls ========================= */

impl fmt::Display for OpResultError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OpResultError::Config(e) => write!(f, "Configuration error: {e}"),
            OpResultError::OperationFailure(info) => format_operation_failure(f, info),
            OpResultError::Io(e) => write!(f, "I/O error: {e}"),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::FileNotFound(path) => write!(f, "Config file not found: {path}"),
            ConfigError::InvalidFormat(msg) => write!(f, "Invalid config format: {msg}"),
            ConfigError::InvalidValue { field, value } => {
                write!(f, "Invalid value '{value}' for field '{field}'")
            }
        }
    }
}

impl std::error::Error for OpResultError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            OpResultError::Config(e) => Some(e),
            OpResultError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl std::error::Error for ConfigError {}

/* ========================= Conversions to OpResultError ========================= */

impl From<io::Error> for OpResultError {
    fn from(err: io::Error) -> Self {
        OpResultError::Io(err)
    }
}

impl From<ConfigError> for OpResultError {
    fn from(err: ConfigError) -> Self {
        OpResultError::Config(err)
    }
}

impl From<ErrorInfo> for OpResultError {
    fn from(info: ErrorInfo) -> Self {
        OpResultError::OperationFailure(info)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let err: OpResultError = ConfigError::InvalidValue {
            field: "logging.level".to_string(),
            value: "loud".to_string(),
        }
        .into();
        assert_eq!(
            err.to_string(),
            "Configuration error: Invalid value 'loud' for field 'logging.level'"
        );
        assert!(err.failure_info().is_none());
    }
}
