//! MongoDB Operation Results
//!
//! This library turns decoded server replies into a uniform operation result
//! that query execution, write operations and command execution can inspect
//! the same way.
//!
//! # Modules
//!
//! - `config`: Configuration management
//! - `error`: Error types and handling
//! - `logging`: Tracing subscriber setup
//! - `operation`: Operation results and status interpretation
//! - `protocol`: Decoded reply values
//!
//! # Example
//!
//! ```
//! use bson::doc;
//! use mongo_opresult::{OperationResult, Reply};
//!
//! let result = OperationResult::new(Some(Reply::new(vec![doc! { "ok": 1, "n": 2 }])));
//! assert!(result.acknowledged());
//! assert!(result.successful());
//! assert_eq!(result.returned_count(), 1);
//! assert_eq!(result.written_count(), 2);
//!
//! let unacknowledged = OperationResult::new(None);
//! assert!(!unacknowledged.acknowledged());
//! assert!(unacknowledged.successful());
//! ```

pub mod config;
pub mod error;
pub mod logging;
pub mod operation;
pub mod protocol;

// Re-export commonly used types
pub use config::{Config, InterpretationConfig};
pub use error::{ErrorInfo, OpResultError, Result};
pub use operation::{OkStatus, OperationResult, ResultSummary, coerce_ok};
pub use protocol::{Reply, ReplyFlag, ReplyFlags};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get library version string
///
/// # Returns
/// * `&str` - Version string
pub fn version() -> &'static str {
    VERSION
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!version().is_empty());
    }
}
