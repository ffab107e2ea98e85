//! Error handling for result interpretation.
//!
//! Interpreting a reply never fails: every accessor on
//! [`OperationResult`](crate::operation::OperationResult) is total. Errors only
//! arise from the opt-in paths:
//! - Explicit validation of a result (`validate`, `validate_with`)
//! - Loading configuration from files or the environment
//!
//! Server failures are reported as structured [`ErrorInfo`] extracted from the
//! command-style reply document, serializable to JSON for logging.
//!
//! # Example
//!
//! ```rust
//! use bson::doc;
//! use mongo_opresult::error::failure::extract_error_info;
//!
//! let info = extract_error_info(&doc! { "ok": 0, "code": 11000, "errmsg": "E11000" });
//! assert_eq!(info.code, Some(11000));
//! assert_eq!(info.code_name.as_deref(), Some("DuplicateKey"));
//! ```

pub mod failure;
pub mod kinds;

// Re-export commonly used types
pub use failure::{ErrorInfo, WriteConcernDetails};
pub use kinds::{ConfigError, OpResultError, Result};
