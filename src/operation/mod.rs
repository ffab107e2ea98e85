//! Operation results
//!
//! This module turns zero or more decoded replies into one uniform view:
//! - OperationResult: acknowledgment, success, counters and documents
//! - OkStatus / coerce_ok: interpretation of the `ok` status field
//! - ResultSummary: serializable snapshot for logging and display

pub mod result;
pub mod status;
pub mod summary;

pub use result::{Iter, OperationResult};
pub use status::{OkStatus, coerce_ok, count_value};
pub use summary::ResultSummary;
