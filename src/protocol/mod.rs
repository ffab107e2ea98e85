//! Decoded server replies
//!
//! This module defines the reply value handed over by the message decoder:
//! - Reply: cursor metadata plus a decoded document batch
//! - ReplyFlag / ReplyFlags: the OP_REPLY response flag set
//!
//! Socket I/O and message framing happen upstream; a `Reply` is always
//! built from already-decoded parts.

pub mod flags;
pub mod reply;

pub use flags::{ReplyFlag, ReplyFlags};
pub use reply::Reply;
