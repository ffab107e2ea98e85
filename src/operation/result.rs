//! Operation result types
//!
//! An [`OperationResult`] wraps the replies received for one operation and
//! answers the questions callers ask of them. Every accessor is total: a
//! missing reply, a missing field or an odd `ok` encoding yields the
//! documented default rather than an error.
//!
//! Two reply conventions meet here. Query replies carry plain result
//! documents and report their batch size in the header. Command replies
//! carry one document with an `ok` status and, for writes, an `n` count.
//!
//! With several replies (multi-batch responses) the accessors aggregate:
//! - `cursor_id` comes from the last reply
//! - `documents` is the first reply's batch; `iter`/`each` walk every batch
//! - `returned_count` and `written_count` are summed
//! - `successful` requires every reply to be successful

use std::fmt;

use bson::{Bson, Document};
use tracing::{debug, warn};

use super::status::{OkStatus, coerce_ok, count_value};
use super::summary::ResultSummary;
use crate::config::InterpretationConfig;
use crate::error::failure::extract_error_info;
use crate::error::{ErrorInfo, OpResultError, Result};
use crate::protocol::Reply;

const OK: &str = "ok";
const N: &str = "n";
const WRITE_CONCERN_ERROR: &str = "writeConcernError";

/// Result of one operation
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OperationResult {
    replies: Vec<Reply>,
}

impl OperationResult {
    /// Create a result from the reply of an operation
    ///
    /// # Arguments
    /// * `reply` - The decoded reply, or None when no reply was requested
    ///
    /// # Returns
    /// * `Self` - Result holding zero or one reply
    pub fn new(reply: Option<Reply>) -> Self {
        let replies: Vec<Reply> = reply.into_iter().collect();
        debug!("Operation result created with {} reply(ies)", replies.len());
        Self { replies }
    }

    /// Create a result from several replies, in the order received
    pub fn from_replies(replies: Vec<Reply>) -> Self {
        debug!("Operation result created with {} reply(ies)", replies.len());
        Self { replies }
    }

    pub fn replies(&self) -> &[Reply] {
        &self.replies
    }

    /// First reply, if any was received
    pub fn reply(&self) -> Option<&Reply> {
        self.replies.first()
    }

    /// Whether a reply was received at all
    ///
    /// This says nothing about the outcome: a reply with `ok: 0` is still
    /// acknowledged.
    pub fn acknowledged(&self) -> bool {
        !self.replies.is_empty()
    }

    /// Whether more than one reply was received
    pub fn multiple(&self) -> bool {
        self.replies.len() > 1
    }

    /// Cursor id of the latest reply, or 0 without a reply
    pub fn cursor_id(&self) -> u64 {
        self.replies.last().map_or(0, Reply::cursor_id)
    }

    /// Documents of the first reply, or an empty slice without a reply
    pub fn documents(&self) -> &[Document] {
        self.replies
            .first()
            .map(Reply::documents)
            .unwrap_or_default()
    }

    pub fn first_document(&self) -> Option<&Document> {
        self.replies.first().and_then(Reply::first_document)
    }

    /// Iterate over the documents of every reply
    ///
    /// Each call starts a fresh pass over the same documents.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            replies: self.replies.iter(),
            current: Default::default(),
        }
    }

    /// Pass every document, in order, to `f`
    pub fn each<F>(&self, f: F)
    where
        F: FnMut(&Document),
    {
        self.iter().for_each(f);
    }

    /// Number of documents the server reported as returned
    ///
    /// Mirrors the header's count of top-level documents, so a command reply
    /// counts 1 regardless of any `n` it contains.
    pub fn returned_count(&self) -> u64 {
        self.replies
            .iter()
            .map(|reply| u64::from(reply.number_returned()))
            .fold(0, u64::saturating_add)
    }

    /// Number of documents written, from the `n` field of command replies
    ///
    /// Replies without a usable `n` contribute 0. The total saturates at
    /// `u64::MAX`.
    pub fn written_count(&self) -> u64 {
        self.replies
            .iter()
            .filter_map(Reply::first_document)
            .filter_map(|doc| doc.get(N).and_then(count_value))
            .fold(0, u64::saturating_add)
    }

    /// Whether the operation succeeded
    ///
    /// Unacknowledged operations and plain query replies are successful.
    /// Command replies are successful when `ok` equals one. Reply flags are
    /// not consulted; see [`query_failed`](Self::query_failed).
    pub fn successful(&self) -> bool {
        self.replies.iter().all(reply_successful)
    }

    /// Interpreted `ok` field of the first document, if it has one
    pub fn ok_status(&self) -> Option<OkStatus> {
        self.first_document()
            .and_then(|doc| doc.get(OK))
            .map(coerce_ok)
    }

    /// Whether any reply carries the query-failure flag
    pub fn query_failed(&self) -> bool {
        self.replies.iter().any(Reply::query_failure)
    }

    /// Server error message from the first document, if any
    pub fn error_message(&self) -> Option<String> {
        self.first_document()
            .and_then(|doc| extract_error_info(doc).message)
    }

    pub fn write_concern_error(&self) -> Option<&Document> {
        match self.first_document()?.get(WRITE_CONCERN_ERROR) {
            Some(Bson::Document(wc_error)) => Some(wc_error),
            _ => None,
        }
    }

    /// Check the result with default settings
    ///
    /// # Returns
    /// * `Result<&Self>` - The result itself, or the server failure
    pub fn validate(&self) -> Result<&Self> {
        self.validate_with(&InterpretationConfig::default())
    }

    /// Check the result, failing when it is not successful
    ///
    /// With `strict_ok`, an unrecognised `ok` encoding is reported as such.
    /// With `honor_query_failure`, the reply flag counts as a failure.
    ///
    /// # Arguments
    /// * `config` - Interpretation settings
    ///
    /// # Returns
    /// * `Result<&Self>` - The result itself, or the server failure
    pub fn validate_with(&self, config: &InterpretationConfig) -> Result<&Self> {
        for reply in &self.replies {
            let document = reply.first_document();

            if config.honor_query_failure && reply.query_failure() {
                let info = failure_info(document).or_message("Query failure flag set on reply");
                return Err(operation_failure(info));
            }

            let Some(ok) = document.and_then(|doc| doc.get(OK)) else {
                continue;
            };

            match coerce_ok(ok) {
                OkStatus::Success => {}
                OkStatus::Failure => {
                    let info = failure_info(document).or_message("Command failed");
                    return Err(operation_failure(info));
                }
                OkStatus::Unrecognized if config.strict_ok => {
                    let mut info = failure_info(document);
                    info.message = Some(format!("Unrecognized ok value: {ok}"));
                    return Err(operation_failure(info));
                }
                OkStatus::Unrecognized => {
                    let info = failure_info(document).or_message("Command failed");
                    return Err(operation_failure(info));
                }
            }
        }

        Ok(self)
    }

    /// Snapshot of the derived values
    pub fn summary(&self) -> ResultSummary {
        ResultSummary {
            acknowledged: self.acknowledged(),
            successful: self.successful(),
            cursor_id: self.cursor_id(),
            returned_count: self.returned_count(),
            written_count: self.written_count(),
            error_message: self.error_message(),
        }
    }
}

fn reply_successful(reply: &Reply) -> bool {
    match reply.first_document().and_then(|doc| doc.get(OK)) {
        Some(ok) => coerce_ok(ok).is_success(),
        None => true,
    }
}

fn failure_info(document: Option<&Document>) -> ErrorInfo {
    document.map(extract_error_info).unwrap_or_default()
}

fn operation_failure(info: ErrorInfo) -> OpResultError {
    warn!(
        "Operation failed: {}",
        info.message.as_deref().unwrap_or("unknown error")
    );
    info.into()
}

impl From<Option<Reply>> for OperationResult {
    fn from(reply: Option<Reply>) -> Self {
        Self::new(reply)
    }
}

impl From<Reply> for OperationResult {
    fn from(reply: Reply) -> Self {
        Self::new(Some(reply))
    }
}

impl fmt::Display for OperationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.summary())
    }
}

/// Iterator over the documents of every reply of a result
#[derive(Debug, Clone)]
pub struct Iter<'a> {
    replies: std::slice::Iter<'a, Reply>,
    current: std::slice::Iter<'a, Document>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a Document;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(document) = self.current.next() {
                return Some(document);
            }
            self.current = self.replies.next()?.documents().iter();
        }
    }
}

impl<'a> IntoIterator for &'a OperationResult {
    type Item = &'a Document;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
