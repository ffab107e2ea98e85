//! Reply value produced by the message decoder

use bson::Document;
use serde::{Deserialize, Serialize};

use super::flags::{ReplyFlag, ReplyFlags};

/// A decoded server reply: header fields plus the document batch
///
/// `number_returned` is what the server reported in the header. It is kept
/// as given and never recomputed from `documents`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Reply {
    /// Server cursor id; 0 means no open cursor
    pub cursor_id: u64,

    /// Response flags from the header
    #[serde(default)]
    pub flags: ReplyFlags,

    /// Offset of the first document of this batch in the full result set
    #[serde(default)]
    pub starting_from: u32,

    /// Number of documents in this batch as reported by the server
    pub number_returned: u32,

    /// Decoded documents of this batch
    #[serde(default)]
    pub documents: Vec<Document>,
}

impl Reply {
    /// Create a reply holding the given batch
    ///
    /// The cursor id is 0, no flags are set, and `number_returned`
    /// matches the batch length.
    ///
    /// # Arguments
    /// * `documents` - Decoded documents
    ///
    /// # Returns
    /// * `Self` - New reply
    pub fn new(documents: Vec<Document>) -> Self {
        let number_returned = u32::try_from(documents.len()).unwrap_or(u32::MAX);
        Self {
            cursor_id: 0,
            flags: ReplyFlags::empty(),
            starting_from: 0,
            number_returned,
            documents,
        }
    }

    pub fn with_cursor_id(mut self, cursor_id: u64) -> Self {
        self.cursor_id = cursor_id;
        self
    }

    pub fn with_flags(mut self, flags: ReplyFlags) -> Self {
        self.flags = flags;
        self
    }

    pub fn with_starting_from(mut self, starting_from: u32) -> Self {
        self.starting_from = starting_from;
        self
    }

    pub fn with_number_returned(mut self, number_returned: u32) -> Self {
        self.number_returned = number_returned;
        self
    }

    pub fn cursor_id(&self) -> u64 {
        self.cursor_id
    }

    pub fn flags(&self) -> ReplyFlags {
        self.flags
    }

    pub fn starting_from(&self) -> u32 {
        self.starting_from
    }

    pub fn number_returned(&self) -> u32 {
        self.number_returned
    }

    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    /// First document of the batch, if any
    pub fn first_document(&self) -> Option<&Document> {
        self.documents.first()
    }

    /// Whether the server flagged this reply as a failed query
    pub fn query_failure(&self) -> bool {
        self.flags.contains(ReplyFlag::QueryFailure)
    }

    /// Whether the server reported the requested cursor as unknown
    pub fn cursor_not_found(&self) -> bool {
        self.flags.contains(ReplyFlag::CursorNotFound)
    }
}
