//! OP_REPLY response flags

use std::fmt;

use serde::{Deserialize, Serialize};

/// A single response flag carried in the reply header
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReplyFlag {
    /// The cursor requested by a getMore no longer exists on the server
    CursorNotFound,

    /// The query failed; the batch holds a single `$err` document
    QueryFailure,

    /// The shard configuration is stale (mongos only)
    ShardConfigStale,

    /// The server supports the AwaitData query option
    AwaitCapable,
}

impl ReplyFlag {
    /// All flags in bit order
    pub const ALL: [ReplyFlag; 4] = [
        ReplyFlag::CursorNotFound,
        ReplyFlag::QueryFailure,
        ReplyFlag::ShardConfigStale,
        ReplyFlag::AwaitCapable,
    ];

    /// Bit mask of this flag within the header's responseFlags field
    pub fn bit(self) -> u32 {
        match self {
            ReplyFlag::CursorNotFound => 1 << 0,
            ReplyFlag::QueryFailure => 1 << 1,
            ReplyFlag::ShardConfigStale => 1 << 2,
            ReplyFlag::AwaitCapable => 1 << 3,
        }
    }

    /// Wire-level name of the flag
    pub fn as_str(self) -> &'static str {
        match self {
            ReplyFlag::CursorNotFound => "cursor_not_found",
            ReplyFlag::QueryFailure => "query_failure",
            ReplyFlag::ShardConfigStale => "shard_config_stale",
            ReplyFlag::AwaitCapable => "await_capable",
        }
    }
}

impl fmt::Display for ReplyFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Set of response flags
///
/// Stored as the header bit field. Bits without a known flag are dropped
/// when converting from raw bits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "u32", into = "u32")]
pub struct ReplyFlags {
    bits: u32,
}

impl ReplyFlags {
    const KNOWN_BITS: u32 = 0b1111;

    /// Create an empty flag set
    pub fn empty() -> Self {
        Self { bits: 0 }
    }

    /// Build a flag set from the header's responseFlags field
    ///
    /// # Arguments
    /// * `bits` - Raw responseFlags value
    ///
    /// # Returns
    /// * `Self` - Flag set holding only the known flags
    pub fn from_bits(bits: u32) -> Self {
        Self {
            bits: bits & Self::KNOWN_BITS,
        }
    }

    /// Raw bit representation
    pub fn bits(&self) -> u32 {
        self.bits
    }

    pub fn contains(&self, flag: ReplyFlag) -> bool {
        self.bits & flag.bit() != 0
    }

    pub fn insert(&mut self, flag: ReplyFlag) {
        self.bits |= flag.bit();
    }

    pub fn is_empty(&self) -> bool {
        self.bits == 0
    }

    /// Iterate over the set flags in bit order
    pub fn iter(&self) -> impl Iterator<Item = ReplyFlag> + '_ {
        ReplyFlag::ALL
            .into_iter()
            .filter(move |flag| self.contains(*flag))
    }
}

impl From<u32> for ReplyFlags {
    fn from(bits: u32) -> Self {
        Self::from_bits(bits)
    }
}

impl From<ReplyFlags> for u32 {
    fn from(flags: ReplyFlags) -> Self {
        flags.bits
    }
}

impl FromIterator<ReplyFlag> for ReplyFlags {
    fn from_iter<I: IntoIterator<Item = ReplyFlag>>(iter: I) -> Self {
        let mut flags = ReplyFlags::empty();
        for flag in iter {
            flags.insert(flag);
        }
        flags
    }
}

impl fmt::Display for ReplyFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.iter().map(ReplyFlag::as_str).collect();
        write!(f, "[{}]", names.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_bits_drops_unknown_bits() {
        let flags = ReplyFlags::from_bits(0b1_0000_0010);
        assert!(flags.contains(ReplyFlag::QueryFailure));
        assert!(!flags.contains(ReplyFlag::CursorNotFound));
        assert_eq!(flags.bits(), 0b0010);
    }

    #[test]
    fn test_iter_in_bit_order() {
        let flags: ReplyFlags = [ReplyFlag::AwaitCapable, ReplyFlag::CursorNotFound]
            .into_iter()
            .collect();
        let listed: Vec<ReplyFlag> = flags.iter().collect();
        assert_eq!(
            listed,
            vec![ReplyFlag::CursorNotFound, ReplyFlag::AwaitCapable]
        );
        assert_eq!(flags.to_string(), "[cursor_not_found, await_capable]");
    }

    #[test]
    fn test_empty() {
        let flags = ReplyFlags::default();
        assert!(flags.is_empty());
        assert_eq!(flags.iter().count(), 0);
        assert_eq!(flags.to_string(), "[]");
    }

    #[test]
    fn test_serde_uses_bits() {
        let flags: ReplyFlags = [ReplyFlag::QueryFailure].into_iter().collect();
        let json = serde_json::to_string(&flags).unwrap();
        assert_eq!(json, "2");

        let parsed: ReplyFlags = serde_json::from_str("34").unwrap();
        assert_eq!(parsed, flags);
    }
}
