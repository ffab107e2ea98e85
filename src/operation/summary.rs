//! Serializable snapshot of an operation result
//!
//! Used for logging and display:
//! - Acknowledgment and success
//! - Returned and written document counts
//! - Server error message, when present

use std::fmt;

use serde::{Deserialize, Serialize};

/// Derived values of an [`OperationResult`](super::OperationResult)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultSummary {
    pub acknowledged: bool,
    pub successful: bool,
    pub cursor_id: u64,
    pub returned_count: u64,
    pub written_count: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl ResultSummary {
    /// Convert the summary to pretty-printed JSON string.
    pub fn to_json(&self) -> std::result::Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Convert the summary to compact JSON string (single line).
    pub fn to_json_compact(&self) -> std::result::Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

impl fmt::Display for ResultSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.acknowledged {
            return f.write_str("Unacknowledged");
        }

        let mut parts = vec![
            if self.successful { "Ok" } else { "Failed" }.to_string(),
            format!("Documents returned: {}", self.returned_count),
        ];

        if self.written_count > 0 {
            parts.push(format!("Documents written: {}", self.written_count));
        }
        if self.cursor_id != 0 {
            parts.push(format!("Cursor: {}", self.cursor_id));
        }
        if let Some(message) = &self.error_message {
            parts.push(format!("Error: {message}"));
        }

        f.write_str(&parts.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unacknowledged_display() {
        let summary = ResultSummary {
            successful: true,
            ..ResultSummary::default()
        };
        assert_eq!(summary.to_string(), "Unacknowledged");
    }

    #[test]
    fn test_write_display() {
        let summary = ResultSummary {
            acknowledged: true,
            successful: true,
            cursor_id: 0,
            returned_count: 1,
            written_count: 2,
            error_message: None,
        };
        assert_eq!(
            summary.to_string(),
            "Ok, Documents returned: 1, Documents written: 2"
        );
    }

    #[test]
    fn test_failure_display_and_json() {
        let summary = ResultSummary {
            acknowledged: true,
            successful: false,
            cursor_id: 0,
            returned_count: 1,
            written_count: 0,
            error_message: Some("not master".to_string()),
        };
        assert_eq!(
            summary.to_string(),
            "Failed, Documents returned: 1, Error: not master"
        );

        let json = summary.to_json_compact().unwrap();
        assert_eq!(
            json,
            r#"{"acknowledged":true,"successful":false,"cursor_id":0,"returned_count":1,"written_count":0,"error_message":"not master"}"#
        );
    }

    #[test]
    fn test_json_omits_missing_message() {
        let summary = ResultSummary::default();
        let json = summary.to_json().unwrap();
        assert!(!json.contains("error_message"));
    }
}
