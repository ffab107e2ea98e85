use std::fmt;

use bson::{Bson, Document};
use serde::{Deserialize, Serialize};

/// Structured failure information extracted from a command-style reply.
///
/// This is intended to be serialized to JSON and consumed by other
/// components (e.g. logging, APIs).
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<i32>,
    #[serde(rename = "codeName", skip_serializing_if = "Option::is_none")]
    pub code_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(rename = "writeConcern", skip_serializing_if = "Option::is_none")]
    pub write_concern: Option<WriteConcernDetails>,
}

/// Details of a `writeConcernError` sub-document.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct WriteConcernDetails {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ErrorInfo {
    /// Convert error info to pretty-printed JSON string.
    pub fn to_json(&self) -> std::result::Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Convert error info to compact JSON string (single line).
    pub fn to_json_compact(&self) -> std::result::Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Replace the message when the reply carried none.
    pub(crate) fn or_message(mut self, message: impl Into<String>) -> Self {
        if self.message.is_none() {
            self.message = Some(message.into());
        }
        self
    }
}

/// Format a server failure as pretty JSON wrapped in an `error` field.
///
/// Intended to be used by the parent module's `Display` implementation for
/// `OpResultError::OperationFailure`.
pub fn format_operation_failure(f: &mut fmt::Formatter<'_>, info: &ErrorInfo) -> fmt::Result {
    let wrapper = serde_json::json!({ "error": info });

    let json_output = serde_json::to_string_pretty(&wrapper).map_err(|_| fmt::Error)?;
    write!(f, "\n{json_output}")
}

/// Extract structured information from a command-style reply document.
///
/// Missing fields stay `None`; nothing here fails.
pub fn extract_error_info(document: &Document) -> ErrorInfo {
    let mut info = ErrorInfo {
        code: document.get("code").and_then(code_value),
        ..ErrorInfo::default()
    };

    info.code_name = match document.get("codeName") {
        Some(Bson::String(name)) => Some(name.clone()),
        _ => info.code.and_then(get_error_name),
    };

    info.message = string_field(document, "errmsg")
        .or_else(|| string_field(document, "$err"))
        .or_else(|| first_write_error_message(document));

    if let Some(Bson::Document(wc_error)) = document.get("writeConcernError") {
        let details = WriteConcernDetails {
            code: wc_error.get("code").and_then(code_value),
            message: string_field(wc_error, "errmsg"),
        };

        if info.message.is_none() {
            info.message = details.message.clone();
        }
        if info.code.is_none() {
            info.code = details.code;
            info.code_name = details.code.and_then(get_error_name);
        }
        info.write_concern = Some(details);
    }

    info
}

/// Message of the first entry of a `writeErrors` array.
fn first_write_error_message(document: &Document) -> Option<String> {
    match document.get("writeErrors") {
        Some(Bson::Array(errors)) => match errors.first() {
            Some(Bson::Document(first)) => string_field(first, "errmsg"),
            _ => None,
        },
        _ => None,
    }
}

fn string_field(document: &Document, key: &str) -> Option<String> {
    match document.get(key) {
        Some(Bson::String(s)) => Some(s.clone()),
        _ => None,
    }
}

/// Servers send error codes as int32, but doubles show up from older shells.
fn code_value(value: &Bson) -> Option<i32> {
    match value {
        Bson::Int32(n) => Some(*n),
        Bson::Int64(n) => i32::try_from(*n).ok(),
        Bson::Double(f) if f.fract() == 0.0 && f.is_finite() => {
            let n = *f as i64;
            i32::try_from(n).ok()
        }
        _ => None,
    }
}

/// Get a human-readable error name from a server error code.
fn get_error_name(code: i32) -> Option<String> {
    let name = match code {
        2 => "BadValue",
        11000 | 11001 => "DuplicateKey",
        13 => "Unauthorized",
        18 => "AuthenticationFailed",
        26 => "NamespaceNotFound",
        43 => "CursorNotFound",
        50 => "MaxTimeMSExpired",
        59 => "CommandNotFound",
        64 => "WriteConcernFailed",
        121 => "DocumentValidationFailure",
        _ => return None,
    };

    Some(name.to_string())
}
