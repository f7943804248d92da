//! Shared HTTP DTOs for the recoverd public API.
//!
//! These types define the wire contract consumed by the operator UI; field
//! names are part of that contract and stay `camelCase` on the wire.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One eligible recording in the configured recordings directory.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FileInfo {
    /// File base name.
    pub name: String,
    /// Size in bytes.
    pub size: u64,
    /// Creation time, falling back to the modification time on filesystems
    /// that do not record birth times.
    pub created_at: DateTime<Utc>,
    /// Last modification time.
    pub modified_at: DateTime<Utc>,
}

/// Response payload for the directory listing endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FileListResponse {
    /// Absolute directory the listing was taken from.
    pub dir: String,
    /// Eligible recordings, sorted by name.
    pub files: Vec<FileInfo>,
}

/// Request payload for the recovery endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RecoverRequest {
    /// Selected file names, interpreted relative to the recordings directory.
    pub files: Vec<String>,
}

/// Structured error payload returned for every failure before streaming
/// begins.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorBody {
    /// Human-readable error summary.
    pub error: String,
    /// Optional diagnostic detail.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_body_omits_absent_details() {
        let body = ErrorBody {
            error: "bad request".to_string(),
            details: None,
        };
        let encoded = serde_json::to_string(&body).expect("serialize");
        assert_eq!(encoded, r#"{"error":"bad request"}"#);
    }

    #[test]
    fn file_info_uses_camel_case_on_the_wire() {
        let info = FileInfo {
            name: "a.mcap".to_string(),
            size: 3,
            created_at: DateTime::<Utc>::UNIX_EPOCH,
            modified_at: DateTime::<Utc>::UNIX_EPOCH,
        };
        let encoded = serde_json::to_string(&info).expect("serialize");
        assert!(encoded.contains("createdAt"));
        assert!(encoded.contains("modifiedAt"));
    }
}
