//! Common types shared across SDP API payloads.
//!
//! SDP v3 takes every payload as a JSON document wrapped in a single
//! `input_data` parameter: a query parameter for GET, a form field for
//! POST/PUT. This module defines that envelope and the `list_info` block
//! used by list operations.

use serde::Serialize;

use crate::error::SdpError;

/// Name of the outer parameter carrying the JSON payload.
pub const INPUT_DATA_PARAM: &str = "input_data";

/// Default number of rows returned by `list_requests`.
pub const DEFAULT_ROW_COUNT: u32 = 10;

/// Pagination and sorting parameters for list operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListInfo {
    /// Maximum number of rows to return.
    pub row_count: u32,

    /// Field to sort by.
    pub sort_field: String,

    /// Sort order: "asc" or "desc".
    pub sort_order: String,
}

impl ListInfo {
    /// The newest `row_count` tickets, by creation time.
    pub fn latest(row_count: u32) -> Self {
        Self {
            row_count,
            sort_field: "created_time".to_string(),
            sort_order: "desc".to_string(),
        }
    }
}

/// `{"list_info": {...}}` document sent with list calls.
#[derive(Debug, Clone, Serialize)]
pub struct ListEnvelope {
    /// Pagination and sorting.
    pub list_info: ListInfo,
}

/// `{"request": {...}}` document sent with create and update calls.
#[derive(Debug, Clone, Serialize)]
pub struct RequestEnvelope<'a, T> {
    /// The request fields.
    pub request: &'a T,
}

/// Reference to another SDP entity by display name, serialized as `{"name": ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NameRef {
    /// Display name, e.g. "High" or "Closed".
    pub name: String,
}

impl NameRef {
    /// Creates a reference by name.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Encodes a document as the JSON string carried in `input_data`.
pub fn encode_input_data<T: Serialize>(document: &T) -> Result<String, SdpError> {
    serde_json::to_string(document).map_err(SdpError::Serialization)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_info_latest() {
        let info = ListInfo::latest(5);
        assert_eq!(info.row_count, 5);
        assert_eq!(info.sort_field, "created_time");
        assert_eq!(info.sort_order, "desc");
    }

    #[test]
    fn test_list_envelope_encoding() {
        let envelope = ListEnvelope {
            list_info: ListInfo::latest(5),
        };
        assert_eq!(
            encode_input_data(&envelope).unwrap(),
            r#"{"list_info":{"row_count":5,"sort_field":"created_time","sort_order":"desc"}}"#
        );
    }

    #[test]
    fn test_name_ref_encoding() {
        let value = serde_json::to_value(NameRef::new("High")).unwrap();
        assert_eq!(value, serde_json::json!({"name": "High"}));
    }
}
