//! Error types for the SDP MCP server.
//!
//! This module defines `SdpError`, the error type returned by every
//! [`SdpClient`](crate::sdp_client::SdpClient) operation, and the conversion
//! of each variant into the normalized failure payload handed back to the
//! calling agent.
//!
//! # Security
//!
//! All error messages are sanitized to ensure API keys are never leaked
//! in logs or tool responses. Use `sanitize_message()` when constructing
//! error messages from external sources.

use std::time::Duration;

use serde_json::{json, Value};
use thiserror::Error;

/// Maximum number of characters of a non-JSON body echoed back as `raw`.
pub const MAX_RAW_BODY_CHARS: usize = 200;

/// Unified error type for all SDP operations.
///
/// The `Display` text of each variant is exactly the `error` string the
/// agent receives, so several messages here are part of the tool contract.
#[derive(Error, Debug)]
pub enum SdpError {
    /// Configuration error - missing or invalid environment variables.
    #[error("configuration error: {0}")]
    Config(String),

    /// HTTP request failed during transmission.
    #[error("HTTP request failed: {0}")]
    Http(#[source] reqwest::Error),

    /// HTTP client initialization failed.
    #[error("HTTP client error: {0}")]
    HttpClient(#[source] reqwest::Error),

    /// Request timed out.
    #[error("request timed out after {duration:?} - the server may be slow or unreachable")]
    Timeout {
        /// How long we waited before timing out.
        duration: Duration,
        /// The operation that timed out.
        operation: String,
    },

    /// The credential could not be encoded as an HTTP header value.
    #[error("invalid header value for {0}")]
    InvalidHeader(&'static str),

    /// JSON serialization or deserialization failed.
    #[error("{0}")]
    Serialization(#[from] serde_json::Error),

    /// The backend answered a create call with an empty body.
    #[error("Empty response from SDP")]
    EmptyResponse,

    /// The backend answered a create call with a body that is not JSON.
    #[error("Invalid JSON response from server")]
    InvalidServerJson {
        /// Leading excerpt of the body.
        raw: String,
    },

    /// The backend answered an update call with a body that is not JSON.
    #[error("Invalid JSON response")]
    InvalidJson {
        /// Leading excerpt of the body.
        raw: String,
    },

    /// The backend returned HTTP 404 for a single request.
    #[error("Request not found")]
    NotFound {
        /// The ID that was looked up.
        id: String,
    },

    /// An update was attempted without any field to change.
    #[error("No fields provided for update")]
    NoUpdateFields,

    /// Connection test failed.
    #[error("connection test failed: {message}")]
    ConnectionTest {
        /// Details about why the connection test failed.
        message: String,
    },
}

impl SdpError {
    /// Creates a configuration error for an invalid value.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        SdpError::Config(message.into())
    }

    /// Creates a not found error for a request ID.
    pub fn not_found(id: impl Into<String>) -> Self {
        SdpError::NotFound { id: id.into() }
    }

    /// Creates a timeout error.
    pub fn timeout(duration: Duration, operation: impl Into<String>) -> Self {
        SdpError::Timeout {
            duration,
            operation: operation.into(),
        }
    }

    /// Creates a connection test error.
    pub fn connection_test(message: impl Into<String>) -> Self {
        SdpError::ConnectionTest {
            message: message.into(),
        }
    }

    /// Creates the create-path parse failure, keeping only a short excerpt of `body`.
    pub fn invalid_server_json(body: &str) -> Self {
        SdpError::InvalidServerJson {
            raw: truncate_chars(body, MAX_RAW_BODY_CHARS),
        }
    }

    /// Creates the update-path parse failure, keeping only a short excerpt of `body`.
    pub fn invalid_json(body: &str) -> Self {
        SdpError::InvalidJson {
            raw: truncate_chars(body, MAX_RAW_BODY_CHARS),
        }
    }

    /// Returns the body excerpt carried by parse failures.
    #[must_use]
    pub fn raw(&self) -> Option<&str> {
        match self {
            SdpError::InvalidServerJson { raw } | SdpError::InvalidJson { raw } => Some(raw),
            _ => None,
        }
    }

    /// Sanitizes an error message to remove any occurrence of the API key.
    ///
    /// # Arguments
    ///
    /// * `message` - The message to sanitize
    /// * `api_key` - The API key to strip from the message
    ///
    /// # Returns
    ///
    /// The message with any occurrence of the API key replaced with `[REDACTED]`
    #[must_use]
    pub fn sanitize_message(message: &str, api_key: &str) -> String {
        if api_key.is_empty() {
            return message.to_string();
        }
        message.replace(api_key, "[REDACTED]")
    }

    /// Creates a sanitized version of this error's display message.
    #[must_use]
    pub fn sanitized_display(&self, api_key: &str) -> String {
        Self::sanitize_message(&self.to_string(), api_key)
    }

    /// Converts the error into the failure mapping returned to the agent.
    ///
    /// Always `{"error": <message>}`, plus `"raw"` for bodies that failed
    /// to parse as JSON.
    #[must_use]
    pub fn into_payload(self, api_key: &str) -> Value {
        let message = self.sanitized_display(api_key);
        match self.raw() {
            Some(raw) => json!({
                "error": message,
                "raw": Self::sanitize_message(raw, api_key),
            }),
            None => json!({ "error": message }),
        }
    }
}

/// Returns at most `max_chars` characters of `text`.
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contract_messages() {
        assert_eq!(SdpError::EmptyResponse.to_string(), "Empty response from SDP");
        assert_eq!(SdpError::not_found("42").to_string(), "Request not found");
        assert_eq!(
            SdpError::NoUpdateFields.to_string(),
            "No fields provided for update"
        );
        assert_eq!(
            SdpError::invalid_server_json("oops").to_string(),
            "Invalid JSON response from server"
        );
        assert_eq!(
            SdpError::invalid_json("oops").to_string(),
            "Invalid JSON response"
        );
    }

    #[test]
    fn test_payload_without_raw() {
        let payload = SdpError::EmptyResponse.into_payload("key");
        assert_eq!(payload, json!({"error": "Empty response from SDP"}));
    }

    #[test]
    fn test_payload_with_raw_is_truncated() {
        let body = "<html>".repeat(100);
        let payload = SdpError::invalid_server_json(&body).into_payload("key");
        assert_eq!(payload["error"], "Invalid JSON response from server");
        assert_eq!(payload["raw"].as_str().unwrap().chars().count(), 200);
        assert!(body.starts_with(payload["raw"].as_str().unwrap()));
    }

    #[test]
    fn test_truncate_chars_counts_characters_not_bytes() {
        let text = "ø".repeat(300);
        let truncated = truncate_chars(&text, 200);
        assert_eq!(truncated.chars().count(), 200);
        assert_eq!(truncated.len(), 400);
    }

    #[test]
    fn test_truncate_chars_short_text_unchanged() {
        assert_eq!(truncate_chars("short", 200), "short");
        assert_eq!(truncate_chars("", 200), "");
    }

    #[test]
    fn test_timeout_error() {
        let err = SdpError::timeout(Duration::from_secs(30), "GET /api/v3/requests");
        let msg = err.to_string();
        assert!(msg.contains("timed out"));
        assert!(msg.contains("30s"));
    }

    #[test]
    fn test_serialization_error_is_bare_parser_message() {
        let err: SdpError = serde_json::from_str::<Value>("not json").unwrap_err().into();
        let payload = err.into_payload("");
        let message = payload["error"].as_str().unwrap();
        assert!(message.contains("expected"));
        assert!(payload.get("raw").is_none());
    }

    #[test]
    fn test_sanitize_message_removes_api_key() {
        let api_key = "super_secret_key_12345";
        let message = format!("Error connecting with key {} to server", api_key);
        let sanitized = SdpError::sanitize_message(&message, api_key);
        assert!(!sanitized.contains(api_key));
        assert!(sanitized.contains("[REDACTED]"));
    }

    #[test]
    fn test_sanitize_message_empty_key() {
        let message = "Some error message";
        let sanitized = SdpError::sanitize_message(message, "");
        assert_eq!(sanitized, message);
    }

    #[test]
    fn test_connection_test_error() {
        let err = SdpError::connection_test("Could not reach server");
        let msg = err.to_string();
        assert!(msg.contains("connection test failed"));
        assert!(msg.contains("Could not reach server"));
    }

    #[test]
    fn test_payload_raw_is_sanitized() {
        let payload = SdpError::invalid_json("echo secret123 back").into_payload("secret123");
        assert_eq!(payload["raw"], "echo [REDACTED] back");
    }
}
