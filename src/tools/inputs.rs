//! Tool input parameter structs for MCP tools.
//!
//! This module defines the input types for each MCP tool, with
//! JSON Schema derivation for MCP tool discovery.
//!
//! # Input Sanitization
//!
//! Inputs that carry a request ID implement `sanitize()`, which trims the
//! ID. Free text is left as the agent sent it; empty update fields are
//! dropped when the update payload is built.

use rmcp::schemars::{self, JsonSchema};
use serde::Deserialize;

use crate::models::{RequestUpdate, DEFAULT_ROW_COUNT};

/// Input parameters for the list_requests tool.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct ListRequestsInput {
    /// Number of most recent tickets to return (default: 10).
    #[serde(default)]
    pub row_count: Option<u32>,
}

impl ListRequestsInput {
    /// The requested row count, or the default.
    pub fn row_count(&self) -> u32 {
        self.row_count.unwrap_or(DEFAULT_ROW_COUNT)
    }
}

/// Input parameters for the create_ticket tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct CreateTicketInput {
    /// Ticket subject/title.
    pub subject: String,

    /// Detailed description of the issue or request.
    pub description: String,

    /// Display name of the person reporting the issue.
    pub requester_name: String,
}

/// Input parameters for the get_request tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GetRequestInput {
    /// The unique ID of the ticket to retrieve.
    pub request_id: String,
}

impl GetRequestInput {
    /// Sanitizes input by trimming the request ID.
    #[must_use]
    pub fn sanitize(self) -> Self {
        Self {
            request_id: self.request_id.trim().to_string(),
        }
    }
}

/// Input parameters for the update_request tool.
///
/// Request ID is required. At least one other field must be non-empty.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct UpdateRequestInput {
    /// The unique ID of the ticket to update.
    pub request_id: String,

    /// New subject/title for the ticket.
    #[serde(default)]
    pub subject: Option<String>,

    /// New description. Replaces the existing description.
    #[serde(default)]
    pub description: Option<String>,

    /// New status name (e.g., 'Open', 'In Progress', 'On Hold', 'Resolved').
    #[serde(default)]
    pub status: Option<String>,

    /// New priority name: 'Low', 'Medium', 'High', or 'Urgent'.
    #[serde(default)]
    pub priority: Option<String>,
}

impl UpdateRequestInput {
    /// Folds the optional fields into an update payload, dropping empty ones.
    pub fn to_update(&self) -> RequestUpdate {
        RequestUpdate::from_fields(
            self.subject.clone(),
            self.description.clone(),
            self.status.clone(),
            self.priority.clone(),
        )
    }

    /// Sanitizes input by trimming the request ID.
    #[must_use]
    pub fn sanitize(self) -> Self {
        Self {
            request_id: self.request_id.trim().to_string(),
            ..self
        }
    }
}

/// Input parameters for the close_ticket tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct CloseTicketInput {
    /// The unique ID of the ticket to close.
    pub request_id: String,

    /// How the issue was resolved. Replaces the ticket description.
    pub closure_comments: String,
}

impl CloseTicketInput {
    /// Sanitizes input by trimming the request ID.
    #[must_use]
    pub fn sanitize(self) -> Self {
        Self {
            request_id: self.request_id.trim().to_string(),
            closure_comments: self.closure_comments,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_requests_input_default_row_count() {
        let input: ListRequestsInput = serde_json::from_str("{}").unwrap();
        assert_eq!(input.row_count(), 10);

        let input: ListRequestsInput = serde_json::from_str(r#"{"row_count": 5}"#).unwrap();
        assert_eq!(input.row_count(), 5);
    }

    #[test]
    fn test_create_ticket_input_requires_all_fields() {
        let json = r#"{"subject": "Printer", "description": "Jammed"}"#;
        assert!(serde_json::from_str::<CreateTicketInput>(json).is_err());

        let json = r#"{"subject": "Printer", "description": "Jammed", "requester_name": "Jane"}"#;
        let input: CreateTicketInput = serde_json::from_str(json).unwrap();
        assert_eq!(input.requester_name, "Jane");
    }

    #[test]
    fn test_get_request_input_sanitize() {
        let input = GetRequestInput {
            request_id: "  12345  ".to_string(),
        };
        assert_eq!(input.sanitize().request_id, "12345");
    }

    #[test]
    fn test_update_request_input_to_update() {
        let json = r#"{"request_id": "123"}"#;
        let input: UpdateRequestInput = serde_json::from_str(json).unwrap();
        assert!(input.to_update().is_empty());

        let json = r#"{"request_id": "123", "subject": "", "status": ""}"#;
        let input: UpdateRequestInput = serde_json::from_str(json).unwrap();
        assert!(input.to_update().is_empty());

        let json = r#"{"request_id": "123", "priority": "High"}"#;
        let input: UpdateRequestInput = serde_json::from_str(json).unwrap();
        assert_eq!(input.to_update(), RequestUpdate::new().with_priority("High"));
    }

    #[test]
    fn test_update_request_input_sanitize() {
        let input = UpdateRequestInput {
            request_id: " 7 ".to_string(),
            subject: Some(String::new()),
            description: None,
            status: Some("Open".to_string()),
            priority: None,
        };
        let sanitized = input.sanitize();
        assert_eq!(sanitized.request_id, "7");
        assert_eq!(sanitized.subject, Some(String::new()));
        assert_eq!(sanitized.to_update(), RequestUpdate::new().with_status("Open"));
    }

    #[test]
    fn test_close_ticket_input() {
        let json = r#"{"request_id": "123", "closure_comments": "Replaced toner"}"#;
        let input: CloseTicketInput = serde_json::from_str(json).unwrap();
        assert_eq!(input.request_id, "123");
        assert_eq!(input.closure_comments, "Replaced toner");
    }
}
