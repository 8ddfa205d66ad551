//! MCP server implementation.
//!
//! This module defines the `SdpServer` struct that implements the MCP
//! `ServerHandler` trait, exposing ServiceDesk Plus ticket operations as
//! tools. Every tool answers with a JSON document; failures are reported
//! inside that document as `{"error": ...}` rather than as tool errors.

use rmcp::{
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router, ServerHandler,
};
use serde_json::Value;

use crate::sdp_client::SdpClient;
use crate::tools::{
    tickets, CloseTicketInput, CreateTicketInput, GetRequestInput, ListRequestsInput,
    UpdateRequestInput,
};

/// The SDP MCP server.
#[derive(Clone)]
pub struct SdpServer {
    /// SDP client for API operations.
    sdp_client: SdpClient,
    /// Tool router for MCP tool dispatch.
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl SdpServer {
    /// Creates a new server instance.
    ///
    /// # Arguments
    ///
    /// * `sdp_client` - The SDP client for API operations
    pub fn new(sdp_client: SdpClient) -> Self {
        Self {
            sdp_client,
            tool_router: Self::tool_router(),
        }
    }

    /// A simple ping tool to verify the server is running.
    #[tool(description = "Test connectivity to the MCP server. Returns 'pong' if the server is running correctly.")]
    fn ping(&self) -> String {
        tracing::debug!("ping tool called");
        "pong".to_string()
    }

    #[tool(description = "Fetch the latest helpdesk tickets from ServiceDesk Plus, newest first. row_count sets how many (default 10). Returns the raw SDP response.")]
    async fn list_requests(&self, Parameters(input): Parameters<ListRequestsInput>) -> String {
        render(tickets::list_requests(&self.sdp_client, input).await)
    }

    #[tool(description = "Create a new support request/ticket with a subject, a description and the requester's display name. Returns the SDP response for the created ticket.")]
    async fn create_ticket(&self, Parameters(input): Parameters<CreateTicketInput>) -> String {
        render(tickets::create_ticket(&self.sdp_client, input).await)
    }

    #[tool(description = "Get full details of a single ticket by request ID.")]
    async fn get_request(&self, Parameters(input): Parameters<GetRequestInput>) -> String {
        render(tickets::get_request(&self.sdp_client, input.sanitize()).await)
    }

    #[tool(description = "Update a ticket's subject, description, status or priority. Request ID is required; only the fields you provide are changed.")]
    async fn update_request(&self, Parameters(input): Parameters<UpdateRequestInput>) -> String {
        render(tickets::update_request(&self.sdp_client, input.sanitize()).await)
    }

    #[tool(description = "Close a ticket. Sets the status to Closed and replaces the description with the closure comments.")]
    async fn close_ticket(&self, Parameters(input): Parameters<CloseTicketInput>) -> String {
        render(tickets::close_ticket(&self.sdp_client, input.sanitize()).await)
    }
}

#[tool_handler]
impl ServerHandler for SdpServer {
    /// Returns server information for the MCP initialize handshake.
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "Access to ServiceDesk Plus helpdesk tickets. \
                 Use list_requests to see the latest tickets, get_request for details, \
                 create_ticket to open one, update_request to change fields and \
                 close_ticket to close it. Every tool answers with JSON; failures \
                 carry an \"error\" key. Start with 'ping' to verify connectivity."
                    .into(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}

/// Serializes a tool result as the text content sent to the agent.
fn render(value: Value) -> String {
    value.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use serde_json::json;

    fn test_client() -> SdpClient {
        let config = Config::new("https://test.example.com", "test_key_12345")
            .expect("valid test config");
        SdpClient::new(&config).expect("Failed to create test client")
    }

    #[test]
    fn test_server_creation() {
        let server = SdpServer::new(test_client());
        let info = server.get_info();
        assert!(info.instructions.is_some());
    }

    #[test]
    fn test_server_info_has_tools_capability() {
        let server = SdpServer::new(test_client());
        let info = server.get_info();
        assert!(info.capabilities.tools.is_some());
    }

    #[test]
    fn test_ping_tool_returns_pong() {
        let server = SdpServer::new(test_client());
        assert_eq!(server.ping(), "pong");
    }

    #[test]
    fn test_render_is_json() {
        let rendered = render(json!({"error": "Request not found"}));
        let parsed: Value = serde_json::from_str(&rendered).unwrap();
        assert_eq!(parsed["error"], "Request not found");
    }

    #[tokio::test]
    async fn test_update_tool_without_fields_reports_error() {
        let server = SdpServer::new(test_client());
        let input = UpdateRequestInput {
            request_id: "1".to_string(),
            subject: Some(String::new()),
            description: None,
            status: None,
            priority: None,
        };
        let rendered = server.update_request(Parameters(input)).await;
        let parsed: Value = serde_json::from_str(&rendered).unwrap();
        assert_eq!(parsed, json!({"error": "No fields provided for update"}));
    }
}
