//! # sdp-mcp
//!
//! An MCP (Model Context Protocol) server for ManageEngine ServiceDesk Plus.
//!
//! It exposes a small set of helpdesk operations as MCP tools so an agent
//! runtime can work with tickets:
//!
//! - `list_requests` - the newest tickets, one page
//! - `create_ticket` - open a ticket for a named requester
//! - `get_request` - one ticket by ID
//! - `update_request` - change subject, description, status or priority
//! - `close_ticket` - set status `Closed` with closure comments
//!
//! Every tool answers with a JSON document. On success that is the SDP
//! response body unchanged; on failure it is `{"error": "..."}`, sometimes
//! with a short `raw` excerpt of an unparseable body. A tool call never
//! fails at the protocol level.
//!
//! ## Architecture
//!
//! - [`config`] - Configuration loading from environment variables
//! - [`error`] - Error types and their conversion to failure documents
//! - [`models`] - Outbound `input_data` payloads
//! - [`sdp_client`] - HTTP client for the ServiceDesk Plus API
//! - [`tools`] - Tool inputs and the ticket operations
//! - [`server`] - MCP server implementation with tool routing
//!
//! ## Security Considerations
//!
//! The API key is stored only in memory and is:
//! - Never logged at any log level
//! - Sanitized from all error messages
//! - Not included in any tool responses
//!
//! ## Example
//!
//! ```ignore
//! use sdp_mcp::config::Config;
//! use sdp_mcp::sdp_client::SdpClient;
//! use sdp_mcp::tools::{tickets, ListRequestsInput};
//!
//! async fn example() -> Result<(), sdp_mcp::error::SdpError> {
//!     let config = Config::from_env()?;
//!     let client = SdpClient::new(&config)?;
//!
//!     let latest = tickets::list_requests(&client, ListRequestsInput { row_count: Some(5) }).await;
//!     println!("{}", latest);
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod config;
pub mod error;
pub mod models;
pub mod sdp_client;
pub mod server;
pub mod tools;
