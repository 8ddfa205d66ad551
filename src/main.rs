//! sdp-mcp - MCP server for ManageEngine ServiceDesk Plus helpdesk tickets
//!
//! This binary runs as an MCP server using stdio transport, so an agent
//! runtime can list, create, read, update and close tickets.
//!
//! # Configuration
//!
//! Set the following environment variables (or use a `.env` file):
//!
//! - `SDP_URL`: Base URL of your ServiceDesk Plus instance (default `http://localhost:8080`)
//! - `SDP_API_KEY`: Technician API key for authentication
//! - `VERIFY_SSL`: `false` to skip TLS certificate checks (default `true`)
//! - `LOG_LEVEL`: `DEBUG`, `INFO`, `WARNING`, `ERROR` (default `INFO`)
//! - `SDP_TIMEOUT_SECS`: outbound request timeout (default 30)
//!
//! # Usage
//!
//! ```bash
//! SDP_URL=https://servicedesk.example.com SDP_API_KEY=xxx ./sdp-mcp
//! ```

use anyhow::{Context, Result};
use rmcp::{transport::stdio, ServiceExt};
use tracing_subscriber::{fmt, EnvFilter};

use sdp_mcp::{config, sdp_client, server};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (ignore errors if not found)
    dotenvy::dotenv().ok();

    // Configuration first: it carries the log level.
    let config = config::Config::from_env().context("Failed to load configuration")?;

    // Logs go to stderr; stdout is reserved for MCP JSON-RPC messages
    fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("warn,sdp_mcp={}", config.log_level))
        }))
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    tracing::info!("Starting sdp-mcp server v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!(base_url = %config.base_url, "Initializing SDP MCP server");

    if !config.has_api_key() {
        tracing::error!("SDP_API_KEY is not set in environment variables!");
    }

    let sdp_client = sdp_client::SdpClient::new(&config).context("Failed to create SDP client")?;

    tracing::debug!(?config, "SDP client initialized");

    tracing::info!("Testing connection to ServiceDesk Plus...");
    if let Err(e) = sdp_client.test_connection().await {
        tracing::error!(
            error = %e.sanitized_display(config.api_key()),
            "Connection test failed"
        );
        tracing::warn!(
            "Server will start but may not be able to reach ServiceDesk Plus. \
             Check configuration and network connectivity."
        );
    }

    let server = server::SdpServer::new(sdp_client);

    tracing::info!("Server initialized, starting stdio transport");

    let service = server
        .serve(stdio())
        .await
        .inspect_err(|e| {
            tracing::error!("serving error: {:?}", e);
        })
        .context("Failed to start server")?;

    tracing::info!("Server running, waiting for requests");

    service
        .waiting()
        .await
        .context("Server error during operation")?;

    tracing::info!("Server shutting down");

    Ok(())
}
