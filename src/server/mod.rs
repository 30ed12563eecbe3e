//! MCP server implementation for the shelf search tools.
//!
//! This module provides the MCP protocol server that exposes directory and FAQ
//! search to AI assistants through the Model Context Protocol.

pub mod handlers;

pub use handlers::ShelfSearchServer;

use anyhow::Result;
use rmcp::transport::io::stdio;
use rmcp::ServiceExt;

/// Run the server with stdio transport until the client disconnects.
pub async fn run_server(server: ShelfSearchServer) -> Result<()> {
    let service = server.serve(stdio()).await?;
    service.waiting().await?;

    Ok(())
}
