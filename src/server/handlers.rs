//! MCP tool handlers for the shelf search server.
//!
//! This module implements all the MCP tools using the rmcp SDK's tool_router pattern.

use crate::error::SearchError;
use crate::models::DatasetKind;
use crate::render;
use crate::services::{DirectoryService, FaqService};
use rmcp::handler::server::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::*;
use rmcp::{tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::sync::Arc;

/// The MCP server exposing directory and FAQ search tools.
#[derive(Clone)]
pub struct ShelfSearchServer {
    directory_service: Arc<dyn DirectoryService>,
    faq_service: Arc<dyn FaqService>,
    tool_router: ToolRouter<Self>,
}

#[tool_handler]
impl ServerHandler for ShelfSearchServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities {
                tools: Some(Default::default()),
                ..Default::default()
            },
            server_info: Implementation {
                name: "shelf-search".into(),
                version: env!("CARGO_PKG_VERSION").into(),
                icons: None,
                title: None,
                website_url: None,
            },
            instructions: Some("Fuzzy search over the store directory (with an optional floor filter) and the FAQ. Data comes from published spreadsheet CSV exports.".into()),
        }
    }
}

#[derive(Debug, Deserialize, JsonSchema)]
struct SearchDirectoryParams {
    /// Free-text query; empty lists every entry
    #[serde(default)]
    query: Option<String>,
    /// Exact floor value, as returned by list_floors
    #[serde(default)]
    floor: Option<String>,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct SearchFaqParams {
    /// Free-text query; empty lists every question
    #[serde(default)]
    query: Option<String>,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct ReloadDatasetParams {
    /// "directory" or "faq"
    dataset: String,
}

#[derive(Debug, Serialize)]
struct FloorOption {
    value: String,
    label: String,
}

fn to_mcp_error(e: impl std::fmt::Display) -> McpError {
    McpError {
        code: ErrorCode::INTERNAL_ERROR,
        message: Cow::from(e.to_string()),
        data: None,
    }
}

fn invalid_params(message: String) -> McpError {
    McpError {
        code: ErrorCode::INVALID_PARAMS,
        message: Cow::from(message),
        data: None,
    }
}

/// Map a service error to a tool result.
///
/// An unavailable dataset is reported as a failed tool call carrying the user-facing
/// message; everything else is a protocol error.
fn search_error_result(e: SearchError) -> Result<CallToolResult, McpError> {
    match e {
        SearchError::Unavailable(message) => {
            Ok(CallToolResult::error(vec![Content::text(message)]))
        }
        SearchError::InvalidParameters(message) => Err(invalid_params(message)),
        other => {
            tracing::error!("Search failed: {}", other);
            Err(to_mcp_error(other))
        }
    }
}

fn json_result(value: &impl Serialize) -> Result<CallToolResult, McpError> {
    let json = serde_json::to_string_pretty(value).map_err(to_mcp_error)?;
    Ok(CallToolResult::success(vec![Content::text(json)]))
}

#[tool_router]
impl ShelfSearchServer {
    /// Create a new server over the given services.
    pub fn new(
        directory_service: Arc<dyn DirectoryService>,
        faq_service: Arc<dyn FaqService>,
    ) -> Self {
        Self {
            directory_service,
            faq_service,
            tool_router: Self::tool_router(),
        }
    }

    /// Search the store directory.
    #[tool(
        description = "Fuzzy search the store directory. Optionally restrict to one floor (exact value from list_floors). An empty query lists every entry. Returns matching entries, counts and a rendered table."
    )]
    async fn search_directory(
        &self,
        params: Parameters<SearchDirectoryParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;
        let query = params.query.unwrap_or_default();

        tracing::debug!(
            "MCP Handler: search_directory query={:?} floor={:?}",
            query,
            params.floor
        );

        match self
            .directory_service
            .search(&query, params.floor.as_deref())
            .await
        {
            Ok(response) => json_result(&response),
            Err(e) => search_error_result(e),
        }
    }

    /// List selectable floors.
    #[tool(description = "List the floors the directory can be filtered by, in ascending order")]
    async fn list_floors(&self) -> Result<CallToolResult, McpError> {
        match self.directory_service.floors().await {
            Ok(floors) => {
                let options: Vec<FloorOption> = floors
                    .into_iter()
                    .map(|value| FloorOption {
                        label: render::floor_label(&value),
                        value,
                    })
                    .collect();
                json_result(&serde_json::json!({ "floors": options }))
            }
            Err(e) => search_error_result(e),
        }
    }

    /// Search the FAQ.
    #[tool(
        description = "Fuzzy search the FAQ by question, answer and keywords. An empty query lists every question. Returns matching questions, counts and rendered cards."
    )]
    async fn search_faq(
        &self,
        params: Parameters<SearchFaqParams>,
    ) -> Result<CallToolResult, McpError> {
        let query = params.0.query.unwrap_or_default();
        tracing::debug!("MCP Handler: search_faq query={:?}", query);

        match self.faq_service.search(&query).await {
            Ok(response) => json_result(&response),
            Err(e) => search_error_result(e),
        }
    }

    /// Show the whole directory.
    #[tool(description = "Clear the directory query and floor filter and show every entry")]
    async fn reset_directory(&self) -> Result<CallToolResult, McpError> {
        match self.directory_service.reset().await {
            Ok(response) => json_result(&response),
            Err(e) => search_error_result(e),
        }
    }

    /// Show the whole FAQ.
    #[tool(description = "Clear the FAQ query and show every question")]
    async fn reset_faq(&self) -> Result<CallToolResult, McpError> {
        match self.faq_service.reset().await {
            Ok(response) => json_result(&response),
            Err(e) => search_error_result(e),
        }
    }

    /// Fetch a dataset again.
    #[tool(
        description = "Fetch a dataset (\"directory\" or \"faq\") from its source again and rebuild its search index"
    )]
    async fn reload_dataset(
        &self,
        params: Parameters<ReloadDatasetParams>,
    ) -> Result<CallToolResult, McpError> {
        let kind: DatasetKind = params.0.dataset.parse().map_err(invalid_params)?;
        tracing::info!("MCP Handler: reload_dataset {}", kind);

        let result = match kind {
            DatasetKind::Directory => self.directory_service.reload().await,
            DatasetKind::Faq => self.faq_service.reload().await,
        };

        match result {
            Ok(response) => json_result(&response),
            Err(e) => search_error_result(e),
        }
    }
}
