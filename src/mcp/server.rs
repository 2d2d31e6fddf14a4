//! MCP server exposing DeepSource data as tools.
//!
//! Tool bodies live under [`crate::mcp::tools`]; this module only adapts
//! them to the protocol: schema extraction, result formatting, and mapping
//! [`ClassifiedError`] into MCP error payloads that keep the category and
//! retryability visible to the calling agent.

use std::sync::Arc;

use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{CallToolResult, Content, Implementation, ServerCapabilities, ServerInfo};
use rmcp::{tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler};
use serde_json::{json, Value};
use tracing::debug;

use crate::client::DeepSourceClient;
use crate::error::ClassifiedError;
use crate::mcp::tools::{
    self, ComplianceReportRequest, ListIssuesRequest, ListRunsRequest, ListVulnerabilitiesRequest,
    RepositoryMetricsRequest,
};

/// The DeepSource MCP server.
#[derive(Clone)]
pub struct DeepSourceMcpServer {
    client: Arc<DeepSourceClient>,
    tool_router: ToolRouter<Self>,
}

fn to_mcp_error(err: ClassifiedError) -> McpError {
    McpError::internal_error(
        err.message.clone(),
        Some(json!({
            "category": err.category.as_str(),
            "retryable": err.is_retryable(),
        })),
    )
}

fn json_result(value: &Value) -> Result<CallToolResult, McpError> {
    let text = serde_json::to_string_pretty(value)
        .map_err(|e| McpError::internal_error(format!("Failed to serialize result: {e}"), None))?;
    Ok(CallToolResult::success(vec![Content::text(text)]))
}

#[tool_router]
impl DeepSourceMcpServer {
    pub fn new(client: DeepSourceClient) -> Self {
        Self {
            client: Arc::new(client),
            tool_router: Self::tool_router(),
        }
    }

    #[tool(
        description = "List code-quality issues in a DeepSource-analyzed repository. Supports cursor pagination (first/after, last/before), an offset fallback, and multi-page aggregation via max_pages."
    )]
    async fn list_issues(
        &self,
        Parameters(req): Parameters<ListIssuesRequest>,
    ) -> Result<CallToolResult, McpError> {
        debug!(login = %req.login, name = %req.name, "list_issues");
        let value = tools::issues::run(&self.client, req)
            .await
            .map_err(to_mcp_error)?;
        json_result(&value)
    }

    #[tool(
        description = "List analysis runs for a DeepSource-analyzed repository, newest first. Supports cursor pagination and multi-page aggregation via max_pages."
    )]
    async fn list_runs(
        &self,
        Parameters(req): Parameters<ListRunsRequest>,
    ) -> Result<CallToolResult, McpError> {
        debug!(login = %req.login, name = %req.name, "list_runs");
        let value = tools::runs::run(&self.client, req)
            .await
            .map_err(to_mcp_error)?;
        json_result(&value)
    }

    #[tool(
        description = "Fetch quality metrics (line coverage, branch coverage, and others) for a DeepSource-analyzed repository, optionally filtered by metric shortcode."
    )]
    async fn repository_metrics(
        &self,
        Parameters(req): Parameters<RepositoryMetricsRequest>,
    ) -> Result<CallToolResult, McpError> {
        debug!(login = %req.login, name = %req.name, "repository_metrics");
        let value = tools::metrics::run(&self.client, req)
            .await
            .map_err(to_mcp_error)?;
        json_result(&value)
    }

    #[tool(
        description = "Fetch a security compliance report (e.g. OWASP_TOP_10, SANS_TOP_25) for a DeepSource-analyzed repository."
    )]
    async fn compliance_report(
        &self,
        Parameters(req): Parameters<ComplianceReportRequest>,
    ) -> Result<CallToolResult, McpError> {
        debug!(login = %req.login, name = %req.name, key = %req.report_key, "compliance_report");
        let value = tools::compliance::run(&self.client, req)
            .await
            .map_err(to_mcp_error)?;
        json_result(&value)
    }

    #[tool(
        description = "List dependency vulnerabilities detected in a DeepSource-analyzed repository. Supports cursor pagination; with max_pages, pages are merged into a single result."
    )]
    async fn list_vulnerabilities(
        &self,
        Parameters(req): Parameters<ListVulnerabilitiesRequest>,
    ) -> Result<CallToolResult, McpError> {
        debug!(login = %req.login, name = %req.name, "list_vulnerabilities");
        let value = tools::vulnerabilities::run(&self.client, req)
            .await
            .map_err(to_mcp_error)?;
        json_result(&value)
    }
}

#[tool_handler]
impl ServerHandler for DeepSourceMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: Default::default(),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "deepsource-mcp".to_string(),
                title: Some("DeepSource MCP Server".to_string()),
                version: env!("CARGO_PKG_VERSION").to_string(),
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "Query DeepSource code-quality data: issues, analysis runs, metrics, \
                 compliance reports, and dependency vulnerabilities."
                    .to_string(),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DeepSourceConfig;
    use crate::error::ErrorCategory;

    fn server() -> DeepSourceMcpServer {
        let client = DeepSourceClient::new(DeepSourceConfig::new("dsp_test")).unwrap();
        DeepSourceMcpServer::new(client)
    }

    #[test]
    fn test_get_info_identifies_server() {
        let info = server().get_info();
        assert_eq!(info.server_info.name, "deepsource-mcp");
        assert_eq!(info.server_info.version, env!("CARGO_PKG_VERSION"));
        assert!(info.capabilities.tools.is_some());
    }

    #[test]
    fn test_router_exposes_all_tools() {
        let router = DeepSourceMcpServer::tool_router();
        let mut names: Vec<String> = router
            .list_all()
            .into_iter()
            .map(|tool| tool.name.to_string())
            .collect();
        names.sort();
        assert_eq!(
            names,
            vec![
                "compliance_report",
                "list_issues",
                "list_runs",
                "list_vulnerabilities",
                "repository_metrics",
            ]
        );
    }

    #[test]
    fn test_classified_error_maps_to_mcp_error() {
        let err = ClassifiedError::new(ErrorCategory::RateLimit, "Rate limit exceeded");
        let mcp = to_mcp_error(err);
        assert_eq!(mcp.message, "Rate limit exceeded");
        let data = mcp.data.expect("error data");
        assert_eq!(data["category"], "RATE_LIMIT");
        assert_eq!(data["retryable"], true);
    }
}
