//! MCP tool implementations.
//!
//! Each tool module owns its request shape and a `run` function taking the
//! client; the server wires them to rmcp. Shared pagination plumbing lives
//! here so every paginated tool drives the normalizer and aggregator the
//! same way.

pub mod compliance;
pub mod issues;
pub mod metrics;
pub mod runs;
pub mod vulnerabilities;

use std::future::Future;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::error::ClassifiedError;
use crate::pagination::{
    fetch_multiple_pages_with, normalize_with, pagination_metadata, MultiPageOptions,
    PaginatedResponse, PaginationMetadata, PaginationParams, TracingLog,
};

pub use compliance::ComplianceReportRequest;
pub use issues::ListIssuesRequest;
pub use metrics::RepositoryMetricsRequest;
pub use runs::ListRunsRequest;
pub use vulnerabilities::ListVulnerabilitiesRequest;

pub(crate) fn default_provider() -> String {
    "GITHUB".to_string()
}

/// Caller-facing pagination fields, flattened into paginated tool requests.
///
/// Kept loose on purpose: values go through the total normalizer rather
/// than being rejected at the schema boundary.
#[derive(Debug, Clone, Default, Deserialize, Serialize, JsonSchema)]
pub struct PaginationInput {
    /// Items per page for forward pagination.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first: Option<i64>,
    /// Opaque cursor to continue forward from.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub after: Option<String>,
    /// Items per page for backward pagination.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last: Option<i64>,
    /// Opaque cursor to page backward from.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub before: Option<String>,
    /// Legacy offset fallback.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<i64>,
    /// Alias for `first`; loses to an explicit `first`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<i64>,
    /// Fetch up to this many pages and aggregate them into one result.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_pages: Option<i64>,
}

impl PaginationInput {
    /// Normalize into canonical parameters, warning through tracing.
    pub fn normalized(&self) -> PaginationParams {
        let raw = serde_json::to_value(self).unwrap_or(Value::Null);
        normalize_with(&raw, &TracingLog)
    }
}

/// Parameters for one forward page fetch within a multi-page loop.
///
/// The first call (no loop cursor yet) starts from the caller's `after`
/// cursor; later calls continue from where the previous page ended.
pub(crate) fn forward_page(
    params: &PaginationParams,
    cursor: Option<String>,
    page_size: u64,
) -> PaginationParams {
    let mut page = params.clone();
    page.first = Some(page_size);
    page.last = None;
    page.before = None;
    page.max_pages = None;
    page.after = cursor.or_else(|| params.after.clone().filter(|c| !c.is_empty()));
    page
}

/// Aggregate up to `max_pages` forward pages into one tool result.
pub(crate) async fn aggregate<T, F, Fut>(
    fetch_page: F,
    params: &PaginationParams,
) -> Result<Value, ClassifiedError>
where
    T: Serialize,
    F: FnMut(Option<String>, u64) -> Fut,
    Fut: Future<Output = Result<PaginatedResponse<T>, ClassifiedError>>,
{
    let options = MultiPageOptions {
        max_pages: params.max_pages.unwrap_or(10),
        page_size: params.page_size(),
        fetch_all: false,
        on_progress: None,
    };
    let result = fetch_multiple_pages_with(fetch_page, options, &TracingLog).await?;

    let metadata = PaginationMetadata {
        has_more_pages: result.has_more,
        page_size: result.items.len(),
        next_cursor: if result.has_more {
            result.last_cursor.clone()
        } else {
            None
        },
        previous_cursor: None,
        total_count: result.total_count.filter(|t| *t > 0),
        pages_fetched: (result.pages_fetched > 1).then_some(result.pages_fetched),
        limit_reached: result.has_more.then_some(true),
    };
    Ok(json!({"items": result.items, "pagination": metadata}))
}

/// Format a single page as a tool result.
pub(crate) fn single_page_json<T: Serialize>(page: &PaginatedResponse<T>) -> Value {
    json!({
        "items": page.items,
        "pagination": pagination_metadata(page, 1, false),
    })
}
