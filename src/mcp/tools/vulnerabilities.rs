//! `list_vulnerabilities` tool: dependency vulnerabilities for a
//! repository. Multi-page requests collect whole pages and merge them,
//! preserving boundary cursors from the first and last page.

use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::client::{DeepSourceClient, RepoRef};
use crate::error::ClassifiedError;
use crate::pagination::{merge_responses, pagination_metadata};

use super::{default_provider, forward_page, single_page_json, PaginationInput};

/// Request for the `list_vulnerabilities` tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ListVulnerabilitiesRequest {
    /// Organization or user login owning the repository.
    pub login: String,
    /// Repository name.
    pub name: String,
    /// VCS provider (GITHUB, GITLAB, BITBUCKET). Defaults to GITHUB.
    #[serde(default = "default_provider")]
    pub provider: String,
    #[serde(flatten)]
    pub pagination: PaginationInput,
}

pub async fn run(
    client: &DeepSourceClient,
    req: ListVulnerabilitiesRequest,
) -> Result<Value, ClassifiedError> {
    let repo = RepoRef::new(req.login, req.name, req.provider);
    let params = req.pagination.normalized();

    let Some(max_pages) = params.max_pages else {
        let page = client.vulnerabilities(&repo, &params).await?;
        return Ok(single_page_json(&page));
    };

    let page_size = params.page_size();
    let mut responses = Vec::new();
    let mut cursor: Option<String> = None;
    for _ in 0..max_pages {
        let page_params = forward_page(&params, cursor.take(), page_size);
        let page = client.vulnerabilities(&repo, &page_params).await?;
        let info = page.page_info.clone();
        responses.push(page);

        if !info.has_next_page {
            break;
        }
        match info.end_cursor {
            Some(next) => cursor = Some(next),
            None => break,
        }
    }

    let pages_fetched = responses.len() as u32;
    let merged = merge_responses(responses);
    let limit_reached = merged.page_info.has_next_page;
    let metadata = pagination_metadata(&merged, pages_fetched, limit_reached);
    Ok(json!({"items": merged.items, "pagination": metadata}))
}
