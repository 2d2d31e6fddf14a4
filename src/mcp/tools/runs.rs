//! `list_runs` tool: analysis run history for a repository.

use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::Value;

use crate::client::{DeepSourceClient, RepoRef};
use crate::error::ClassifiedError;

use super::{aggregate, default_provider, forward_page, single_page_json, PaginationInput};

/// Request for the `list_runs` tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ListRunsRequest {
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
    req: ListRunsRequest,
) -> Result<Value, ClassifiedError> {
    let repo = RepoRef::new(req.login, req.name, req.provider);
    let params = req.pagination.normalized();

    if params.max_pages.is_some() {
        let fetch = |cursor, page_size| {
            let page_params = forward_page(&params, cursor, page_size);
            let repo = &repo;
            async move { client.runs(repo, &page_params).await }
        };
        aggregate(fetch, &params).await
    } else {
        let page = client.runs(&repo, &params).await?;
        Ok(single_page_json(&page))
    }
}
