//! `list_issues` tool: code-quality issues for a repository.

use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::Value;

use crate::client::{DeepSourceClient, RepoRef};
use crate::error::ClassifiedError;

use super::{aggregate, default_provider, forward_page, single_page_json, PaginationInput};

/// Request for the `list_issues` tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ListIssuesRequest {
    /// Organization or user login owning the repository.
    pub login: String,
    /// Repository name.
    pub name: String,
    /// VCS provider (GITHUB, GITLAB, BITBUCKET). Defaults to GITHUB.
    #[serde(default = "default_provider")]
    pub provider: String,
    /// Restrict issues to a file path.
    #[serde(default)]
    pub path: Option<String>,
    /// Restrict issues to one analyzer shortcode (e.g. `python`).
    #[serde(default)]
    pub analyzer: Option<String>,
    #[serde(flatten)]
    pub pagination: PaginationInput,
}

pub async fn run(
    client: &DeepSourceClient,
    req: ListIssuesRequest,
) -> Result<Value, ClassifiedError> {
    let repo = RepoRef::new(req.login, req.name, req.provider);
    let mut params = req.pagination.normalized();
    if let Some(path) = req.path {
        params.extra.insert("path".to_string(), path.into());
    }
    if let Some(analyzer) = req.analyzer {
        params.extra.insert("analyzer".to_string(), analyzer.into());
    }

    if params.max_pages.is_some() {
        let fetch = |cursor, page_size| {
            let page_params = forward_page(&params, cursor, page_size);
            let repo = &repo;
            async move { client.issues(repo, &page_params).await }
        };
        aggregate(fetch, &params).await
    } else {
        let page = client.issues(&repo, &params).await?;
        Ok(single_page_json(&page))
    }
}
