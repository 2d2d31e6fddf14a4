//! `repository_metrics` tool: code coverage and other quality metrics.

use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::client::{DeepSourceClient, RepoRef};
use crate::error::ClassifiedError;

use super::default_provider;

/// Request for the `repository_metrics` tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct RepositoryMetricsRequest {
    /// Organization or user login owning the repository.
    pub login: String,
    /// Repository name.
    pub name: String,
    /// VCS provider (GITHUB, GITLAB, BITBUCKET). Defaults to GITHUB.
    #[serde(default = "default_provider")]
    pub provider: String,
    /// Keep only metrics with these shortcodes (e.g. `LCV`, `BCV`).
    #[serde(default)]
    pub shortcode_in: Option<Vec<String>>,
}

pub async fn run(
    client: &DeepSourceClient,
    req: RepositoryMetricsRequest,
) -> Result<Value, ClassifiedError> {
    let repo = RepoRef::new(req.login, req.name, req.provider);
    let mut metrics = client.metrics(&repo).await?;

    if let Some(wanted) = req.shortcode_in {
        let wanted: Vec<String> = wanted.iter().map(|s| s.to_uppercase()).collect();
        metrics.retain(|m| wanted.contains(&m.shortcode.to_uppercase()));
    }

    let count = metrics.len();
    Ok(json!({"metrics": metrics, "count": count}))
}
