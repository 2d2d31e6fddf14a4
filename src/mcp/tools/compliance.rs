//! `compliance_report` tool: OWASP Top 10 / SANS Top 25 style reports.

use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::Value;

use crate::client::{DeepSourceClient, RepoRef};
use crate::error::{classify, ClassifiedError};

use super::default_provider;

/// Request for the `compliance_report` tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ComplianceReportRequest {
    /// Organization or user login owning the repository.
    pub login: String,
    /// Repository name.
    pub name: String,
    /// VCS provider (GITHUB, GITLAB, BITBUCKET). Defaults to GITHUB.
    #[serde(default = "default_provider")]
    pub provider: String,
    /// Report key, e.g. `OWASP_TOP_10` or `SANS_TOP_25`. Case-insensitive.
    pub report_key: String,
}

pub async fn run(
    client: &DeepSourceClient,
    req: ComplianceReportRequest,
) -> Result<Value, ClassifiedError> {
    let repo = RepoRef::new(req.login, req.name, req.provider);
    let report = client.compliance_report(&repo, &req.report_key).await?;
    serde_json::to_value(report).map_err(|e| classify(e.into()))
}
