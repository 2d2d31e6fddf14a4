//! DeepSource GraphQL API client.
//!
//! Wraps a `reqwest` client and maps every transport failure into the
//! crate's uniform error taxonomy at this boundary, so callers only ever
//! see [`ClassifiedError`].

pub mod models;
pub mod queries;

use serde_json::{json, Map, Value};

use crate::config::DeepSourceConfig;
use crate::error::{classify, ClassifiedError, ErrorCategory, RawError, TransportError};
use crate::pagination::{PaginatedResponse, PaginationParams};

pub use models::{
    AnalysisRun, ComplianceReport, IssueDetail, IssueNode, Metric, MetricItem,
    VulnerabilityOccurrence,
};

/// Identifies a repository on a VCS provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoRef {
    /// Organization or user login.
    pub login: String,
    /// Repository name.
    pub name: String,
    /// VCS provider key (GITHUB, GITLAB, BITBUCKET, ...).
    pub provider: String,
}

impl RepoRef {
    pub fn new(
        login: impl Into<String>,
        name: impl Into<String>,
        provider: impl Into<String>,
    ) -> Self {
        Self {
            login: login.into(),
            name: name.into(),
            provider: provider.into(),
        }
    }

    /// GraphQL variables identifying this repository.
    pub fn variables(&self) -> Map<String, Value> {
        let mut vars = Map::new();
        vars.insert("login".to_string(), self.login.clone().into());
        vars.insert("name".to_string(), self.name.clone().into());
        vars.insert(
            "provider".to_string(),
            self.provider.to_uppercase().into(),
        );
        vars
    }
}

/// Client for the DeepSource GraphQL API.
#[derive(Debug, Clone)]
pub struct DeepSourceClient {
    http: reqwest::Client,
    config: DeepSourceConfig,
}

impl DeepSourceClient {
    /// Build a client from configuration.
    pub fn new(config: DeepSourceConfig) -> Result<Self, ClassifiedError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| {
                ClassifiedError::new(
                    ErrorCategory::Other,
                    format!("Failed to create HTTP client: {e}"),
                )
            })?;
        Ok(Self { http, config })
    }

    /// Execute a GraphQL document and return the raw response body.
    ///
    /// All failure shapes — connect/timeout errors, non-success statuses,
    /// and GraphQL `errors` bodies arriving under HTTP 200 — are funneled
    /// through the classification chain here, exactly once.
    async fn execute_graphql(
        &self,
        query: &str,
        variables: Value,
    ) -> Result<Value, ClassifiedError> {
        let response = self
            .http
            .post(&self.config.endpoint)
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .json(&json!({"query": query, "variables": variables}))
            .send()
            .await
            .map_err(|e| classify(e.into()))?;

        let status = response.status();
        if !status.is_success() {
            let status_text = status.canonical_reason().map(str::to_string);
            let body = response.json::<Value>().await.ok();
            return Err(classify(
                TransportError::http(status.as_u16(), status_text, body).into(),
            ));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| classify(RawError::Parse(e.to_string())))?;

        // GraphQL errors ride in a 200 body; hand them to the GraphQL stage.
        let has_errors = body
            .get("errors")
            .and_then(Value::as_array)
            .is_some_and(|errors| !errors.is_empty());
        if has_errors {
            return Err(classify(TransportError::graphql_body(body).into()));
        }

        Ok(body)
    }

    /// Fetch one page of a repository connection field.
    async fn fetch_connection<T: serde::de::DeserializeOwned>(
        &self,
        query: &str,
        field: &str,
        repo: &RepoRef,
        params: &PaginationParams,
    ) -> Result<PaginatedResponse<T>, ClassifiedError> {
        let mut variables = params.to_variables();
        variables.extend(repo.variables());
        let body = self.execute_graphql(query, Value::Object(variables)).await?;
        let connection = models::dig(&body, &["data", "repository", field])?;
        models::connection_from_value(connection)
    }

    /// One page of repository issues.
    pub async fn issues(
        &self,
        repo: &RepoRef,
        params: &PaginationParams,
    ) -> Result<PaginatedResponse<IssueNode>, ClassifiedError> {
        self.fetch_connection(queries::ISSUES, "issues", repo, params)
            .await
    }

    /// One page of analysis runs.
    pub async fn runs(
        &self,
        repo: &RepoRef,
        params: &PaginationParams,
    ) -> Result<PaginatedResponse<AnalysisRun>, ClassifiedError> {
        self.fetch_connection(queries::RUNS, "runs", repo, params)
            .await
    }

    /// One page of dependency vulnerabilities.
    pub async fn vulnerabilities(
        &self,
        repo: &RepoRef,
        params: &PaginationParams,
    ) -> Result<PaginatedResponse<VulnerabilityOccurrence>, ClassifiedError> {
        self.fetch_connection(
            queries::VULNERABILITIES,
            "dependencyVulnerabilities",
            repo,
            params,
        )
        .await
    }

    /// All quality metrics for a repository (unpaginated upstream).
    pub async fn metrics(&self, repo: &RepoRef) -> Result<Vec<Metric>, ClassifiedError> {
        let body = self
            .execute_graphql(queries::METRICS, Value::Object(repo.variables()))
            .await?;
        let metrics = models::dig(&body, &["data", "repository", "metrics"])?;
        serde_json::from_value(metrics.clone()).map_err(|e| classify(e.into()))
    }

    /// A single compliance report by key.
    pub async fn compliance_report(
        &self,
        repo: &RepoRef,
        report_key: &str,
    ) -> Result<ComplianceReport, ClassifiedError> {
        let mut variables = repo.variables();
        variables.insert(
            "reportKey".to_string(),
            report_key.to_uppercase().into(),
        );
        let body = self
            .execute_graphql(queries::COMPLIANCE_REPORT, Value::Object(variables))
            .await?;
        let report = models::dig(&body, &["data", "repository", "report"])?;
        serde_json::from_value(report.clone()).map_err(|e| classify(e.into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_ref_variables_uppercase_provider() {
        let repo = RepoRef::new("acme", "widget", "github");
        let vars = repo.variables();
        assert_eq!(vars.get("login"), Some(&Value::from("acme")));
        assert_eq!(vars.get("name"), Some(&Value::from("widget")));
        assert_eq!(vars.get("provider"), Some(&Value::from("GITHUB")));
    }

    #[test]
    fn test_client_builds_from_config() {
        let client = DeepSourceClient::new(DeepSourceConfig::new("dsp_test")).unwrap();
        assert_eq!(client.config.api_key, "dsp_test");
    }
}
