//! Response models for the DeepSource API, plus the Relay connection
//! parser that maps GraphQL connection objects into [`PaginatedResponse`].

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{classify, ClassifiedError, RawError};
use crate::pagination::{PageInfo, PaginatedResponse};

/// An issue reported in a repository, with its occurrence count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueNode {
    pub issue: IssueDetail,
    #[serde(default)]
    pub occurrence_count: u64,
}

/// Static detail of an issue definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueDetail {
    pub shortcode: String,
    pub title: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub severity: Option<String>,
}

/// One analysis run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisRun {
    pub run_uid: String,
    pub status: String,
    #[serde(default)]
    pub branch_name: Option<String>,
    #[serde(default)]
    pub commit_oid: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub summary: Option<RunSummary>,
}

/// Occurrence movement for a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunSummary {
    #[serde(default)]
    pub occurrences_introduced: u64,
    #[serde(default)]
    pub occurrences_resolved: u64,
    #[serde(default)]
    pub occurrences_suppressed: u64,
}

/// A quality metric with its per-key items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metric {
    pub name: String,
    pub shortcode: String,
    #[serde(default)]
    pub items: Vec<MetricItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricItem {
    pub key: String,
    #[serde(default)]
    pub threshold: Option<f64>,
    #[serde(default)]
    pub latest_value: Option<f64>,
    #[serde(default)]
    pub value_display: Option<String>,
}

/// A compliance report (OWASP Top 10, SANS Top 25, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplianceReport {
    pub key: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub current_value: Option<f64>,
    #[serde(default)]
    pub security_issue_stats: Vec<SecurityIssueStat>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecurityIssueStat {
    pub key: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub occurrence: Option<OccurrenceBreakdown>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OccurrenceBreakdown {
    #[serde(default)]
    pub critical: u64,
    #[serde(default)]
    pub major: u64,
    #[serde(default)]
    pub minor: u64,
    #[serde(default)]
    pub total: u64,
}

/// One dependency vulnerability occurrence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VulnerabilityOccurrence {
    pub package: Package,
    #[serde(default)]
    pub package_version: Option<PackageVersion>,
    pub vulnerability: Vulnerability,
    #[serde(default)]
    pub reachability: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Package {
    pub name: String,
    #[serde(default)]
    pub ecosystem: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageVersion {
    pub version: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vulnerability {
    pub identifier: String,
    #[serde(default)]
    pub severity: Option<String>,
    #[serde(default)]
    pub cvss_v3_base_score: Option<f64>,
    #[serde(default)]
    pub summary: Option<String>,
}

/// Dig a dotted path out of a GraphQL response body.
///
/// A null along the way means the repository (or nested object) does not
/// exist for the caller's credentials; surface that as a not-found error
/// rather than a parse failure.
pub(crate) fn dig<'a>(body: &'a Value, path: &[&str]) -> Result<&'a Value, ClassifiedError> {
    let mut current = body;
    for key in path {
        current = match current.get(key) {
            Some(value) if !value.is_null() => value,
            _ => {
                return Err(classify(RawError::Message(format!(
                    "{key} not found in response"
                ))))
            }
        };
    }
    Ok(current)
}

/// Parse a Relay connection object (`edges[].node`, `pageInfo`,
/// `totalCount`) into a [`PaginatedResponse`].
pub(crate) fn connection_from_value<T: DeserializeOwned>(
    connection: &Value,
) -> Result<PaginatedResponse<T>, ClassifiedError> {
    let page_info: PageInfo = match connection.get("pageInfo") {
        Some(value) => {
            serde_json::from_value(value.clone()).map_err(|e| classify(e.into()))?
        }
        None => PageInfo::default(),
    };

    let total_count = connection
        .get("totalCount")
        .and_then(Value::as_u64)
        .unwrap_or(0);

    let mut items = Vec::new();
    if let Some(edges) = connection.get("edges").and_then(Value::as_array) {
        for edge in edges {
            let Some(node) = edge.get("node") else {
                continue;
            };
            let item: T = serde_json::from_value(node.clone()).map_err(|e| classify(e.into()))?;
            items.push(item);
        }
    }

    Ok(PaginatedResponse {
        items,
        page_info,
        total_count,
    })
}
