//! GraphQL documents for the DeepSource API.
//!
//! Pure data-shaping: each document selects a Relay connection (or a plain
//! object) that the client maps into crate types. Pagination variables are
//! shared across the paginated documents.

/// Repository issues, paginated.
pub const ISSUES: &str = r#"
query Issues($login: String!, $name: String!, $provider: VCSProvider!, $first: Int, $after: String, $last: Int, $before: String, $path: String, $analyzer: String) {
  repository(login: $login, name: $name, vcsProvider: $provider) {
    issues(first: $first, after: $after, last: $last, before: $before, path: $path, analyzerShortcode: $analyzer) {
      totalCount
      pageInfo {
        hasNextPage
        hasPreviousPage
        startCursor
        endCursor
      }
      edges {
        node {
          issue {
            shortcode
            title
            category
            severity
          }
          occurrenceCount
        }
      }
    }
  }
}
"#;

/// Analysis runs, paginated.
pub const RUNS: &str = r#"
query Runs($login: String!, $name: String!, $provider: VCSProvider!, $first: Int, $after: String, $last: Int, $before: String) {
  repository(login: $login, name: $name, vcsProvider: $provider) {
    runs(first: $first, after: $after, last: $last, before: $before) {
      totalCount
      pageInfo {
        hasNextPage
        hasPreviousPage
        startCursor
        endCursor
      }
      edges {
        node {
          runUid
          status
          branchName
          commitOid
          createdAt
          summary {
            occurrencesIntroduced
            occurrencesResolved
            occurrencesSuppressed
          }
        }
      }
    }
  }
}
"#;

/// Quality metrics for a repository. Not a connection; the metric list is
/// small and unpaginated upstream.
pub const METRICS: &str = r#"
query Metrics($login: String!, $name: String!, $provider: VCSProvider!) {
  repository(login: $login, name: $name, vcsProvider: $provider) {
    metrics {
      name
      shortcode
      items {
        key
        threshold
        latestValue
        valueDisplay
      }
    }
  }
}
"#;

/// A single compliance report (OWASP Top 10, SANS Top 25, ...).
pub const COMPLIANCE_REPORT: &str = r#"
query ComplianceReport($login: String!, $name: String!, $provider: VCSProvider!, $reportKey: ReportKey!) {
  repository(login: $login, name: $name, vcsProvider: $provider) {
    report(key: $reportKey) {
      key
      title
      status
      currentValue
      securityIssueStats {
        key
        title
        occurrence {
          critical
          major
          minor
          total
        }
      }
    }
  }
}
"#;

/// Dependency vulnerabilities, paginated.
pub const VULNERABILITIES: &str = r#"
query Vulnerabilities($login: String!, $name: String!, $provider: VCSProvider!, $first: Int, $after: String, $last: Int, $before: String) {
  repository(login: $login, name: $name, vcsProvider: $provider) {
    dependencyVulnerabilities(first: $first, after: $after, last: $last, before: $before) {
      totalCount
      pageInfo {
        hasNextPage
        hasPreviousPage
        startCursor
        endCursor
      }
      edges {
        node {
          package {
            name
            ecosystem
          }
          packageVersion {
            version
          }
          vulnerability {
            identifier
            severity
            cvssV3BaseScore
            summary
          }
          reachability
        }
      }
    }
  }
}
"#;
