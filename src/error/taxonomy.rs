//! Error taxonomy for DeepSource API failures.
//!
//! Every error surfaced by this crate carries exactly one category from the
//! closed set below. Categories drive caller-visible retry guidance and
//! uniform display, regardless of the originating failure's shape.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// The category assigned to a classified error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCategory {
    /// Invalid, expired, or missing credentials.
    Auth,
    /// API rate limit or request quota exceeded.
    RateLimit,
    /// Network-level connectivity failure.
    Network,
    /// Request or operation timed out.
    Timeout,
    /// GraphQL schema mismatch (unknown field, argument, or type).
    Schema,
    /// The requested resource does not exist.
    NotFound,
    /// Upstream server-side error (5xx).
    Server,
    /// Client-side request error (4xx other than the exact matches).
    Client,
    /// Response could not be parsed into the expected shape.
    Format,
    /// Anything that matched no other category.
    Other,
}

impl ErrorCategory {
    /// Whether consumers may reasonably retry an error of this category.
    ///
    /// Classification only signals retryability; this crate never retries
    /// on its own.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            ErrorCategory::Network
                | ErrorCategory::Timeout
                | ErrorCategory::RateLimit
                | ErrorCategory::Server
        )
    }

    /// Stable string form used in tool error payloads.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCategory::Auth => "AUTH",
            ErrorCategory::RateLimit => "RATE_LIMIT",
            ErrorCategory::Network => "NETWORK",
            ErrorCategory::Timeout => "TIMEOUT",
            ErrorCategory::Schema => "SCHEMA",
            ErrorCategory::NotFound => "NOT_FOUND",
            ErrorCategory::Server => "SERVER",
            ErrorCategory::Client => "CLIENT",
            ErrorCategory::Format => "FORMAT",
            ErrorCategory::Other => "OTHER",
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One keyword group in the classification table.
struct KeywordGroup {
    category: ErrorCategory,
    pattern: Regex,
}

impl KeywordGroup {
    fn new(category: ErrorCategory, keywords: &[&str]) -> Self {
        let alternation = keywords
            .iter()
            .map(|k| regex::escape(k))
            .collect::<Vec<_>>()
            .join("|");
        Self {
            category,
            // Keywords are literal substrings; escaped above.
            pattern: Regex::new(&format!("(?i){alternation}")).expect("valid keyword pattern"),
        }
    }
}

/// The ordered classification table. Order is a correctness requirement:
/// a message can contain keywords from several groups ("server error: not
/// found"), and the first group checked decides the category.
fn keyword_groups() -> &'static [KeywordGroup] {
    static GROUPS: OnceLock<Vec<KeywordGroup>> = OnceLock::new();
    GROUPS.get_or_init(|| {
        vec![
            KeywordGroup::new(
                ErrorCategory::Auth,
                &[
                    "authentication",
                    "unauthorized",
                    "access denied",
                    "forbidden",
                    "token",
                    "api key",
                ],
            ),
            KeywordGroup::new(
                ErrorCategory::RateLimit,
                &["rate limit", "too many requests", "throttled"],
            ),
            KeywordGroup::new(
                ErrorCategory::Network,
                &["network", "connection", "econnreset", "econnrefused"],
            ),
            KeywordGroup::new(
                ErrorCategory::Timeout,
                &["timeout", "timed out", "etimedout"],
            ),
            KeywordGroup::new(
                ErrorCategory::Schema,
                &[
                    "cannot query field",
                    "unknown argument",
                    "unknown type",
                    "field not defined",
                ],
            ),
            KeywordGroup::new(
                ErrorCategory::NotFound,
                &["not found", "nonetype", "does not exist"],
            ),
            KeywordGroup::new(
                ErrorCategory::Server,
                &["server error", "internal error", "500"],
            ),
        ]
    })
}

/// Classify an error message by keyword matching.
///
/// Tests the message against the ordered keyword groups; the first group
/// containing any matching keyword wins. Messages matching no group are
/// [`ErrorCategory::Other`].
pub fn classify_message(message: &str) -> ErrorCategory {
    keyword_groups()
        .iter()
        .find(|group| group.pattern.is_match(message))
        .map(|group| group.category)
        .unwrap_or(ErrorCategory::Other)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_auth_keywords() {
        assert_eq!(classify_message("Authentication failed"), ErrorCategory::Auth);
        assert_eq!(classify_message("401 Unauthorized"), ErrorCategory::Auth);
        assert_eq!(classify_message("access denied for user"), ErrorCategory::Auth);
        assert_eq!(classify_message("invalid API key provided"), ErrorCategory::Auth);
    }

    #[test]
    fn test_classify_rate_limit_keywords() {
        assert_eq!(classify_message("rate limit exceeded"), ErrorCategory::RateLimit);
        assert_eq!(classify_message("Too Many Requests"), ErrorCategory::RateLimit);
        assert_eq!(classify_message("request throttled"), ErrorCategory::RateLimit);
    }

    #[test]
    fn test_classify_network_keywords() {
        assert_eq!(classify_message("network unreachable"), ErrorCategory::Network);
        assert_eq!(classify_message("ECONNRESET"), ErrorCategory::Network);
        assert_eq!(classify_message("connection refused"), ErrorCategory::Network);
    }

    #[test]
    fn test_classify_timeout_keywords() {
        assert_eq!(classify_message("request timed out"), ErrorCategory::Timeout);
        assert_eq!(classify_message("ETIMEDOUT"), ErrorCategory::Timeout);
    }

    #[test]
    fn test_classify_schema_keywords() {
        assert_eq!(
            classify_message("Cannot query field \"issues\" on type \"Repository\""),
            ErrorCategory::Schema
        );
        assert_eq!(classify_message("Unknown argument \"first\""), ErrorCategory::Schema);
    }

    #[test]
    fn test_classify_not_found_keywords() {
        assert_eq!(classify_message("repository not found"), ErrorCategory::NotFound);
        assert_eq!(classify_message("'NoneType' object"), ErrorCategory::NotFound);
    }

    #[test]
    fn test_classify_server_keywords() {
        assert_eq!(classify_message("internal error"), ErrorCategory::Server);
        assert_eq!(classify_message("HTTP 500"), ErrorCategory::Server);
    }

    #[test]
    fn test_classify_no_match_is_other() {
        assert_eq!(classify_message("something odd happened"), ErrorCategory::Other);
        assert_eq!(classify_message(""), ErrorCategory::Other);
    }

    #[test]
    fn test_group_order_decides_multi_keyword_messages() {
        // "not found" is checked before the server group, so the combined
        // message lands in NotFound even though "server error" also matches.
        assert_eq!(
            classify_message("server error: not found"),
            ErrorCategory::NotFound
        );
        // "token" (auth group) outranks "rate limit".
        assert_eq!(
            classify_message("token rejected due to rate limit"),
            ErrorCategory::Auth
        );
        // "connection" (network) outranks "timed out".
        assert_eq!(
            classify_message("connection timed out"),
            ErrorCategory::Network
        );
    }

    #[test]
    fn test_retryable_categories() {
        assert!(ErrorCategory::Network.is_retryable());
        assert!(ErrorCategory::Timeout.is_retryable());
        assert!(ErrorCategory::RateLimit.is_retryable());
        assert!(ErrorCategory::Server.is_retryable());

        assert!(!ErrorCategory::Auth.is_retryable());
        assert!(!ErrorCategory::NotFound.is_retryable());
        assert!(!ErrorCategory::Schema.is_retryable());
        assert!(!ErrorCategory::Client.is_retryable());
        assert!(!ErrorCategory::Format.is_retryable());
        assert!(!ErrorCategory::Other.is_retryable());
    }

    #[test]
    fn test_category_as_str_round_trip() {
        assert_eq!(ErrorCategory::RateLimit.as_str(), "RATE_LIMIT");
        assert_eq!(ErrorCategory::NotFound.to_string(), "NOT_FOUND");
        let json = serde_json::to_string(&ErrorCategory::RateLimit).unwrap();
        assert_eq!(json, "\"RATE_LIMIT\"");
    }
}
