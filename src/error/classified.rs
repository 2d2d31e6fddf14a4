//! Classified error type carried across every API boundary in this crate.
//!
//! A `ClassifiedError` wraps exactly one underlying cause. It is created
//! once at the point of classification and never mutated afterward; outer
//! layers re-throw it unchanged.

use std::collections::HashMap;
use std::fmt;

use serde::Serialize;
use serde_json::Value;

use super::taxonomy::ErrorCategory;

/// An error annotated with a category from the closed taxonomy.
///
/// The `message` is human-readable and suitable for direct display;
/// technical detail lives in `original` and `metadata` only.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassifiedError {
    /// Display message.
    pub message: String,
    /// Taxonomy category.
    pub category: ErrorCategory,
    /// Rendered form of the underlying cause, when one exists.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original: Option<String>,
    /// Additional structured context (e.g. the raw GraphQL errors array).
    #[serde(skip_serializing_if = "HashMap::is_empty")]
    pub metadata: HashMap<String, Value>,
}

impl ClassifiedError {
    /// Creates a classified error with no cause or metadata.
    pub fn new(category: ErrorCategory, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            category,
            original: None,
            metadata: HashMap::new(),
        }
    }

    /// Attaches the rendered underlying cause.
    pub fn with_original(mut self, original: impl Into<String>) -> Self {
        self.original = Some(original.into());
        self
    }

    /// Attaches a metadata key-value pair.
    pub fn with_metadata(mut self, key: impl Into<String>, value: Value) -> Self {
        self.metadata.insert(key.into(), value);
        self
    }

    /// Whether consumers may reasonably retry this error.
    pub fn is_retryable(&self) -> bool {
        self.category.is_retryable()
    }
}

impl fmt::Display for ClassifiedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ClassifiedError {}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_new_has_no_cause_or_metadata() {
        let err = ClassifiedError::new(ErrorCategory::NotFound, "Not found (404)");
        assert_eq!(err.category, ErrorCategory::NotFound);
        assert_eq!(err.message, "Not found (404)");
        assert!(err.original.is_none());
        assert!(err.metadata.is_empty());
    }

    #[test]
    fn test_builder_attaches_cause_and_metadata() {
        let err = ClassifiedError::new(ErrorCategory::Schema, "GraphQL Error: bad field")
            .with_original("Cannot query field \"foo\"")
            .with_metadata("graphql_errors", json!([{"message": "bad field"}]));

        assert_eq!(err.original.as_deref(), Some("Cannot query field \"foo\""));
        assert_eq!(err.metadata.len(), 1);
        assert!(err.metadata.contains_key("graphql_errors"));
    }

    #[test]
    fn test_display_is_message_only() {
        let err = ClassifiedError::new(ErrorCategory::Server, "Bad gateway (502)")
            .with_original("upstream exploded");
        assert_eq!(err.to_string(), "Bad gateway (502)");
    }

    #[test]
    fn test_retryable_follows_category() {
        assert!(ClassifiedError::new(ErrorCategory::Timeout, "t").is_retryable());
        assert!(!ClassifiedError::new(ErrorCategory::Auth, "a").is_retryable());
    }

    #[test]
    fn test_serialization_omits_empty_fields() {
        let err = ClassifiedError::new(ErrorCategory::Other, "Unknown error occurred");
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["category"], "OTHER");
        assert!(json.get("original").is_none());
        assert!(json.get("metadata").is_none());
    }
}
