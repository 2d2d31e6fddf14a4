//! Layered error classification.
//!
//! Raw failures from the transport layer are classified exactly once, at the
//! boundary where they first cross into this crate. The chain tries a fixed
//! sequence of specialized stages (GraphQL-shaped body, transport code, HTTP
//! status, generic fallback); the first stage producing a result wins. The
//! ordering is a correctness requirement: a GraphQL error nested inside an
//! HTTP 200 response must be classified by the GraphQL stage, never by the
//! generic fallback.

use serde_json::{json, Value};

use super::classified::ClassifiedError;
use super::taxonomy::{classify_message, ErrorCategory};

/// Low-level connection failure codes recognized by the network stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportCode {
    /// The TCP connection could not be established.
    ConnectionRefused,
    /// The request exceeded its deadline.
    TimedOut,
}

/// Stable internal shape of a transport-layer failure.
///
/// Populated at the HTTP-client boundary so the classification chain never
/// inspects a third-party library's error object directly.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransportError {
    /// Raw error message from the transport.
    pub message: String,
    /// HTTP status, when a response was received.
    pub http_status: Option<u16>,
    /// HTTP status text, when a response was received.
    pub status_text: Option<String>,
    /// Low-level connection code, when the failure happened below HTTP.
    pub transport_code: Option<TransportCode>,
    /// Parsed response body, when one was available.
    pub response_body: Option<Value>,
}

impl TransportError {
    /// A transport error carrying only a message.
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            ..Self::default()
        }
    }

    /// A transport error for an HTTP response.
    pub fn http(status: u16, status_text: Option<String>, body: Option<Value>) -> Self {
        Self {
            message: format!("HTTP {status} error"),
            http_status: Some(status),
            status_text,
            response_body: body,
            transport_code: None,
        }
    }

    /// A transport error for a GraphQL `errors` body (any HTTP status,
    /// including 200).
    pub fn graphql_body(body: Value) -> Self {
        Self {
            message: "GraphQL response contained errors".to_string(),
            response_body: Some(body),
            ..Self::default()
        }
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        let transport_code = if err.is_connect() {
            Some(TransportCode::ConnectionRefused)
        } else if err.is_timeout() {
            Some(TransportCode::TimedOut)
        } else {
            None
        };
        Self {
            message: err.to_string(),
            http_status: err.status().map(|s| s.as_u16()),
            status_text: err
                .status()
                .and_then(|s| s.canonical_reason().map(str::to_string)),
            transport_code,
            response_body: None,
        }
    }
}

/// Input boundary of the classification chain.
///
/// The original transport layer can fail in several shapes; each gets its
/// own variant so classification operates on a closed set rather than on
/// `dyn Any` downcasting.
#[derive(Debug)]
pub enum RawError {
    /// Already classified; passed through unchanged (idempotence).
    Classified(ClassifiedError),
    /// Transport-layer failure with optional HTTP/connection detail.
    Transport(TransportError),
    /// Response deserialization failure.
    Parse(String),
    /// A plain error message.
    Message(String),
    /// A value that is not even error-shaped.
    Unknown,
}

impl From<ClassifiedError> for RawError {
    fn from(err: ClassifiedError) -> Self {
        RawError::Classified(err)
    }
}

impl From<TransportError> for RawError {
    fn from(err: TransportError) -> Self {
        RawError::Transport(err)
    }
}

impl From<reqwest::Error> for RawError {
    fn from(err: reqwest::Error) -> Self {
        RawError::Transport(err.into())
    }
}

impl From<serde_json::Error> for RawError {
    fn from(err: serde_json::Error) -> Self {
        RawError::Parse(err.to_string())
    }
}

/// Classify a raw error into a [`ClassifiedError`].
///
/// Total: always produces a result. Idempotent: an already classified error
/// is returned unchanged rather than re-wrapped.
pub fn classify(error: RawError) -> ClassifiedError {
    match error {
        RawError::Classified(classified) => classified,
        RawError::Transport(transport) => classify_graphql_stage(&transport)
            .or_else(|| classify_network_stage(&transport))
            .or_else(|| classify_http_stage(&transport))
            .unwrap_or_else(|| fallback_message(&transport.message)),
        RawError::Parse(message) => ClassifiedError::new(
            ErrorCategory::Format,
            format!("Response format error: {message}"),
        )
        .with_original(message),
        RawError::Message(message) => fallback_message(&message),
        RawError::Unknown => {
            ClassifiedError::new(ErrorCategory::Other, "Unknown error occurred")
        }
    }
}

/// Stage 1: a response body carrying a GraphQL `errors` array.
fn classify_graphql_stage(transport: &TransportError) -> Option<ClassifiedError> {
    let errors = transport
        .response_body
        .as_ref()
        .and_then(|body| body.get("errors"))
        .and_then(Value::as_array)?;

    let messages: Vec<&str> = errors
        .iter()
        .filter_map(|entry| entry.get("message").and_then(Value::as_str))
        .collect();
    if messages.is_empty() {
        return None;
    }

    let combined = format!("GraphQL Error: {}", messages.join(", "));
    let category = classify_message(&combined);
    Some(
        ClassifiedError::new(category, combined)
            .with_original(transport.message.clone())
            .with_metadata("graphql_errors", json!(errors)),
    )
}

/// Stage 2: low-level connection codes.
fn classify_network_stage(transport: &TransportError) -> Option<ClassifiedError> {
    let (category, message) = match transport.transport_code? {
        TransportCode::ConnectionRefused => (
            ErrorCategory::Network,
            "Connection error: Unable to connect to DeepSource API",
        ),
        TransportCode::TimedOut => (
            ErrorCategory::Timeout,
            "Timeout error: DeepSource API request timed out",
        ),
    };
    Some(ClassifiedError::new(category, message).with_original(transport.message.clone()))
}

/// Stage 3: HTTP response status.
fn classify_http_stage(transport: &TransportError) -> Option<ClassifiedError> {
    let status = transport.http_status?;
    let (category, message) = match status {
        401 => (
            ErrorCategory::Auth,
            "Authentication error: Invalid or expired API key".to_string(),
        ),
        429 => (ErrorCategory::RateLimit, "Rate limit exceeded".to_string()),
        404 => (ErrorCategory::NotFound, "Not found (404)".to_string()),
        502 => (ErrorCategory::Server, "Bad gateway (502)".to_string()),
        503 => (ErrorCategory::Server, "Service unavailable (503)".to_string()),
        504 => (ErrorCategory::Server, "Gateway timeout (504)".to_string()),
        s if s >= 500 => (ErrorCategory::Server, format!("Server error ({s})")),
        s if (400..500).contains(&s) => {
            let text = transport
                .status_text
                .as_deref()
                .filter(|t| !t.is_empty())
                .unwrap_or("Bad request");
            (ErrorCategory::Client, format!("{text} ({s})"))
        }
        _ => return None,
    };
    Some(
        ClassifiedError::new(category, message)
            .with_original(transport.message.clone())
            .with_metadata("http_status", json!(status)),
    )
}

/// Stage 4: generic fallback for anything error-shaped.
fn fallback_message(message: &str) -> ClassifiedError {
    ClassifiedError::new(
        classify_message(message),
        format!("DeepSource API error: {message}"),
    )
    .with_original(message.to_string())
}
