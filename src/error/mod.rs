//! Error handling and classification module
//!
//! This module provides the uniform error taxonomy used across every
//! DeepSource API call: a closed category enumeration, a classified error
//! type carrying the category plus the original cause, and a layered
//! classification chain consulted in fixed precedence order.

pub mod classified;
pub mod handler;
pub mod taxonomy;

// Re-export main types for convenient access
pub use classified::ClassifiedError;
pub use handler::{classify, RawError, TransportCode, TransportError};
pub use taxonomy::{classify_message, ErrorCategory};
