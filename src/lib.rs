//! DeepSource MCP server.
//!
//! Exposes DeepSource code-quality data (issues, analysis runs, metrics,
//! compliance reports, dependency vulnerabilities) over the Model Context
//! Protocol. The library surface exists for integration tests and for
//! embedding the client or pagination machinery elsewhere.

pub mod client;
pub mod config;
pub mod error;
pub mod logging;
pub mod mcp;
pub mod pagination;
