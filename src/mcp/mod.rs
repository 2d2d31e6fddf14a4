//! Model Context Protocol surface: server handler and tools.

pub mod server;
pub mod tools;

pub use server::DeepSourceMcpServer;
