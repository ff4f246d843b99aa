//! MCP tool server for NetBox.
//!
//! Speaks newline-delimited JSON-RPC 2.0 over stdio and maps each tool to
//! one `netbox_core::Gateway` operation.

pub mod protocol;
pub mod server;
pub mod tools;

pub use server::McpServer;
