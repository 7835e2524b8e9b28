//! MCP (Model Context Protocol) server implementation
//!
//! JSON-RPC over stdio for IDE integration.

pub mod handler;
pub mod protocol;
pub mod server;

pub use handler::GuidekitHandler;
pub use protocol::{
    codes, methods, InitializeResult, McpError, McpRequest, McpResponse, Method, ToolCallResult,
};
pub use server::{McpHandler, McpServer};
