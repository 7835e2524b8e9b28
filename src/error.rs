//! Error types for guidekit

use thiserror::Error;

use crate::mcp::protocol::codes;

/// Result type alias for guidekit operations
pub type Result<T> = std::result::Result<T, GuidekitError>;

/// Main error type for guidekit
#[derive(Error, Debug)]
pub enum GuidekitError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Method not found: {0}")]
    MethodNotFound(String),

    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    #[error("Unknown prompt: {0}")]
    UnknownPrompt(String),

    #[error("Invalid params: {0}")]
    InvalidParams(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl GuidekitError {
    /// JSON-RPC error code this error maps to on the wire.
    ///
    /// Unknown tools and prompts share the method-not-found code: from the
    /// client's point of view the named capability does not exist.
    pub fn code(&self) -> i64 {
        match self {
            GuidekitError::InvalidRequest(_) => codes::INVALID_REQUEST,
            GuidekitError::MethodNotFound(_)
            | GuidekitError::UnknownTool(_)
            | GuidekitError::UnknownPrompt(_) => codes::METHOD_NOT_FOUND,
            GuidekitError::InvalidParams(_) => codes::INVALID_PARAMS,
            _ => codes::INTERNAL_ERROR,
        }
    }
}
