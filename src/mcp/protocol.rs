//! MCP JSON-RPC wire types
//!
//! Envelope and payload shapes for the line-delimited protocol. The
//! request side is deliberately lenient: an incoming line is accepted as
//! long as it is a JSON value, and missing or ill-typed envelope fields
//! surface as `None` so the dispatcher can decide how to answer instead
//! of the parser rejecting the line outright.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::GuidekitError;

/// Protocol revision reported in the initialize handshake.
pub const PROTOCOL_VERSION: &str = "2024-11-05";

/// Method names the server routes.
pub mod methods {
    pub const INITIALIZE: &str = "initialize";
    pub const INITIALIZED: &str = "initialized";
    pub const LIST_TOOLS: &str = "tools/list";
    pub const CALL_TOOL: &str = "tools/call";
    pub const LIST_PROMPTS: &str = "prompts/list";
    pub const GET_PROMPT: &str = "prompts/get";
}

/// JSON-RPC error codes used on the wire.
pub mod codes {
    /// Reserved for unparsable input. Never emitted: a line that fails to
    /// parse yields no id to address a response to, so the line is
    /// dropped instead.
    pub const PARSE_ERROR: i64 = -32700;
    pub const INVALID_REQUEST: i64 = -32600;
    pub const METHOD_NOT_FOUND: i64 = -32601;
    pub const INVALID_PARAMS: i64 = -32602;
    pub const INTERNAL_ERROR: i64 = -32000;
}

/// The closed set of request kinds the server understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Initialize,
    Initialized,
    ListTools,
    CallTool,
    ListPrompts,
    GetPrompt,
}

impl Method {
    /// Map a wire method name to its request kind.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            methods::INITIALIZE => Some(Method::Initialize),
            methods::INITIALIZED => Some(Method::Initialized),
            methods::LIST_TOOLS => Some(Method::ListTools),
            methods::CALL_TOOL => Some(Method::CallTool),
            methods::LIST_PROMPTS => Some(Method::ListPrompts),
            methods::GET_PROMPT => Some(Method::GetPrompt),
            _ => None,
        }
    }
}

/// MCP JSON-RPC request envelope
#[derive(Debug, Clone)]
pub struct McpRequest {
    /// Request id. `None` marks a notification; an explicit JSON `null`
    /// id counts as absent too, since null cannot address a response.
    pub id: Option<Value>,
    /// Method name, `None` when the field is missing or not a string.
    pub method: Option<String>,
    pub params: Value,
}

impl McpRequest {
    /// Extract the envelope from an already-parsed JSON value.
    pub fn from_value(value: Value) -> Self {
        let id = value.get("id").filter(|v| !v.is_null()).cloned();
        let method = value
            .get("method")
            .and_then(Value::as_str)
            .map(str::to_string);
        let params = value.get("params").cloned().unwrap_or(Value::Null);
        Self { id, method, params }
    }

    /// Whether this request expects a response.
    pub fn is_addressed(&self) -> bool {
        self.id.is_some()
    }
}

/// MCP JSON-RPC response envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct McpResponse {
    pub jsonrpc: String,
    pub id: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<McpError>,
}

/// MCP error object
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct McpError {
    pub code: i64,
    pub message: String,
}

impl McpResponse {
    /// Create a success response
    pub fn success(id: Value, result: Value) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: Some(result),
            error: None,
        }
    }

    /// Create an error response
    pub fn error(id: Value, code: i64, message: String) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: None,
            error: Some(McpError { code, message }),
        }
    }

    /// Create error from GuidekitError
    pub fn from_error(id: Value, err: GuidekitError) -> Self {
        Self::error(id, err.code(), err.to_string())
    }
}

/// Tool entry advertised in `tools/list`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDescriptor {
    pub name: String,
    pub description: String,
    #[serde(rename = "inputSchema")]
    pub input_schema: Value,
}

/// Prompt entry advertised in `prompts/list`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptDescriptor {
    pub name: String,
    pub description: String,
    pub arguments: Vec<PromptArgument>,
}

/// Declared argument inside a [`PromptDescriptor`]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptArgument {
    pub name: String,
    pub description: String,
    pub required: bool,
}

/// MCP initialize result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InitializeResult {
    #[serde(rename = "protocolVersion")]
    pub protocol_version: String,
    pub capabilities: ServerCapabilities,
    #[serde(rename = "serverInfo")]
    pub server_info: ServerInfo,
}

impl InitializeResult {
    /// Handshake payload for a server with a static catalog: both list
    /// surfaces advertise `listChanged: false`.
    pub fn new(server_info: ServerInfo) -> Self {
        Self {
            protocol_version: PROTOCOL_VERSION.to_string(),
            capabilities: ServerCapabilities {
                tools: ToolsCapability {
                    list_changed: false,
                },
                prompts: PromptsCapability {
                    list_changed: false,
                },
            },
            server_info,
        }
    }
}

/// Server capabilities
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerCapabilities {
    pub tools: ToolsCapability,
    pub prompts: PromptsCapability,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolsCapability {
    #[serde(rename = "listChanged")]
    pub list_changed: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptsCapability {
    #[serde(rename = "listChanged")]
    pub list_changed: bool,
}

/// Server info
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerInfo {
    pub name: String,
    pub version: String,
}

/// Tool call result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolCallResult {
    pub content: Vec<ContentItem>,
}

impl ToolCallResult {
    /// Create a single-item text result
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            content: vec![ContentItem::Text { text: text.into() }],
        }
    }
}

/// One element of a result's `content` array
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ContentItem {
    #[serde(rename = "text")]
    Text { text: String },
}

/// Prompt resolution result for `prompts/get`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetPromptResult {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub messages: Vec<PromptMessage>,
}

/// One chat message inside a [`GetPromptResult`]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptMessage {
    pub role: String,
    pub content: ContentItem,
}

impl PromptMessage {
    /// Create a user-role text message
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: ContentItem::Text { text: text.into() },
        }
    }
}
