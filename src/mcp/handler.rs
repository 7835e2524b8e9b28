//! Request dispatch
//!
//! Routes parsed envelopes to the catalog. All the protocol rules about
//! who gets answered live here: notifications never produce output, an
//! addressed request always produces exactly one response, and every
//! failure past the envelope check maps through [`GuidekitError`] to a
//! coded JSON-RPC error.

use serde_json::{json, Value};

use crate::catalog::Catalog;
use crate::error::{GuidekitError, Result};
use crate::mcp::protocol::{codes, InitializeResult, McpRequest, McpResponse, Method};
use crate::mcp::server::McpHandler;

/// Dispatcher over an immutable catalog.
pub struct GuidekitHandler {
    catalog: Catalog,
}

impl GuidekitHandler {
    pub fn new(catalog: Catalog) -> Self {
        Self { catalog }
    }

    fn initialize(&self) -> Result<Value> {
        let result = InitializeResult::new(self.catalog.manifest().server_info());
        Ok(serde_json::to_value(result)?)
    }

    fn list_tools(&self) -> Result<Value> {
        Ok(json!({"tools": self.catalog.manifest().tools}))
    }

    fn list_prompts(&self) -> Result<Value> {
        Ok(json!({"prompts": self.catalog.prompt_descriptors()}))
    }

    fn call_tool(&self, params: &Value) -> Result<Value> {
        let name = required_name(params)?;
        let result = self
            .catalog
            .resolve_tool(name)
            .ok_or_else(|| GuidekitError::UnknownTool(name.to_string()))?;
        Ok(serde_json::to_value(result)?)
    }

    fn get_prompt(&self, params: &Value) -> Result<Value> {
        let name = required_name(params)?;
        let arguments = params
            .get("arguments")
            .and_then(Value::as_object)
            .cloned()
            .unwrap_or_default();
        let result = self
            .catalog
            .resolve_prompt(name, &arguments)
            .ok_or_else(|| GuidekitError::UnknownPrompt(name.to_string()))?;
        Ok(serde_json::to_value(result)?)
    }
}

/// The one parameter every lookup method requires.
fn required_name(params: &Value) -> Result<&str> {
    params
        .get("name")
        .and_then(Value::as_str)
        .ok_or_else(|| GuidekitError::InvalidParams("missing required parameter: name".to_string()))
}

impl McpHandler for GuidekitHandler {
    fn handle_request(&self, request: McpRequest) -> Option<McpResponse> {
        // No id means notification: log only, answer nothing, whatever
        // the method says.
        let Some(id) = request.id else {
            tracing::debug!(
                method = request.method.as_deref().unwrap_or("<none>"),
                "notification received"
            );
            return None;
        };

        let method = match request.method.as_deref() {
            Some(m) if !m.is_empty() => m,
            _ => {
                return Some(McpResponse::error(
                    id,
                    codes::INVALID_REQUEST,
                    "request carries no method".to_string(),
                ));
            }
        };

        let outcome = match Method::from_name(method) {
            // Acknowledgement of the handshake. Stays unanswered even
            // when the client (incorrectly) attaches an id.
            Some(Method::Initialized) => return None,
            Some(Method::Initialize) => self.initialize(),
            Some(Method::ListTools) => self.list_tools(),
            Some(Method::CallTool) => self.call_tool(&request.params),
            Some(Method::ListPrompts) => self.list_prompts(),
            Some(Method::GetPrompt) => self.get_prompt(&request.params),
            None => Err(GuidekitError::MethodNotFound(method.to_string())),
        };

        Some(match outcome {
            Ok(result) => McpResponse::success(id, result),
            Err(err) => {
                tracing::debug!(method = method, error = %err, "request failed");
                McpResponse::from_error(id, err)
            }
        })
    }
}
