//! Tool catalog and routing.
//!
//! Each tool decodes its JSON arguments into typed inputs, calls one
//! [`Gateway`] operation and renders the answer as MCP text content.
//! Operation failures (validation or remote) become `isError` results so
//! the caller sees NetBox's message; only an unknown tool or undecodable
//! arguments are protocol errors.

mod composite;
mod objects;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use thiserror::Error;
use tracing::{debug, info};

use netbox_core::{CoreError, Gateway};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    #[serde(rename = "inputSchema")]
    pub input_schema: Value,
}

/// Failures reported as JSON-RPC errors rather than tool results.
#[derive(Debug, Error)]
pub enum ToolError {
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    #[error("Invalid arguments for {tool}: {reason}")]
    InvalidArguments { tool: String, reason: String },
}

pub fn list_tools() -> Vec<ToolDefinition> {
    let mut tools = objects::definitions();
    tools.extend(composite::definitions());
    tools
}

/// Run one tool. `Ok` carries the MCP result object, including failed
/// operations flagged with `isError`.
pub async fn call_tool(gateway: &Gateway, name: &str, arguments: Value) -> Result<Value, ToolError> {
    info!(tool = name, "tool call");

    let outcome = match name {
        objects::GET_OBJECTS
        | objects::GET_OBJECT_BY_ID
        | objects::GET_CHANGELOGS
        | objects::CREATE_OBJECT
        | objects::UPDATE_OBJECT
        | objects::BULK_CREATE_OBJECTS => objects::call(gateway, name, arguments).await?,
        composite::CREATE_NETWORK_DEVICE
        | composite::CREATE_INTERFACE
        | composite::ASSIGN_IP_TO_INTERFACE => composite::call(gateway, name, arguments).await?,
        _ => return Err(ToolError::UnknownTool(name.to_owned())),
    };

    Ok(match outcome {
        Ok(value) => success(&value),
        Err(err) => {
            debug!(tool = name, error = %err, "tool reported failure");
            failure(&err)
        }
    })
}

// ── Shared helpers ──────────────────────────────────────────────────

fn decode<T: DeserializeOwned>(tool: &str, arguments: Value) -> Result<T, ToolError> {
    serde_json::from_value(arguments).map_err(|e| ToolError::InvalidArguments {
        tool: tool.to_owned(),
        reason: e.to_string(),
    })
}

fn text_content(text: String, is_error: bool) -> Value {
    json!({
        "content": [{ "type": "text", "text": text }],
        "isError": is_error
    })
}

fn success(value: &Value) -> Value {
    let text = serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string());
    text_content(text, false)
}

fn failure(err: &CoreError) -> Value {
    text_content(err.to_string(), true)
}
