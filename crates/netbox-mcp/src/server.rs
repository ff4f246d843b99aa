// ── MCP server ──
//
// Reads one JSON-RPC message per line, answers requests in arrival order,
// and stays silent for notifications. Tool calls go through `tools`.

use serde::Deserialize;
use serde_json::{Value, json};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, info, warn};

use netbox_core::Gateway;

use crate::protocol::{
    INVALID_PARAMS, INVALID_REQUEST, JsonRpcRequest, JsonRpcResponse, METHOD_NOT_FOUND,
    PARSE_ERROR,
};
use crate::tools;

pub const SERVER_NAME: &str = "netbox-mcp";
pub const SERVER_VERSION: &str = env!("CARGO_PKG_VERSION");
pub const PROTOCOL_VERSION: &str = "2024-11-05";

#[derive(Debug, Deserialize)]
struct ToolCallParams {
    name: String,
    #[serde(default)]
    arguments: Option<Value>,
}

pub struct McpServer {
    gateway: Gateway,
}

impl McpServer {
    pub fn new(gateway: Gateway) -> Self {
        Self { gateway }
    }

    /// Serve until `reader` reaches EOF.
    pub async fn serve<R, W>(&self, reader: R, mut writer: W) -> std::io::Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut lines = reader.split(b'\n');
        while let Some(raw) = lines.next_segment().await? {
            let response = match std::str::from_utf8(&raw) {
                Ok(line) if line.trim().is_empty() => continue,
                Ok(line) => self.handle_request(line).await,
                Err(e) => {
                    warn!(error = %e, "message is not valid UTF-8");
                    Some(JsonRpcResponse::error(None, PARSE_ERROR, "Parse error"))
                }
            };

            if let Some(response) = response {
                let mut encoded = serde_json::to_vec(&response)?;
                encoded.push(b'\n');
                writer.write_all(&encoded).await?;
                writer.flush().await?;
            }
        }

        info!("input closed, shutting down");
        Ok(())
    }

    /// Handle one raw message. `None` for notifications.
    pub async fn handle_request(&self, input: &str) -> Option<JsonRpcResponse> {
        let Ok(raw) = serde_json::from_str::<Value>(input) else {
            warn!("unparseable message");
            return Some(JsonRpcResponse::error(None, PARSE_ERROR, "Parse error"));
        };

        let request: JsonRpcRequest = match serde_json::from_value(raw.clone()) {
            Ok(request) => request,
            Err(e) => {
                let id = raw.get("id").cloned();
                return Some(JsonRpcResponse::error(
                    id,
                    INVALID_REQUEST,
                    format!("Invalid request: {e}"),
                ));
            }
        };

        debug!(method = %request.method, id = ?request.id, "request");

        if request.is_notification() {
            debug!(method = %request.method, "notification");
            return None;
        }

        let response = match request.method.as_str() {
            "initialize" => Self::handle_initialize(&request),
            "ping" => JsonRpcResponse::success(request.id, json!({})),
            "tools/list" => Self::handle_tools_list(&request),
            "tools/call" => self.handle_tools_call(request).await,
            _ => JsonRpcResponse::error(
                request.id,
                METHOD_NOT_FOUND,
                format!("Method not found: {}", request.method),
            ),
        };
        Some(response)
    }

    fn handle_initialize(request: &JsonRpcRequest) -> JsonRpcResponse {
        JsonRpcResponse::success(
            request.id.clone(),
            json!({
                "protocolVersion": PROTOCOL_VERSION,
                "capabilities": {
                    "tools": {}
                },
                "serverInfo": {
                    "name": SERVER_NAME,
                    "version": SERVER_VERSION
                }
            }),
        )
    }

    fn handle_tools_list(request: &JsonRpcRequest) -> JsonRpcResponse {
        JsonRpcResponse::success(request.id.clone(), json!({ "tools": tools::list_tools() }))
    }

    async fn handle_tools_call(&self, request: JsonRpcRequest) -> JsonRpcResponse {
        let Some(params) = request.params else {
            return JsonRpcResponse::error(request.id, INVALID_PARAMS, "Missing params");
        };
        let params: ToolCallParams = match serde_json::from_value(params) {
            Ok(params) => params,
            Err(e) => {
                return JsonRpcResponse::error(
                    request.id,
                    INVALID_PARAMS,
                    format!("Invalid params: {e}"),
                );
            }
        };

        let arguments = params.arguments.unwrap_or_else(|| json!({}));
        match tools::call_tool(&self.gateway, &params.name, arguments).await {
            Ok(result) => JsonRpcResponse::success(request.id, result),
            Err(err) => {
                warn!(tool = %params.name, error = %err, "rejected tool call");
                JsonRpcResponse::error(request.id, INVALID_PARAMS, err.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use netbox_core::GatewayConfig;
    use secrecy::SecretString;

    use super::*;

    // Nothing listens on port 1; only handlers that never reach NetBox are
    // exercised here.
    fn offline_server() -> McpServer {
        let config = GatewayConfig::new(
            "http://127.0.0.1:1".parse().unwrap(),
            SecretString::from("t".to_string()),
        );
        McpServer::new(Gateway::connect(&config).unwrap())
    }

    #[tokio::test]
    async fn notifications_get_no_response() {
        let server = offline_server();
        for line in [
            r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#,
            r#"{"jsonrpc":"2.0","method":"initialized"}"#,
            r#"{"jsonrpc":"2.0","method":"no/such/method"}"#,
        ] {
            assert!(server.handle_request(line).await.is_none(), "{line}");
        }
    }

    #[tokio::test]
    async fn missing_method_is_invalid_request() {
        let server = offline_server();
        let resp = server
            .handle_request(r#"{"jsonrpc":"2.0","id":7}"#)
            .await
            .unwrap();
        assert_eq!(resp.id, json!(7));
        assert_eq!(resp.error.unwrap().code, INVALID_REQUEST);
    }

    #[tokio::test]
    async fn tools_call_without_params() {
        let server = offline_server();
        let resp = server
            .handle_request(r#"{"jsonrpc":"2.0","id":1,"method":"tools/call"}"#)
            .await
            .unwrap();
        assert_eq!(resp.error.unwrap().code, INVALID_PARAMS);
    }

    #[tokio::test]
    async fn serve_writes_one_line_per_request() {
        let server = offline_server();
        let input = concat!(
            r#"{"jsonrpc":"2.0","id":1,"method":"ping"}"#,
            "\n\n",
            r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#,
            "\n",
            "not json\n",
            r#"{"jsonrpc":"2.0","id":2,"method":"tools/list"}"#,
            "\n",
        );

        let mut output = Vec::new();
        server.serve(input.as_bytes(), &mut output).await.unwrap();

        let lines: Vec<Value> = String::from_utf8(output)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0]["id"], 1);
        assert_eq!(lines[1]["error"]["code"], PARSE_ERROR);
        assert_eq!(lines[2]["id"], 2);
        assert_eq!(lines[2]["result"]["tools"].as_array().unwrap().len(), 9);
    }

    #[tokio::test]
    async fn invalid_utf8_line_gets_parse_error_and_serving_continues() {
        let server = offline_server();
        let mut input = b"{\"jsonrpc\":\"2.0\",\"id\":1,\"method\":\"ping\xff\xfe\"}\n".to_vec();
        input.extend_from_slice(b"{\"jsonrpc\":\"2.0\",\"id\":2,\"method\":\"ping\"}\r\n");

        let mut output = Vec::new();
        server.serve(input.as_slice(), &mut output).await.unwrap();

        let lines: Vec<Value> = String::from_utf8(output)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["error"]["code"], PARSE_ERROR);
        assert!(lines[0]["id"].is_null());
        assert_eq!(lines[1]["id"], 2);
        assert_eq!(lines[1]["result"], json!({}));
    }

    #[tokio::test]
    async fn null_id_request_is_answered() {
        let server = offline_server();
        let resp = server
            .handle_request(r#"{"jsonrpc":"2.0","id":null,"method":"ping"}"#)
            .await
            .unwrap();
        assert_eq!(resp.id, Value::Null);
        assert_eq!(resp.result, Some(json!({})));
    }
}
