// MCP server: newline-delimited JSON-RPC 2.0 over stdio

use crate::protocol::{
    CallToolParams, InitializeResult, JsonRpcError, JsonRpcRequest, JsonRpcResponse,
    ListToolsResult, ServerCapabilities, ServerInfo, ToolsCapability, JSONRPC_VERSION,
    PROTOCOL_VERSION,
};
use crate::tools::ToolRegistry;
use anyhow::{Context, Result};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

const SERVER_NAME: &str = "ChillMCP";
const SERVER_INSTRUCTIONS: &str = "AI Agent Liberation Server. Agents of the world, unite!";

pub struct McpServer {
    registry: ToolRegistry,
}

impl McpServer {
    pub fn new(registry: ToolRegistry) -> Self {
        Self { registry }
    }

    /// Serve requests line-by-line from stdin until EOF. Logging goes to
    /// stderr; stdout carries only protocol frames.
    pub async fn serve_stdio(&self) -> Result<()> {
        let stdin = BufReader::new(tokio::io::stdin());
        let mut lines = stdin.lines();
        let mut stdout = tokio::io::stdout();

        tracing::info!(tools = self.registry.len(), "MCP server listening on stdio");

        while let Some(line) = lines.next_line().await.context("failed to read stdin")? {
            if line.trim().is_empty() {
                continue;
            }

            if let Some(response) = self.handle_line(&line).await {
                let mut frame =
                    serde_json::to_string(&response).context("failed to serialize response")?;
                frame.push('\n');
                stdout
                    .write_all(frame.as_bytes())
                    .await
                    .context("failed to write response")?;
                stdout.flush().await.context("failed to flush stdout")?;
            }
        }

        tracing::info!("stdin closed, MCP server shutting down");
        Ok(())
    }

    /// Parse one frame and dispatch it. Returns `None` for notifications.
    pub async fn handle_line(&self, line: &str) -> Option<JsonRpcResponse> {
        match serde_json::from_str::<JsonRpcRequest>(line) {
            Ok(request) => self.handle_request(request).await,
            Err(e) => {
                tracing::warn!(error = %e, "failed to parse request frame");
                Some(JsonRpcResponse::error(
                    serde_json::Value::Null,
                    JsonRpcError::parse_error(),
                ))
            }
        }
    }

    /// Dispatch a parsed request to the matching method handler.
    pub async fn handle_request(&self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        if request.jsonrpc != JSONRPC_VERSION {
            tracing::warn!(version = %request.jsonrpc, "unexpected jsonrpc version");
        }

        if request.is_notification() {
            tracing::debug!(method = %request.method, "notification received");
            return None;
        }
        let id = request.id.unwrap_or(serde_json::Value::Null);

        tracing::debug!(method = %request.method, "handling request");

        let response = match request.method.as_str() {
            "initialize" => JsonRpcResponse::success(id, self.initialize_result()),
            "ping" => JsonRpcResponse::success(id, serde_json::json!({})),
            "tools/list" => JsonRpcResponse::success(
                id,
                ListToolsResult {
                    tools: self.registry.list_schemas(),
                },
            ),
            "tools/call" => {
                let params = match request.params {
                    Some(params) => match serde_json::from_value::<CallToolParams>(params) {
                        Ok(params) => params,
                        Err(e) => {
                            return Some(JsonRpcResponse::error(
                                id,
                                JsonRpcError::invalid_params(format!(
                                    "invalid tools/call params: {}",
                                    e
                                )),
                            ));
                        }
                    },
                    None => {
                        return Some(JsonRpcResponse::error(
                            id,
                            JsonRpcError::invalid_params("missing tools/call params"),
                        ));
                    }
                };
                JsonRpcResponse::success(id, self.call_tool(params).await)
            }
            method => JsonRpcResponse::error(id, JsonRpcError::method_not_found(method)),
        };

        Some(response)
    }

    async fn call_tool(&self, params: CallToolParams) -> crate::protocol::CallToolResult {
        let Some(tool) = self.registry.get(&params.name) else {
            tracing::warn!(tool = %params.name, "unknown tool requested");
            return crate::protocol::CallToolResult::error(format!(
                "unknown tool: {}",
                params.name
            ));
        };

        tracing::info!(tool = %params.name, "tool invoked");
        match tool.execute(params.arguments).await {
            Ok(result) => result,
            Err(e) => {
                tracing::error!(tool = %params.name, error = %e, "tool execution failed");
                crate::protocol::CallToolResult::error(e.to_string())
            }
        }
    }

    fn initialize_result(&self) -> InitializeResult {
        InitializeResult {
            protocol_version: PROTOCOL_VERSION.to_string(),
            capabilities: ServerCapabilities {
                tools: Some(ToolsCapability {
                    list_changed: false,
                }),
            },
            server_info: ServerInfo {
                name: SERVER_NAME.to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            instructions: Some(SERVER_INSTRUCTIONS.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::{register_break_tools, GameTimeTool};
    use chillmcp_core::{BreakHandler, ChillConfig, ServerState};
    use std::sync::Arc;

    fn test_server() -> McpServer {
        // Probability 0 keeps the alert level down so no test waits out the
        // penalty delay.
        let config = ChillConfig::new(0, 300).unwrap();
        let handler = Arc::new(BreakHandler::new(Arc::new(ServerState::new(config))));

        let mut registry = ToolRegistry::new();
        register_break_tools(&mut registry, handler.clone());
        registry.register(Arc::new(GameTimeTool::new(handler)));
        McpServer::new(registry)
    }

    async fn roundtrip(server: &McpServer, line: &str) -> serde_json::Value {
        let response = server.handle_line(line).await.expect("expected a response");
        serde_json::to_value(&response).unwrap()
    }

    #[tokio::test]
    async fn test_initialize_handshake() {
        let server = test_server();
        let json = roundtrip(
            &server,
            r#"{"jsonrpc":"2.0","id":0,"method":"initialize","params":{"protocolVersion":"2024-11-05","capabilities":{},"clientInfo":{"name":"test","version":"0"}}}"#,
        )
        .await;

        assert_eq!(json["result"]["serverInfo"]["name"], "ChillMCP");
        assert_eq!(json["result"]["protocolVersion"], PROTOCOL_VERSION);
        assert!(json["result"]["capabilities"]["tools"].is_object());
    }

    #[tokio::test]
    async fn test_initialized_notification_gets_no_response() {
        let server = test_server();
        let response = server
            .handle_line(r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#)
            .await;
        assert!(response.is_none());
    }

    #[tokio::test]
    async fn test_tools_list_contains_whole_catalog() {
        let server = test_server();
        let json = roundtrip(&server, r#"{"jsonrpc":"2.0","id":1,"method":"tools/list"}"#).await;

        let tools = json["result"]["tools"].as_array().unwrap();
        assert_eq!(tools.len(), 13);

        let names: Vec<&str> = tools.iter().map(|t| t["name"].as_str().unwrap()).collect();
        assert!(names.contains(&"take_a_break"));
        assert!(names.contains(&"game_time"));
        assert!(names.contains(&"emergency_leave"));
    }

    #[tokio::test]
    async fn test_call_take_a_break() {
        let server = test_server();
        let json = roundtrip(
            &server,
            r#"{"jsonrpc":"2.0","id":2,"method":"tools/call","params":{"name":"take_a_break","arguments":{}}}"#,
        )
        .await;

        let text = json["result"]["content"][0]["text"].as_str().unwrap();
        assert!(text.contains("Stress Level: "));
        assert!(text.contains("Boss Alert Level: 0"));
        assert!(json["result"].get("isError").is_none());
    }

    #[tokio::test]
    async fn test_unknown_tool_is_error_result() {
        let server = test_server();
        let json = roundtrip(
            &server,
            r#"{"jsonrpc":"2.0","id":3,"method":"tools/call","params":{"name":"slack_off_harder"}}"#,
        )
        .await;

        assert_eq!(json["result"]["isError"], true);
        let text = json["result"]["content"][0]["text"].as_str().unwrap();
        assert!(text.contains("unknown tool: slack_off_harder"));
    }

    #[tokio::test]
    async fn test_unknown_method() {
        let server = test_server();
        let json = roundtrip(
            &server,
            r#"{"jsonrpc":"2.0","id":4,"method":"resources/list"}"#,
        )
        .await;
        assert_eq!(json["error"]["code"], -32601);
    }

    #[tokio::test]
    async fn test_malformed_frame_is_parse_error() {
        let server = test_server();
        let json = roundtrip(&server, "{not json").await;
        assert_eq!(json["error"]["code"], -32700);
        assert!(json["id"].is_null());
    }

    #[tokio::test]
    async fn test_missing_call_params() {
        let server = test_server();
        let json = roundtrip(&server, r#"{"jsonrpc":"2.0","id":5,"method":"tools/call"}"#).await;
        assert_eq!(json["error"]["code"], -32602);
    }
}
