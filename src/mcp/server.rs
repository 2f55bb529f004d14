//
//  bitbucket-mcp-server
//  mcp/server.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! MCP server over newline-delimited JSON-RPC.
//!
//! One JSON-RPC message per line on the reader, one response per line on the
//! writer. Notifications get no response. Requests are answered in arrival
//! order and the loop ends when the reader reaches EOF.

use anyhow::Result;
use serde_json::{json, Value};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};

use super::jsonrpc::{
    JsonRpcRequest, JsonRpcResponse, INTERNAL_ERROR, INVALID_PARAMS, INVALID_REQUEST,
    METHOD_NOT_FOUND, PARSE_ERROR,
};
use super::tools::ToolDispatcher;

/// Protocol version answered when the client does not ask for one.
pub const DEFAULT_PROTOCOL_VERSION: &str = "2024-11-05";

/// MCP server wrapping a [`ToolDispatcher`].
#[derive(Debug)]
pub struct McpServer {
    tools: ToolDispatcher,
}

impl McpServer {
    /// Creates a server answering `tools/*` requests with `tools`.
    pub fn new(tools: ToolDispatcher) -> Self {
        Self { tools }
    }

    /// Serves on the process's stdin/stdout until stdin closes.
    pub async fn run_stdio(&self) -> Result<()> {
        tracing::info!("MCP server listening on stdio");
        self.serve(BufReader::new(tokio::io::stdin()), tokio::io::stdout())
            .await?;
        tracing::info!("stdin closed, shutting down");
        Ok(())
    }

    /// Serves requests read from `reader`, writing responses to `writer`.
    pub async fn serve<R, W>(&self, reader: R, mut writer: W) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut lines = reader.lines();

        while let Some(line) = lines.next_line().await? {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            if let Some(response) = self.handle_line(line).await {
                let mut payload = serde_json::to_string(&response)?;
                payload.push('\n');
                writer.write_all(payload.as_bytes()).await?;
                writer.flush().await?;
            }
        }

        Ok(())
    }

    /// Handles one raw message. Returns `None` for notifications.
    pub async fn handle_line(&self, line: &str) -> Option<JsonRpcResponse> {
        let value: Value = match serde_json::from_str(line) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(error = %e, "unparsable message");
                return Some(JsonRpcResponse::error(
                    Value::Null,
                    PARSE_ERROR,
                    format!("Parse error: {e}"),
                ));
            }
        };

        let id = value.get("id").cloned().unwrap_or(Value::Null);
        match serde_json::from_value::<JsonRpcRequest>(value) {
            Ok(request) => self.handle_request(request).await,
            Err(e) => Some(JsonRpcResponse::error(
                id,
                INVALID_REQUEST,
                format!("Invalid request: {e}"),
            )),
        }
    }

    /// Handles a decoded request. Returns `None` for notifications.
    pub async fn handle_request(&self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        if request.is_notification() {
            tracing::debug!(method = %request.method, "notification");
            return None;
        }
        let id = request.id.clone().unwrap_or(Value::Null);

        let response = match request.method.as_str() {
            "initialize" => JsonRpcResponse::success(id, initialize_result(&request)),
            "ping" => JsonRpcResponse::success(id, json!({})),
            "tools/list" => {
                JsonRpcResponse::success(id, json!({ "tools": self.tools.list_tools() }))
            }
            "tools/call" => self.handle_tools_call(id, &request).await,
            other => {
                JsonRpcResponse::error(id, METHOD_NOT_FOUND, format!("Method not found: {other}"))
            }
        };

        Some(response)
    }

    async fn handle_tools_call(&self, id: Value, request: &JsonRpcRequest) -> JsonRpcResponse {
        let Some(params) = &request.params else {
            return JsonRpcResponse::error(id, INVALID_PARAMS, "Missing params");
        };
        let Some(name) = params.get("name").and_then(Value::as_str) else {
            return JsonRpcResponse::error(id, INVALID_PARAMS, "Missing tool name");
        };
        let arguments = params.get("arguments").cloned().unwrap_or(Value::Null);

        let result = self.tools.call_tool(name, arguments).await;
        match serde_json::to_value(&result) {
            Ok(value) => JsonRpcResponse::success(id, value),
            Err(e) => JsonRpcResponse::error(id, INTERNAL_ERROR, e.to_string()),
        }
    }
}

fn initialize_result(request: &JsonRpcRequest) -> Value {
    let protocol_version = request
        .params
        .as_ref()
        .and_then(|p| p.get("protocolVersion"))
        .and_then(Value::as_str)
        .unwrap_or(DEFAULT_PROTOCOL_VERSION);

    json!({
        "protocolVersion": protocol_version,
        "capabilities": {
            "tools": {}
        },
        "serverInfo": {
            "name": crate::APP_NAME,
            "version": crate::VERSION
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::BitbucketClient;

    fn offline_server() -> McpServer {
        let client = BitbucketClient::with_base_url("http://127.0.0.1:1").unwrap();
        McpServer::new(ToolDispatcher::new(client))
    }

    async fn exchange(input: &str) -> Vec<Value> {
        let mut output = Vec::new();
        offline_server()
            .serve(input.as_bytes(), &mut output)
            .await
            .unwrap();

        String::from_utf8(output)
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }

    #[tokio::test]
    async fn initialize_echoes_protocol_version() {
        let responses = exchange(
            r#"{"jsonrpc":"2.0","id":1,"method":"initialize","params":{"protocolVersion":"2025-03-26","capabilities":{}}}"#,
        )
        .await;

        assert_eq!(responses.len(), 1);
        let result = &responses[0]["result"];
        assert_eq!(result["protocolVersion"], "2025-03-26");
        assert_eq!(result["serverInfo"]["name"], "bitbucket-mcp-server");
        assert!(result["capabilities"]["tools"].is_object());
    }

    #[tokio::test]
    async fn notifications_and_blank_lines_get_no_response() {
        let input = concat!(
            "{\"jsonrpc\":\"2.0\",\"method\":\"notifications/initialized\"}\n",
            "\n",
            "{\"jsonrpc\":\"2.0\",\"id\":2,\"method\":\"ping\"}\n",
        );
        let responses = exchange(input).await;

        assert_eq!(responses.len(), 1);
        assert_eq!(responses[0]["id"], 2);
        assert_eq!(responses[0]["result"], json!({}));
    }

    #[tokio::test]
    async fn tools_list_returns_six_tools() {
        let responses = exchange(r#"{"jsonrpc":"2.0","id":"a","method":"tools/list"}"#).await;
        let tools = responses[0]["result"]["tools"].as_array().unwrap();
        assert_eq!(tools.len(), 6);
        assert!(tools.iter().all(|t| t["inputSchema"]["type"] == "object"));
    }

    #[tokio::test]
    async fn tools_call_wraps_errors_in_content() {
        let responses = exchange(
            r#"{"jsonrpc":"2.0","id":3,"method":"tools/call","params":{"name":"nope","arguments":{}}}"#,
        )
        .await;

        assert!(responses[0].get("error").is_none());
        assert_eq!(
            responses[0]["result"],
            json!({"content": [{"type": "text", "text": "Error: Unknown tool: nope"}]})
        );
    }

    #[tokio::test]
    async fn protocol_errors() {
        let input = concat!(
            "not json\n",
            "{\"jsonrpc\":\"2.0\",\"id\":4,\"method\":\"resources/list\"}\n",
            "{\"jsonrpc\":\"2.0\",\"id\":5,\"method\":\"tools/call\"}\n",
            "{\"id\":6}\n",
        );
        let responses = exchange(input).await;

        assert_eq!(responses.len(), 4);
        assert_eq!(responses[0]["error"]["code"], PARSE_ERROR);
        assert!(responses[0]["id"].is_null());
        assert_eq!(responses[1]["error"]["code"], METHOD_NOT_FOUND);
        assert_eq!(responses[2]["error"]["code"], INVALID_PARAMS);
        assert_eq!(responses[3]["error"]["code"], INVALID_REQUEST);
        assert_eq!(responses[3]["id"], 6);
    }
}
