//! MCP server implementation.
//!
//! Line-framed JSON-RPC over stdio: requests on stdin, replies on stdout.
//! Diagnostics go to stderr only (via `tracing`), never stdout, so the
//! protocol stream stays clean.

use crate::error::McpError;
use crate::protocol::{CallToolParams, JsonRpcRequest, JsonRpcResponse, ToolContent};
use crate::tools::ToolRegistry;
use serde_json::{Value, json};
use std::io::{BufRead, Write};

/// The MCP server.
pub struct McpServer {
    tools: ToolRegistry,
}

impl McpServer {
    /// Create a server over a populated tool registry.
    pub fn new(tools: ToolRegistry) -> Self {
        Self { tools }
    }

    pub fn tools(&self) -> &ToolRegistry {
        &self.tools
    }

    /// Run the stdio transport until EOF.
    pub async fn run_stdio(&self) -> Result<(), McpError> {
        tracing::info!("starting MCP server with stdio transport");

        let stdin = std::io::stdin();
        let stdout = std::io::stdout();
        let mut stdout_lock = stdout.lock();

        for line in stdin.lock().lines() {
            let line = line?;
            if line.is_empty() {
                continue;
            }

            let request: JsonRpcRequest = match serde_json::from_str(&line) {
                Ok(request) => request,
                Err(e) => {
                    // A malformed frame must not take the bridge down.
                    let response =
                        JsonRpcResponse::error(None, -32700, format!("parse error: {e}"));
                    writeln!(stdout_lock, "{}", serde_json::to_string(&response)?)?;
                    stdout_lock.flush()?;
                    continue;
                }
            };

            match self.handle_request(request).await {
                Some(response) => {
                    writeln!(stdout_lock, "{}", serde_json::to_string(&response)?)?;
                    stdout_lock.flush()?;
                }
                None => continue, // notification, no reply
            }
        }

        Ok(())
    }

    /// Handle a JSON-RPC request. Returns `None` for notifications.
    pub async fn handle_request(&self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        let id = request.id.clone();

        if id.is_none()
            && (request.method == "initialized" || request.method.starts_with("notifications/"))
        {
            return None;
        }

        let response = match request.method.as_str() {
            "initialize" => self.handle_initialize(id),
            "initialized" => JsonRpcResponse::success(id, json!({})),
            "tools/list" => self.handle_list_tools(id),
            "tools/call" => self.handle_call_tool(id, request.params).await,
            "shutdown" => self.handle_shutdown(id),
            _ => JsonRpcResponse::error(
                id,
                -32601,
                format!("Method not found: {}", request.method),
            ),
        };
        Some(response)
    }

    fn handle_initialize(&self, id: Option<Value>) -> JsonRpcResponse {
        let result = json!({
            "protocolVersion": "2024-11-05",
            "serverInfo": {
                "name": "xano-mcp",
                "version": env!("CARGO_PKG_VERSION")
            },
            "capabilities": {
                "tools": {
                    "listChanged": false
                }
            }
        });
        JsonRpcResponse::success(id, result)
    }

    fn handle_list_tools(&self, id: Option<Value>) -> JsonRpcResponse {
        let result = json!({ "tools": self.tools.definitions() });
        JsonRpcResponse::success(id, result)
    }

    async fn handle_call_tool(&self, id: Option<Value>, params: Option<Value>) -> JsonRpcResponse {
        let params: CallToolParams = match params {
            Some(p) => match serde_json::from_value(p) {
                Ok(params) => params,
                Err(e) => {
                    return JsonRpcResponse::error(id, -32602, format!("Invalid params: {}", e));
                }
            },
            None => return JsonRpcResponse::error(id, -32602, "Missing params"),
        };

        match self.tools.dispatch(&params.name, &params.arguments).await {
            Ok(envelope) => {
                let content = vec![ToolContent::Json {
                    json: envelope.to_value(),
                }];
                let result = json!({
                    "content": content,
                    "isError": envelope.is_error(),
                });
                JsonRpcResponse::success(id, result)
            }
            // Registry and configuration faults surface as distinct
            // JSON-RPC errors rather than being folded into the envelope.
            Err(e) => match e {
                McpError::ToolNotFound { .. }
                | McpError::MissingArgument { .. }
                | McpError::Credential(_)
                | McpError::InvalidRequest(_) => {
                    JsonRpcResponse::error(id, -32602, e.to_string())
                }
                other => JsonRpcResponse::error(id, -32603, other.to_string()),
            },
        }
    }

    fn handle_shutdown(&self, id: Option<Value>) -> JsonRpcResponse {
        tracing::info!("MCP server shutdown requested");
        JsonRpcResponse::success(id, json!(null))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::register_meta_tools;
    use xano_core::{ApiConfig, CredentialResolver};

    fn server() -> McpServer {
        let mut registry = ToolRegistry::new();
        register_meta_tools(
            &mut registry,
            &ApiConfig::default(),
            &CredentialResolver::default(),
        )
        .unwrap();
        McpServer::new(registry)
    }

    fn request(method: &str, params: Option<Value>) -> JsonRpcRequest {
        JsonRpcRequest {
            jsonrpc: "2.0".to_string(),
            id: Some(json!(1)),
            method: method.to_string(),
            params,
        }
    }

    #[tokio::test]
    async fn test_initialize() {
        let response = server()
            .handle_request(request("initialize", None))
            .await
            .unwrap();
        let result = response.result.unwrap();
        assert_eq!(result["serverInfo"]["name"], "xano-mcp");
        assert!(response.error.is_none());
    }

    #[tokio::test]
    async fn test_list_tools_exposes_catalog() {
        let response = server()
            .handle_request(request("tools/list", None))
            .await
            .unwrap();
        let tools = response.result.unwrap()["tools"].as_array().unwrap().clone();
        assert_eq!(tools.len(), 13);
        assert!(tools.iter().any(|t| t["name"] == "xano_list_instances"));
        assert!(tools.iter().any(|t| t["name"] == "xano_browse_request_history"));
    }

    #[tokio::test]
    async fn test_call_nonexistent_tool() {
        let response = server()
            .handle_request(request(
                "tools/call",
                Some(json!({"name": "nonexistent", "arguments": {}})),
            ))
            .await
            .unwrap();
        let error = response.error.unwrap();
        assert_eq!(error.code, -32602);
        assert!(error.message.contains("tool not found"));
    }

    #[tokio::test]
    async fn test_call_with_missing_argument() {
        let response = server()
            .handle_request(request(
                "tools/call",
                Some(json!({"name": "xano_get_instance_details", "arguments": {}})),
            ))
            .await
            .unwrap();
        let error = response.error.unwrap();
        assert_eq!(error.code, -32602);
        assert!(error.message.contains("instance_name"));
    }

    #[tokio::test]
    async fn test_unknown_method() {
        let response = server()
            .handle_request(request("bogus/method", None))
            .await
            .unwrap();
        assert_eq!(response.error.unwrap().code, -32601);
    }

    #[tokio::test]
    async fn test_initialized_notification_has_no_reply() {
        let notification = JsonRpcRequest {
            jsonrpc: "2.0".to_string(),
            id: None,
            method: "initialized".to_string(),
            params: None,
        };
        assert!(server().handle_request(notification).await.is_none());
    }
}
