//! Tool registry: named tools, their argument schemas, and dispatch.
//!
//! The registry owns tool *metadata* and opaque async handlers. It has
//! no knowledge of HTTP; request construction lives in the handlers
//! (see `client`).

use crate::envelope::Envelope;
use crate::error::McpError;
use crate::protocol::ToolDefinition;
use async_trait::async_trait;
use serde_json::{Map, Value, json};
use std::collections::HashMap;
use std::sync::Arc;

/// A single parameter of a tool.
#[derive(Debug, Clone)]
pub struct ParamSpec {
    pub name: &'static str,
    pub description: &'static str,
    pub required: bool,
}

impl ParamSpec {
    pub fn required(name: &'static str, description: &'static str) -> Self {
        Self {
            name,
            description,
            required: true,
        }
    }
}

/// Static description of a tool: name, doc string, parameter schema.
#[derive(Debug, Clone)]
pub struct ToolSpec {
    pub name: &'static str,
    pub description: &'static str,
    pub params: Vec<ParamSpec>,
}

impl ToolSpec {
    /// JSON-Schema object for MCP `tools/list`.
    pub fn input_schema(&self) -> Value {
        let mut properties = Map::new();
        let mut required = Vec::new();
        for param in &self.params {
            properties.insert(
                param.name.to_string(),
                json!({"type": "string", "description": param.description}),
            );
            if param.required {
                required.push(Value::String(param.name.to_string()));
            }
        }
        json!({
            "type": "object",
            "properties": properties,
            "required": required,
        })
    }

    /// Protocol-level tool definition.
    pub fn definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: self.name.to_string(),
            description: Some(self.description.to_string()),
            input_schema: self.input_schema(),
        }
    }
}

/// An invocable tool implementation.
///
/// Handlers return `Ok(envelope)` for every remote outcome, including
/// rejections and network failures; `Err` is reserved for configuration
/// faults such as a missing credential.
#[async_trait]
pub trait ToolHandler: Send + Sync {
    async fn call(&self, args: &Map<String, Value>) -> Result<Envelope, McpError>;
}

struct RegisteredTool {
    spec: ToolSpec,
    handler: Arc<dyn ToolHandler>,
}

/// Registry of available tools.
#[derive(Default)]
pub struct ToolRegistry {
    tools: HashMap<String, RegisteredTool>,
}

impl ToolRegistry {
    /// Create a new empty tool registry.
    pub fn new() -> Self {
        Self {
            tools: HashMap::new(),
        }
    }

    /// Register a tool. Names are unique within the registry.
    pub fn register(
        &mut self,
        spec: ToolSpec,
        handler: Arc<dyn ToolHandler>,
    ) -> Result<(), McpError> {
        if self.tools.contains_key(spec.name) {
            return Err(McpError::DuplicateTool {
                name: spec.name.to_string(),
            });
        }
        self.tools
            .insert(spec.name.to_string(), RegisteredTool { spec, handler });
        Ok(())
    }

    /// Dispatch an invocation to the named tool.
    ///
    /// Checks required-argument presence before invoking the handler;
    /// no validation happens beyond presence.
    pub async fn dispatch(&self, name: &str, arguments: &Value) -> Result<Envelope, McpError> {
        let tool = self.tools.get(name).ok_or_else(|| McpError::ToolNotFound {
            name: name.to_string(),
        })?;

        let empty = Map::new();
        let args = match arguments {
            Value::Object(map) => map,
            Value::Null => &empty,
            _ => {
                return Err(McpError::InvalidRequest(
                    "arguments must be a JSON object".to_string(),
                ));
            }
        };

        for param in &tool.spec.params {
            if param.required && !args.contains_key(param.name) {
                return Err(McpError::MissingArgument {
                    tool: name.to_string(),
                    name: param.name.to_string(),
                });
            }
        }

        tool.handler.call(args).await
    }

    /// Check if a tool exists.
    pub fn contains(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    /// Tool definitions for `tools/list`, sorted by name.
    pub fn definitions(&self) -> Vec<ToolDefinition> {
        let mut specs: Vec<&ToolSpec> = self.tools.values().map(|t| &t.spec).collect();
        specs.sort_by_key(|s| s.name);
        specs.iter().map(|s| s.definition()).collect()
    }

    /// Number of registered tools.
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingHandler {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl ToolHandler for CountingHandler {
        async fn call(&self, _args: &Map<String, Value>) -> Result<Envelope, McpError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(Envelope::success("result", json!({"ok": true})))
        }
    }

    fn spec(name: &'static str, params: Vec<ParamSpec>) -> ToolSpec {
        ToolSpec {
            name,
            description: "a test tool",
            params,
        }
    }

    #[tokio::test]
    async fn test_register_and_dispatch() {
        let mut registry = ToolRegistry::new();
        let handler = Arc::new(CountingHandler {
            calls: AtomicUsize::new(0),
        });
        registry.register(spec("ping", vec![]), handler.clone()).unwrap();

        let envelope = registry.dispatch("ping", &Value::Null).await.unwrap();
        assert!(!envelope.is_error());
        assert_eq!(handler.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_duplicate_registration_rejected() {
        let mut registry = ToolRegistry::new();
        let handler = Arc::new(CountingHandler {
            calls: AtomicUsize::new(0),
        });
        registry.register(spec("ping", vec![]), handler.clone()).unwrap();
        let err = registry.register(spec("ping", vec![]), handler).unwrap_err();
        assert!(matches!(err, McpError::DuplicateTool { .. }));
    }

    #[tokio::test]
    async fn test_unknown_tool_invokes_nothing() {
        let mut registry = ToolRegistry::new();
        let handler = Arc::new(CountingHandler {
            calls: AtomicUsize::new(0),
        });
        registry.register(spec("ping", vec![]), handler.clone()).unwrap();

        let err = registry.dispatch("pong", &Value::Null).await.unwrap_err();
        assert!(matches!(err, McpError::ToolNotFound { .. }));
        assert_eq!(handler.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_missing_required_argument_blocks_handler() {
        let mut registry = ToolRegistry::new();
        let handler = Arc::new(CountingHandler {
            calls: AtomicUsize::new(0),
        });
        registry
            .register(
                spec("lookup", vec![ParamSpec::required("instance_name", "instance")]),
                handler.clone(),
            )
            .unwrap();

        let err = registry
            .dispatch("lookup", &json!({}))
            .await
            .unwrap_err();
        assert!(matches!(err, McpError::MissingArgument { .. }));
        assert_eq!(handler.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_non_object_arguments_rejected() {
        let mut registry = ToolRegistry::new();
        registry
            .register(
                spec("ping", vec![]),
                Arc::new(CountingHandler {
                    calls: AtomicUsize::new(0),
                }),
            )
            .unwrap();
        let err = registry.dispatch("ping", &json!("nope")).await.unwrap_err();
        assert!(matches!(err, McpError::InvalidRequest(_)));
    }

    #[test]
    fn test_input_schema_shape() {
        let spec = spec(
            "lookup",
            vec![
                ParamSpec::required("instance_name", "The name of the Xano instance"),
                ParamSpec {
                    name: "verbose",
                    description: "unused",
                    required: false,
                },
            ],
        );
        let schema = spec.input_schema();
        assert_eq!(schema["type"], "object");
        assert_eq!(schema["properties"]["instance_name"]["type"], "string");
        assert_eq!(schema["required"], json!(["instance_name"]));
    }

    #[test]
    fn test_definitions_sorted() {
        let mut registry = ToolRegistry::new();
        let handler = Arc::new(CountingHandler {
            calls: AtomicUsize::new(0),
        });
        registry.register(spec("zeta", vec![]), handler.clone()).unwrap();
        registry.register(spec("alpha", vec![]), handler).unwrap();
        let names: Vec<String> = registry.definitions().iter().map(|d| d.name.clone()).collect();
        assert_eq!(names, vec!["alpha", "zeta"]);
    }
}
