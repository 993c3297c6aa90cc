//! Error types for the MCP crate.

use thiserror::Error;
use xano_core::CredentialError;

/// Errors that can occur in the MCP server.
///
/// These cover registry and configuration faults. Remote rejections and
/// network failures are deliberately *not* here: they are expected
/// operational outcomes and are folded into the result envelope instead
/// of propagating as errors.
#[derive(Debug, Error)]
pub enum McpError {
    /// A tool with this name is already registered.
    #[error("tool already registered: {name}")]
    DuplicateTool { name: String },

    /// Tool not found.
    #[error("tool not found: {name}")]
    ToolNotFound { name: String },

    /// A required argument was not supplied.
    #[error("missing required argument for tool {tool}: {name}")]
    MissingArgument { tool: String, name: String },

    /// No API token could be resolved.
    #[error(transparent)]
    Credential(#[from] CredentialError),

    /// Invalid request format.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
