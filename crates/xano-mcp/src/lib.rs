//! # xano-mcp
//!
//! MCP (Model Context Protocol) server bridging tool calls to the Xano
//! Metadata API.
//!
//! The crate is a protocol bridge: tool-invocation requests arrive over
//! stdio JSON-RPC, each is translated into an authenticated GET against
//! the Metadata API, and the outcome comes back as a uniform
//! result-or-error envelope.
//!
//! ## Architecture
//!
//! ```text
//! AI Agent (Claude, GPT, etc.)
//!       │
//!       │ MCP protocol (list tools / call tool)
//!       ▼
//! ┌───────────────────┐
//! │  Xano MCP Server  │
//! │  1. Look up tool  │  ← tools::ToolRegistry
//! │  2. Check args    │
//! │  3. Resolve token │  ← xano-core CredentialResolver
//! │  4. Build GET     │  ← client::Route
//! │  5. Execute call  │  ← per-call reqwest client
//! │  6. Normalize     │  ← envelope::Envelope
//! └─────────┬─────────┘
//!           │
//!           ▼
//!   Xano Metadata API
//! ```
//!
//! ## Outcomes
//!
//! Remote rejections (non-200) and transport failures are *data*, not
//! errors: they come back as `{"error": ...}` envelopes and never crash
//! or hang the bridge. Only registry and configuration faults (unknown
//! tool, missing argument, missing credential) propagate as [`McpError`].

pub mod catalog;
pub mod client;
pub mod envelope;
pub mod error;
pub mod protocol;
pub mod server;
pub mod tools;

pub use catalog::register_meta_tools;
pub use client::{CallOutcome, MetaTool, Operation, Route, Segment};
pub use envelope::Envelope;
pub use error::McpError;
pub use protocol::{
    CallToolParams, JsonRpcRequest, JsonRpcResponse, ToolContent, ToolDefinition,
};
pub use server::McpServer;
pub use tools::{ParamSpec, ToolHandler, ToolRegistry, ToolSpec};
