//! # xano-core
//!
//! Shared types for the Xano MCP bridge: Metadata API configuration and
//! bearer-token resolution. Kept free of transport and HTTP concerns so
//! both the MCP server crate and the CLI can depend on it.

pub mod config;
pub mod credentials;

pub use config::ApiConfig;
pub use credentials::{CredentialError, CredentialResolver};
