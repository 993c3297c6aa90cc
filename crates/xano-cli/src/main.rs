//! The `xano` binary, an MCP bridge for the Xano Metadata API.
//!
//! `xano serve` speaks MCP over stdio; all diagnostics go to stderr so
//! stdout stays a clean protocol stream. `xano tools` prints the tool
//! catalog for inspection.

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use xano_core::{ApiConfig, CredentialResolver};
use xano_mcp::{McpServer, ToolRegistry, register_meta_tools};

#[derive(Parser, Debug)]
#[command(name = "xano", version, about = "Xano Metadata API MCP bridge")]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the MCP server on stdio.
    Serve(ApiArgs),

    /// Print the registered tool definitions as JSON.
    Tools(ApiArgs),
}

/// Connection settings shared by all subcommands.
#[derive(Args, Debug)]
struct ApiArgs {
    /// API token. Falls back to XANO_API_TOKEN, re-read on every call.
    #[arg(long)]
    token: Option<String>,

    /// Metadata API base URL.
    #[arg(long, env = "XANO_API_BASE", default_value = xano_core::config::DEFAULT_API_BASE)]
    api_base: String,

    /// Per-request timeout in seconds.
    #[arg(long, default_value_t = 30)]
    timeout_secs: u64,
}

impl ApiArgs {
    fn build_registry(&self) -> Result<ToolRegistry> {
        let config = ApiConfig {
            base_url: self.api_base.clone(),
            request_timeout_secs: self.timeout_secs,
        };
        let credentials = CredentialResolver::new(self.token.clone());
        let mut registry = ToolRegistry::new();
        register_meta_tools(&mut registry, &config, &credentials)?;
        Ok(registry)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // stderr only: stdout carries the MCP protocol stream.
    tracing_subscriber::fmt()
        .with_env_filter("info")
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.cmd {
        Command::Serve(args) => {
            let server = McpServer::new(args.build_registry()?);
            tracing::info!(api_base = %args.api_base, "starting Xano MCP bridge");
            server.run_stdio().await?;
        }
        Command::Tools(args) => {
            let registry = args.build_registry()?;
            println!("{}", serde_json::to_string_pretty(&registry.definitions())?);
        }
    }

    Ok(())
}
