use clap::{ArgAction, Parser};
use rmcp::{transport::stdio, ServiceExt};
use std::path::PathBuf;
use std::process::ExitCode;

use deepsource_mcp::client::DeepSourceClient;
use deepsource_mcp::config::DeepSourceConfig;
use deepsource_mcp::logging::{init_logging, LogLevel};
use deepsource_mcp::mcp::DeepSourceMcpServer;

#[derive(Parser, Debug)]
#[command(name = "deepsource-mcp")]
#[command(version)]
#[command(about = "DeepSource MCP server: code-quality data over the Model Context Protocol")]
struct Cli {
    /// Path to a TOML configuration file
    #[arg(long, short)]
    config: Option<PathBuf>,

    /// Increase verbosity (-v, -vv)
    #[arg(long, short, action = ArgAction::Count, conflicts_with = "quiet")]
    verbose: u8,

    /// Suppress all log output except errors
    #[arg(long, short)]
    quiet: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // stdout carries the MCP stream; logs must stay on stderr.
    let level = if cli.quiet {
        LogLevel::Error
    } else {
        LogLevel::from_verbosity(cli.verbose)
    };
    init_logging(level);

    let config = match DeepSourceConfig::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let client = match DeepSourceClient::new(config) {
        Ok(client) => client,
        Err(e) => {
            tracing::error!("{e}");
            return ExitCode::FAILURE;
        }
    };

    tracing::info!("Starting DeepSource MCP server on stdio");
    let service = match DeepSourceMcpServer::new(client).serve(stdio()).await {
        Ok(service) => service,
        Err(e) => {
            tracing::error!("Failed to start MCP server: {e}");
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = service.waiting().await {
        tracing::error!("MCP server terminated with error: {e}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
