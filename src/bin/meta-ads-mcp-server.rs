// ABOUTME: Binary entry point for the Meta Ads MCP server
// ABOUTME: Parses CLI flags, loads environment configuration, and runs the HTTP server
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Meta Ads MCP server binary

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing::info;

use meta_ads_mcp_server::config::ServerConfig;
use meta_ads_mcp_server::constants::SERVER_VERSION;
use meta_ads_mcp_server::logging;
use meta_ads_mcp_server::mcp::resources::ServerResources;
use meta_ads_mcp_server::server::McpHttpServer;

#[derive(Parser)]
#[command(
    name = "meta-ads-mcp-server",
    version = SERVER_VERSION,
    about = "Model Context Protocol server for Meta Ads marketing data"
)]
struct Args {
    /// Port to listen on (overrides MCP_HTTP_PORT)
    #[arg(long)]
    port: Option<u16>,

    /// Host to bind (overrides MCP_HOST)
    #[arg(long)]
    host: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    logging::init();

    let args = Args::parse();
    let mut config = ServerConfig::from_env()?;
    if let Some(port) = args.port {
        config.http_port = port;
    }
    if let Some(host) = args.host {
        config.host = host;
    }

    info!(
        version = SERVER_VERSION,
        host = %config.host,
        port = config.http_port,
        "Starting Meta Ads MCP server"
    );

    let resources = Arc::new(ServerResources::from_config(config)?);
    McpHttpServer::new(resources).serve().await?;
    Ok(())
}
