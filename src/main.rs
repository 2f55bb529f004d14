//
//  bitbucket-mcp-server
//  main.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use bitbucket_mcp_server::cli::Cli;
use bitbucket_mcp_server::exit_codes;
use bitbucket_mcp_server::mcp::{McpServer, ToolDispatcher};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    init_logging();

    // Parse CLI arguments
    let cli = Cli::parse();

    // Serve until stdin closes
    let result = run(cli).await;

    // Handle result and exit
    match result {
        Ok(()) => std::process::exit(exit_codes::SUCCESS),
        Err(e) => {
            eprintln!("Error: {e:#}");
            std::process::exit(exit_codes::ERROR);
        }
    }
}

/// Initialize logging based on environment. Stdout carries the protocol,
/// so everything goes to stderr.
fn init_logging() {
    let filter = EnvFilter::try_from_env("BITBUCKET_MCP_LOG")
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

async fn run(cli: Cli) -> Result<()> {
    let client = cli.build_client()?;
    let server = McpServer::new(ToolDispatcher::new(client));
    server.run_stdio().await
}
