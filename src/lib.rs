//
//  bitbucket-mcp-server
//  lib.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Bitbucket MCP Server Library
//!
//! Exposes a handful of Bitbucket Cloud REST operations as Model Context
//! Protocol tools.
//!
//! ## Overview
//!
//! A tool call flows through two layers:
//!
//! 1. [`mcp::ToolDispatcher`] resolves the tool name, decodes the arguments
//!    and turns the outcome into a text envelope.
//! 2. [`api::BitbucketClient`] makes exactly one HTTP request and normalizes
//!    failures into [`api::ApiError`].
//!
//! | Tool | Client method |
//! |------|---------------|
//! | `bitbucket_list_repositories` | `list_repositories` |
//! | `bitbucket_get_repository` | `get_repository` |
//! | `bitbucket_list_pull_requests` | `list_pull_requests` |
//! | `bitbucket_get_pull_request` | `get_pull_request` |
//! | `bitbucket_list_issues` | `list_issues` |
//! | `bitbucket_create_pull_request` | `create_pull_request` |
//!
//! ## Module Structure
//!
//! - [`api`]: HTTP client and Bitbucket Cloud resource types
//! - [`auth`]: Basic-auth credentials
//! - [`cli`]: Process configuration (flags and environment)
//! - [`mcp`]: JSON-RPC types, tool dispatcher and stdio server
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use bitbucket_mcp_server::api::BitbucketClient;
//! use bitbucket_mcp_server::mcp::ToolDispatcher;
//! use serde_json::json;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let tools = ToolDispatcher::new(BitbucketClient::cloud()?);
//! let result = tools
//!     .call_tool("bitbucket_get_repository", json!({"workspace": "atlassian", "repo_slug": "python-bitbucket"}))
//!     .await;
//! println!("{}", result.first_text().unwrap_or_default());
//! # Ok(())
//! # }
//! ```

/// Bitbucket Cloud API client.
///
/// Handles authentication, request building and error normalization, and
/// holds the repository, pull request and issue types.
pub mod api;

/// Authentication credentials.
pub mod auth;

/// Command-line and environment configuration.
pub mod cli;

/// Model Context Protocol server.
pub mod mcp;

pub use cli::Cli;

/// Application name, used as the MCP server name and in the User-Agent.
pub const APP_NAME: &str = "bitbucket-mcp-server";

/// Application version, taken from Cargo.toml at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Process exit codes.
pub mod exit_codes {
    /// The server ran until stdin closed.
    pub const SUCCESS: i32 = 0;

    /// Startup or I/O failure.
    pub const ERROR: i32 = 1;
}
