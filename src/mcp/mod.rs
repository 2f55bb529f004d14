//
//  bitbucket-mcp-server
//  mcp/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Model Context Protocol Surface
//!
//! - [`jsonrpc`]: JSON-RPC 2.0 request/response types and error codes
//! - [`tools`]: the tool table and the dispatcher that calls the API client
//! - [`server`]: the stdio loop answering `initialize`, `ping`, `tools/list`
//!   and `tools/call`

pub mod jsonrpc;
pub mod server;
pub mod tools;

pub use jsonrpc::{JsonRpcRequest, JsonRpcResponse};
pub use server::McpServer;
pub use tools::{CallToolResult, Content, Tool, ToolDefinition, ToolDispatcher, ToolError};
