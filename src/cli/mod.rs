//
//  bitbucket-mcp-server
//  cli/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Process configuration using clap derive macros

use anyhow::Result;
use clap::Parser;

use crate::api::BitbucketClient;
use crate::auth::AuthCredential;

/// Bitbucket MCP server - Bitbucket Cloud tools over the Model Context Protocol
#[derive(Parser, Debug, Clone, Default)]
#[command(
    name = "bitbucket-mcp-server",
    version,
    about = "Expose Bitbucket Cloud as Model Context Protocol tools",
    long_about = "bitbucket-mcp-server speaks JSON-RPC 2.0 on stdin/stdout.\n\n\
                  It lets an MCP host list repositories, pull requests and issues,\n\
                  and open pull requests. Creating pull requests needs credentials.",
    after_help = "Set BITBUCKET_MCP_LOG (e.g. 'debug') to control stderr logging."
)]
pub struct Cli {
    /// Bitbucket username used for Basic authentication
    #[arg(long, env = "BITBUCKET_USERNAME")]
    pub username: Option<String>,

    /// Bitbucket app password paired with the username
    #[arg(long, env = "BITBUCKET_APP_PASSWORD", hide_env_values = true)]
    pub app_password: Option<String>,
}

impl Cli {
    /// The configured credential, if both halves are present.
    pub fn credential(&self) -> Option<AuthCredential> {
        AuthCredential::from_parts(self.username.clone(), self.app_password.clone())
    }

    /// Builds the Bitbucket Cloud client described by these options.
    pub fn build_client(&self) -> Result<BitbucketClient> {
        let client = BitbucketClient::cloud()?;
        Ok(match self.credential() {
            Some(credential) => {
                tracing::info!(username = credential.username(), "using Basic authentication");
                client.with_auth(credential)
            }
            None => {
                tracing::info!("no credentials configured; write tools are unavailable");
                client
            }
        })
    }
}
