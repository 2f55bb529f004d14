//
//  bitbucket-mcp-server
//  mcp/tools.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Tool table and dispatcher.
//!
//! [`Tool`] enumerates the six tools; each variant knows its name,
//! description and input schema. [`ToolDispatcher`] resolves a name, decodes
//! the argument object into a typed struct, calls the matching
//! [`BitbucketClient`] method and wraps the outcome in a [`CallToolResult`].
//!
//! On success the text is the upstream body pretty-printed as received.
//! `call_tool` never fails: errors come back as `Error: <message>` text.

use serde::de::{DeserializeOwned, Error as _};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{json, Map, Number, Value};
use thiserror::Error;

use crate::api::cloud::{
    CreatePullRequestRequest, PullRequestState, DEFAULT_DESTINATION_BRANCH, ISSUE_STATES,
};
use crate::api::{ApiError, BitbucketClient, Operation};

/// Text reported when a failure carries no message.
pub const UNKNOWN_ERROR: &str = "Unknown error";

/// Definition of a tool as advertised by `tools/list`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDefinition {
    /// Unique tool name, e.g. `bitbucket_list_issues`.
    pub name: String,
    /// One-line summary shown to the client.
    pub description: String,
    /// JSON Schema of the argument object.
    #[serde(rename = "inputSchema")]
    pub input_schema: Value,
}

/// One item of a tool result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Content {
    /// Plain text, serialized as `{"type": "text", "text": ...}`.
    Text { text: String },
}

/// Result envelope of `tools/call`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallToolResult {
    /// Always exactly one item.
    pub content: Vec<Content>,
}

impl CallToolResult {
    /// A single text item.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            content: vec![Content::Text { text: text.into() }],
        }
    }

    /// A single `Error: <message>` text item.
    pub fn error(message: &str) -> Self {
        let message = if message.is_empty() { UNKNOWN_ERROR } else { message };
        Self::text(format!("Error: {}", message))
    }

    /// Text of the first content item.
    pub fn first_text(&self) -> Option<&str> {
        self.content.first().map(|Content::Text { text }| text.as_str())
    }
}

/// Failures while invoking a tool.
#[derive(Error, Debug)]
pub enum ToolError {
    /// No tool is registered under this name.
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    /// The argument object does not match the tool's schema.
    #[error("Invalid arguments for {tool}: {source}")]
    InvalidArguments {
        /// Name of the tool being invoked.
        tool: &'static str,
        /// Decoding failure, naming the offending field.
        source: serde_json::Error,
    },

    /// The result could not be rendered as text.
    #[error("Failed to serialize result: {0}")]
    Serialize(#[source] serde_json::Error),

    /// The Bitbucket call failed.
    #[error(transparent)]
    Api(#[from] ApiError),
}

impl ToolError {
    /// The client operation that failed, for API errors raised by a request.
    pub fn operation(&self) -> Option<Operation> {
        match self {
            Self::Api(err) => err.operation(),
            _ => None,
        }
    }
}

/// The tools this server exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tool {
    /// `bitbucket_list_repositories`
    ListRepositories,
    /// `bitbucket_get_repository`
    GetRepository,
    /// `bitbucket_list_pull_requests`
    ListPullRequests,
    /// `bitbucket_get_pull_request`
    GetPullRequest,
    /// `bitbucket_list_issues`
    ListIssues,
    /// `bitbucket_create_pull_request`
    CreatePullRequest,
}

impl Tool {
    /// Every tool, in advertised order.
    pub const ALL: [Tool; 6] = [
        Self::ListRepositories,
        Self::GetRepository,
        Self::ListPullRequests,
        Self::GetPullRequest,
        Self::ListIssues,
        Self::CreatePullRequest,
    ];

    /// The advertised tool name.
    pub fn name(self) -> &'static str {
        match self {
            Self::ListRepositories => "bitbucket_list_repositories",
            Self::GetRepository => "bitbucket_get_repository",
            Self::ListPullRequests => "bitbucket_list_pull_requests",
            Self::GetPullRequest => "bitbucket_get_pull_request",
            Self::ListIssues => "bitbucket_list_issues",
            Self::CreatePullRequest => "bitbucket_create_pull_request",
        }
    }

    /// Looks a tool up by its advertised name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|tool| tool.name() == name)
    }

    /// One-line description shown in `tools/list`.
    pub fn description(self) -> &'static str {
        match self {
            Self::ListRepositories => "List repositories for a workspace",
            Self::GetRepository => "Get details of a specific repository",
            Self::ListPullRequests => "List pull requests for a repository",
            Self::GetPullRequest => "Get details of a specific pull request",
            Self::ListIssues => "List issues for a repository",
            Self::CreatePullRequest => "Create a new pull request",
        }
    }

    /// JSON Schema of the tool's argument object.
    pub fn input_schema(self) -> Value {
        let workspace = json!({
            "type": "string",
            "description": "Bitbucket workspace name"
        });
        let repo_slug = json!({
            "type": "string",
            "description": "Repository slug"
        });

        match self {
            Self::ListRepositories => json!({
                "type": "object",
                "properties": {
                    "workspace": workspace,
                    "page": {
                        "type": "integer",
                        "description": "Page number (default: 1)",
                        "default": 1
                    }
                },
                "required": ["workspace"]
            }),
            Self::GetRepository => json!({
                "type": "object",
                "properties": {
                    "workspace": workspace,
                    "repo_slug": repo_slug
                },
                "required": ["workspace", "repo_slug"]
            }),
            Self::ListPullRequests => json!({
                "type": "object",
                "properties": {
                    "workspace": workspace,
                    "repo_slug": repo_slug,
                    "state": {
                        "type": "string",
                        "enum": PullRequestState::ALL.map(PullRequestState::as_str),
                        "description": "Pull request state",
                        "default": PullRequestState::Open.as_str()
                    }
                },
                "required": ["workspace", "repo_slug"]
            }),
            Self::GetPullRequest => json!({
                "type": "object",
                "properties": {
                    "workspace": workspace,
                    "repo_slug": repo_slug,
                    "pull_request_id": {
                        "type": "integer",
                        "description": "Pull request ID"
                    }
                },
                "required": ["workspace", "repo_slug", "pull_request_id"]
            }),
            Self::ListIssues => json!({
                "type": "object",
                "properties": {
                    "workspace": workspace,
                    "repo_slug": repo_slug,
                    "state": {
                        "type": "string",
                        "enum": ISSUE_STATES,
                        "description": "Issue state"
                    }
                },
                "required": ["workspace", "repo_slug"]
            }),
            Self::CreatePullRequest => json!({
                "type": "object",
                "properties": {
                    "workspace": workspace,
                    "repo_slug": repo_slug,
                    "title": {
                        "type": "string",
                        "description": "Pull request title"
                    },
                    "description": {
                        "type": "string",
                        "description": "Pull request description"
                    },
                    "source_branch": {
                        "type": "string",
                        "description": "Source branch name"
                    },
                    "destination_branch": {
                        "type": "string",
                        "description": "Destination branch name",
                        "default": DEFAULT_DESTINATION_BRANCH
                    }
                },
                "required": ["workspace", "repo_slug", "title", "source_branch"]
            }),
        }
    }

    /// Name, description and schema bundled for `tools/list`.
    pub fn definition(self) -> ToolDefinition {
        ToolDefinition {
            name: self.name().to_string(),
            description: self.description().to_string(),
            input_schema: self.input_schema(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ListRepositoriesArgs {
    workspace: String,
    #[serde(default, deserialize_with = "optional_whole_number")]
    page: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct RepositoryArgs {
    workspace: String,
    repo_slug: String,
}

#[derive(Debug, Deserialize)]
struct ListPullRequestsArgs {
    workspace: String,
    repo_slug: String,
    #[serde(default)]
    state: Option<PullRequestState>,
}

#[derive(Debug, Deserialize)]
struct GetPullRequestArgs {
    workspace: String,
    repo_slug: String,
    #[serde(deserialize_with = "whole_number")]
    pull_request_id: u64,
}

#[derive(Debug, Deserialize)]
struct ListIssuesArgs {
    workspace: String,
    repo_slug: String,
    #[serde(default)]
    state: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CreatePullRequestArgs {
    workspace: String,
    repo_slug: String,
    title: String,
    #[serde(default)]
    description: Option<String>,
    source_branch: String,
    #[serde(default)]
    destination_branch: Option<String>,
}

/// Accepts any JSON number without a fractional part, so `5` and `5.0` both
/// decode.
fn whole_number<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: TryFrom<u64>,
{
    let number = Number::deserialize(deserializer)?;
    number_to_integer(&number).map_err(D::Error::custom)
}

fn optional_whole_number<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: TryFrom<u64>,
{
    match Option::<Number>::deserialize(deserializer)? {
        Some(number) => number_to_integer(&number).map(Some).map_err(D::Error::custom),
        None => Ok(None),
    }
}

fn number_to_integer<T: TryFrom<u64>>(number: &Number) -> Result<T, String> {
    let value = number
        .as_u64()
        .or_else(|| {
            number
                .as_f64()
                .filter(|f| f.fract() == 0.0 && *f >= 0.0 && *f <= u64::MAX as f64)
                .map(|f| f as u64)
        })
        .ok_or_else(|| format!("expected a non-negative whole number, found {number}"))?;

    T::try_from(value).map_err(|_| format!("number {value} is out of range"))
}

impl CreatePullRequestArgs {
    fn request(&self) -> CreatePullRequestRequest {
        let destination = self
            .destination_branch
            .as_deref()
            .filter(|branch| !branch.is_empty())
            .unwrap_or(DEFAULT_DESTINATION_BRANCH);

        let mut request = CreatePullRequestRequest::new(&self.title, &self.source_branch)
            .with_destination_branch(destination);
        request.description = self.description.clone();
        request
    }
}

/// Routes tool calls to the Bitbucket client.
#[derive(Debug)]
pub struct ToolDispatcher {
    client: BitbucketClient,
}

impl ToolDispatcher {
    /// Creates a dispatcher calling `client`.
    pub fn new(client: BitbucketClient) -> Self {
        Self { client }
    }

    /// The static tool list. Performs no I/O.
    pub fn list_tools(&self) -> Vec<ToolDefinition> {
        Tool::ALL.into_iter().map(Tool::definition).collect()
    }

    /// Invokes a tool by name. Failures are reported inside the envelope.
    pub async fn call_tool(&self, name: &str, arguments: Value) -> CallToolResult {
        tracing::debug!(tool = name, "tool call");

        let outcome = match Tool::from_name(name) {
            Some(tool) => self.invoke(tool, arguments).await,
            None => Err(ToolError::UnknownTool(name.to_string())),
        };

        match outcome.and_then(|value| {
            serde_json::to_string_pretty(&value).map_err(ToolError::Serialize)
        }) {
            Ok(text) => CallToolResult::text(text),
            Err(err) => {
                tracing::warn!(
                    tool = name,
                    operation = err.operation().map(Operation::verb_phrase),
                    error = %err,
                    "tool call failed"
                );
                CallToolResult::error(&err.to_string())
            }
        }
    }

    async fn invoke(&self, tool: Tool, arguments: Value) -> Result<Value, ToolError> {
        let client = &self.client;

        let body = match tool {
            Tool::ListRepositories => {
                let args: ListRepositoriesArgs = decode(tool, arguments)?;
                let page = args.page.unwrap_or(1);
                client
                    .list_repositories(&args.workspace, page)
                    .await?
                    .into_value()
            }
            Tool::GetRepository => {
                let args: RepositoryArgs = decode(tool, arguments)?;
                client
                    .get_repository(&args.workspace, &args.repo_slug)
                    .await?
                    .into_value()
            }
            Tool::ListPullRequests => {
                let args: ListPullRequestsArgs = decode(tool, arguments)?;
                client
                    .list_pull_requests(&args.workspace, &args.repo_slug, args.state)
                    .await?
                    .into_value()
            }
            Tool::GetPullRequest => {
                let args: GetPullRequestArgs = decode(tool, arguments)?;
                client
                    .get_pull_request(&args.workspace, &args.repo_slug, args.pull_request_id)
                    .await?
                    .into_value()
            }
            Tool::ListIssues => {
                let args: ListIssuesArgs = decode(tool, arguments)?;
                client
                    .list_issues(&args.workspace, &args.repo_slug, args.state.as_deref())
                    .await?
                    .into_value()
            }
            Tool::CreatePullRequest => {
                // Missing credentials win over argument problems.
                client.require_auth()?;
                let args: CreatePullRequestArgs = decode(tool, arguments)?;
                client
                    .create_pull_request(&args.workspace, &args.repo_slug, &args.request())
                    .await?
                    .into_value()
            }
        };

        Ok(body)
    }
}

/// Decodes the argument object; `null` counts as `{}`.
fn decode<T: DeserializeOwned>(tool: Tool, arguments: Value) -> Result<T, ToolError> {
    let arguments = match arguments {
        Value::Null => Value::Object(Map::new()),
        other => other,
    };
    serde_json::from_value(arguments).map_err(|source| ToolError::InvalidArguments {
        tool: tool.name(),
        source,
    })
}
