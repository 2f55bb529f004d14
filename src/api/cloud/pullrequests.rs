//
//  bitbucket-mcp-server
//  api/cloud/pullrequests.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Cloud pull request types and operations.
//!
//! # Pull Request Lifecycle
//!
//! 1. **OPEN** - Initial state when created
//! 2. **MERGED** - Successfully merged into the destination branch
//! 3. **DECLINED** - Rejected and closed without merging
//!
//! # Example
//!
//! ```rust,no_run
//! use bitbucket_mcp_server::api::BitbucketClient;
//! use bitbucket_mcp_server::api::cloud::CreatePullRequestRequest;
//! use bitbucket_mcp_server::auth::AuthCredential;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let client = BitbucketClient::cloud()?
//!     .with_auth(AuthCredential::app_password("alice", "app-password"));
//!
//! let request = CreatePullRequestRequest::new("Add user authentication", "feature/auth")
//!     .with_description("Implements OAuth2 login flow");
//!
//! let created = client.create_pull_request("acme", "web", &request).await?;
//! let pr = created.parse()?;
//! println!("Opened #{} -> {}", pr.id, pr.links.html.href);
//! # Ok(())
//! # }
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::api::client::{BitbucketClient, DEFAULT_PAGELEN};
use crate::api::common::{ApiError, Document, HtmlLinks, Operation, PaginatedResponse, UserRef};

/// Branch pull requests target when the caller names none.
pub const DEFAULT_DESTINATION_BRANCH: &str = "main";

/// State of a pull request.
///
/// These are the three values accepted as a list filter. Bitbucket may
/// report other states on individual pull requests (`SUPERSEDED` on old
/// ones); those fail the typed view but still reach the caller in the raw
/// [`Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PullRequestState {
    /// Open and awaiting review or merge.
    Open,
    /// Merged into the destination branch.
    Merged,
    /// Closed without merging.
    Declined,
}

impl PullRequestState {
    /// All states, in the order Bitbucket lists them.
    pub const ALL: [PullRequestState; 3] = [Self::Open, Self::Merged, Self::Declined];

    /// The wire representation, e.g. `OPEN`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Open => "OPEN",
            Self::Merged => "MERGED",
            Self::Declined => "DECLINED",
        }
    }
}

impl fmt::Display for PullRequestState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Typed view of a pull request in Bitbucket Cloud.
///
/// # Example
///
/// ```rust
/// use bitbucket_mcp_server::api::cloud::PullRequest;
///
/// fn display_pr(pr: &PullRequest) {
///     println!("PR #{}: {}", pr.id, pr.title);
///     println!("  State: {}", pr.state);
///     println!("  {} -> {}", pr.source.branch.name, pr.destination.branch.name);
///     println!("  Author: {}", pr.author.display_name);
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PullRequest {
    /// Unique numeric identifier within the repository.
    pub id: u64,

    /// Short summary of the changes.
    pub title: String,

    /// Optional detailed description. Supports Markdown formatting.
    #[serde(default)]
    pub description: Option<String>,

    /// Current state of the pull request.
    pub state: PullRequestState,

    /// ISO 8601 creation timestamp.
    pub created_on: String,

    /// ISO 8601 last update timestamp.
    pub updated_on: String,

    /// The user who created this pull request.
    pub author: UserRef,

    /// The branch containing the proposed changes.
    pub source: PrBranchRef,

    /// The branch the changes will be merged into.
    pub destination: PrBranchRef,

    /// Canonical web link.
    pub links: HtmlLinks,
}

/// Branch reference within a pull request.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PrBranchRef {
    /// The branch.
    pub branch: Branch,

    /// The repository that contains this branch.
    pub repository: RepositoryRef,
}

/// A branch as embedded in a pull request.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Branch {
    /// The name of the branch.
    pub name: String,
}

/// Minimal repository reference embedded in other resources.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RepositoryRef {
    /// Full path in format `{workspace_slug}/{repo_slug}`.
    pub full_name: String,
}

/// Parameters for opening a pull request.
///
/// # Example
///
/// ```rust
/// use bitbucket_mcp_server::api::cloud::CreatePullRequestRequest;
///
/// let request = CreatePullRequestRequest::new("Implement feature X", "feature/x");
/// assert_eq!(request.destination_branch, "main");
///
/// let request = request.with_destination_branch("develop");
/// assert_eq!(request.destination_branch, "develop");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatePullRequestRequest {
    /// The title of the pull request.
    pub title: String,

    /// Optional detailed description.
    pub description: Option<String>,

    /// The branch containing the changes.
    pub source_branch: String,

    /// The branch to merge into.
    pub destination_branch: String,
}

impl CreatePullRequestRequest {
    /// Creates a request targeting [`DEFAULT_DESTINATION_BRANCH`].
    pub fn new(title: impl Into<String>, source_branch: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            source_branch: source_branch.into(),
            destination_branch: DEFAULT_DESTINATION_BRANCH.to_string(),
        }
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the destination branch.
    pub fn with_destination_branch(mut self, branch: impl Into<String>) -> Self {
        self.destination_branch = branch.into();
        self
    }

    fn payload(&self) -> CreatePullRequestPayload<'_> {
        CreatePullRequestPayload {
            title: &self.title,
            description: self.description.as_deref(),
            source: BranchSpec {
                branch: BranchName {
                    name: &self.source_branch,
                },
            },
            destination: BranchSpec {
                branch: BranchName {
                    name: &self.destination_branch,
                },
            },
        }
    }
}

/// Request body for `POST .../pullrequests`.
#[derive(Debug, Serialize)]
struct CreatePullRequestPayload<'a> {
    title: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<&'a str>,
    source: BranchSpec<'a>,
    destination: BranchSpec<'a>,
}

#[derive(Debug, Serialize)]
struct BranchSpec<'a> {
    branch: BranchName<'a>,
}

#[derive(Debug, Serialize)]
struct BranchName<'a> {
    name: &'a str,
}

impl BitbucketClient {
    /// Lists pull requests of a repository, ten per page.
    ///
    /// Without a state filter Bitbucket applies its own default (open pull
    /// requests only).
    ///
    /// `GET /repositories/{workspace}/{repo_slug}/pullrequests?pagelen=10[&state=...]`
    pub async fn list_pull_requests(
        &self,
        workspace: &str,
        repo_slug: &str,
        state: Option<PullRequestState>,
    ) -> Result<Document<PaginatedResponse<PullRequest>>, ApiError> {
        let path = format!("/repositories/{}/{}/pullrequests", workspace, repo_slug);
        let mut query = vec![("pagelen", DEFAULT_PAGELEN.to_string())];
        if let Some(state) = state {
            query.push(("state", state.as_str().to_string()));
        }

        self.get(Operation::ListPullRequests, &path, &query).await
    }

    /// Fetches a single pull request.
    ///
    /// `GET /repositories/{workspace}/{repo_slug}/pullrequests/{id}`
    pub async fn get_pull_request(
        &self,
        workspace: &str,
        repo_slug: &str,
        pull_request_id: u64,
    ) -> Result<Document<PullRequest>, ApiError> {
        let path = format!(
            "/repositories/{}/{}/pullrequests/{}",
            workspace, repo_slug, pull_request_id
        );
        self.get(Operation::GetPullRequest, &path, &[]).await
    }

    /// Opens a pull request. Requires credentials.
    ///
    /// Fails with [`ApiError::AuthNotConfigured`] before touching the network
    /// when the client is anonymous.
    ///
    /// `POST /repositories/{workspace}/{repo_slug}/pullrequests`
    pub async fn create_pull_request(
        &self,
        workspace: &str,
        repo_slug: &str,
        request: &CreatePullRequestRequest,
    ) -> Result<Document<PullRequest>, ApiError> {
        self.require_auth()?;

        let path = format!("/repositories/{}/{}/pullrequests", workspace, repo_slug);
        tracing::debug!(
            workspace,
            repo_slug,
            source = %request.source_branch,
            destination = %request.destination_branch,
            "creating pull request"
        );
        let created: Document<PullRequest> = self
            .post(Operation::CreatePullRequest, &path, &request.payload())
            .await?;

        match created.parse() {
            Ok(pr) => tracing::info!(id = pr.id, url = %pr.links.html.href, "opened pull request"),
            Err(e) => tracing::debug!(error = %e, "created pull request has an unexpected shape"),
        }
        Ok(created)
    }
}
