//
//  bitbucket-mcp-server
//  api/cloud/repositories.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Cloud repository types and operations.
//!
//! Repositories belong to a workspace and are addressed by
//! `{workspace}/{repo_slug}`.
//!
//! # Example
//!
//! ```rust,no_run
//! use bitbucket_mcp_server::api::BitbucketClient;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let client = BitbucketClient::cloud()?;
//! let page = client.list_repositories("atlassian", 1).await?;
//!
//! // Exactly what Bitbucket sent
//! println!("{}", serde_json::to_string_pretty(page.as_value())?);
//!
//! // Typed view
//! for repo in &page.parse()?.values {
//!     println!("{} (private: {})", repo.full_name, repo.is_private);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Notes
//!
//! - The `full_name` field follows the format `{workspace}/{repo_slug}`
//! - Private repositories require authentication for all operations

use serde::Deserialize;

use crate::api::client::{BitbucketClient, DEFAULT_PAGELEN};
use crate::api::common::{ApiError, Document, Link, Operation, PaginatedResponse};

/// Typed view of a Bitbucket Cloud repository.
///
/// Only the commonly used fields are modelled; the full body is available
/// from the [`Document`] the client returns.
///
/// # Example
///
/// ```rust
/// use bitbucket_mcp_server::api::cloud::Repository;
///
/// fn display_repo(repo: &Repository) {
///     println!("Repository: {}", repo.full_name);
///     println!("  Private: {}", repo.is_private);
///     if let Some(ref lang) = repo.language {
///         println!("  Language: {}", lang);
///     }
///     for link in &repo.links.clone {
///         println!("  {}: {}", link.name.as_deref().unwrap_or("clone"), link.href);
///     }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Repository {
    /// Unique identifier for the repository (includes curly braces).
    #[serde(default)]
    pub uuid: String,

    /// Human-readable name of the repository.
    #[serde(default)]
    pub name: String,

    /// Full path in format `{workspace_slug}/{repo_slug}`.
    pub full_name: String,

    /// Optional description of the repository.
    #[serde(default)]
    pub description: Option<String>,

    /// Whether the repository is private.
    #[serde(default)]
    pub is_private: bool,

    /// ISO 8601 timestamp of creation.
    #[serde(default)]
    pub created_on: Option<String>,

    /// ISO 8601 timestamp of last update.
    #[serde(default)]
    pub updated_on: Option<String>,

    /// Repository size in bytes.
    #[serde(default)]
    pub size: Option<u64>,

    /// Primary programming language. Bitbucket sends `""` when unset.
    #[serde(default)]
    pub language: Option<String>,

    /// Whether the issue tracker is enabled.
    #[serde(default)]
    pub has_issues: bool,

    /// Whether the wiki is enabled.
    #[serde(default)]
    pub has_wiki: bool,

    /// Web and clone links.
    #[serde(default)]
    pub links: RepositoryLinks,
}

/// Links attached to a repository.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RepositoryLinks {
    /// Browser URL of the repository.
    #[serde(default)]
    pub html: Option<Link>,

    /// Named clone URLs, typically `https` and `ssh`.
    #[serde(default)]
    pub clone: Vec<Link>,
}

impl BitbucketClient {
    /// Lists the repositories of a workspace, ten per page.
    ///
    /// `GET /repositories/{workspace}?page={page}&pagelen=10`
    pub async fn list_repositories(
        &self,
        workspace: &str,
        page: u32,
    ) -> Result<Document<PaginatedResponse<Repository>>, ApiError> {
        let path = format!("/repositories/{}", workspace);
        let query = [
            ("page", page.to_string()),
            ("pagelen", DEFAULT_PAGELEN.to_string()),
        ];

        let repos: Document<PaginatedResponse<Repository>> = self
            .get(Operation::ListRepositories, &path, &query)
            .await?;
        tracing::debug!(
            workspace,
            page,
            count = repos.as_value()["values"].as_array().map(Vec::len),
            "listed repositories"
        );
        Ok(repos)
    }

    /// Fetches a single repository.
    ///
    /// `GET /repositories/{workspace}/{repo_slug}`
    pub async fn get_repository(
        &self,
        workspace: &str,
        repo_slug: &str,
    ) -> Result<Document<Repository>, ApiError> {
        let path = format!("/repositories/{}/{}", workspace, repo_slug);
        self.get(Operation::GetRepository, &path, &[]).await
    }
}
