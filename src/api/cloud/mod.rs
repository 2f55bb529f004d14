//
//  bitbucket-mcp-server
//  api/cloud/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Bitbucket Cloud API v2.0 resources.
//!
//! Each submodule holds the types for one resource together with the
//! [`BitbucketClient`](crate::api::BitbucketClient) methods that fetch them:
//!
//! - [`repositories`] - list and get repositories
//! - [`pullrequests`] - list, get and create pull requests
//! - [`issues`] - list issues
//!
//! # Notes
//!
//! - All timestamps are ISO 8601 strings, kept verbatim
//! - UUIDs are returned with curly braces (e.g., `{123e4567-e89b-...}`)

pub mod issues;
pub mod pullrequests;
pub mod repositories;

pub use issues::{Issue, IssueContent, ISSUE_STATES};
pub use pullrequests::{
    CreatePullRequestRequest, PullRequest, PullRequestState, DEFAULT_DESTINATION_BRANCH,
};
pub use repositories::{Repository, RepositoryLinks};
