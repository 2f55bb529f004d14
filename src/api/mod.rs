//
//  bitbucket-mcp-server
//  api/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # API Client Layer
//!
//! HTTP client for the Bitbucket Cloud REST API v2.0 at
//! `https://api.bitbucket.org/2.0`.
//!
//! ## Architecture
//!
//! - [`client`]: Core HTTP client with authentication and error normalization
//! - [`cloud`]: Resource types and the operations that fetch them
//! - [`common`]: Shared types (errors, documents, pagination, links, user references)
//!
//! ## Operations
//!
//! | Method | Auth required |
//! |--------|---------------|
//! | [`BitbucketClient::list_repositories`] | no |
//! | [`BitbucketClient::get_repository`] | no |
//! | [`BitbucketClient::list_pull_requests`] | no |
//! | [`BitbucketClient::get_pull_request`] | no |
//! | [`BitbucketClient::list_issues`] | no |
//! | [`BitbucketClient::create_pull_request`] | yes |
//!
//! Every successful call yields a [`Document`]: the response body exactly as
//! Bitbucket sent it, plus [`Document::parse`] for the typed view.
//!
//! ## Error Handling
//!
//! Every operation returns [`ApiError`]:
//!
//! - `AuthNotConfigured`: a write was attempted without credentials
//! - `Upstream`: Bitbucket answered with a non-2xx status
//! - `Transport`: the request failed or the body could not be decoded

/// Core HTTP client wrapper.
pub mod client;

/// Bitbucket Cloud resources.
pub mod cloud;

/// Types shared by all resources.
pub mod common;

pub use client::BitbucketClient;
pub use common::{ApiError, Document, Operation, PaginatedResponse};
