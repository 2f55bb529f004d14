//
//  bitbucket-mcp-server
//  api/common/pagination.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Pagination envelope for Bitbucket Cloud list endpoints.
//!
//! Cloud list endpoints answer with a page object:
//!
//! ```json
//! {
//!     "values": [ ... ],
//!     "page": 1,
//!     "pagelen": 10,
//!     "size": 25,
//!     "next": "https://api.bitbucket.org/2.0/repositories/acme?page=2"
//! }
//! ```
//!
//! The client hands these pages back exactly as received, as a
//! [`Document`](super::Document): no filtering of `values`, no following of
//! `next`. [`PaginatedResponse`] is the typed view of such a page.

use serde::Deserialize;

/// A single page of results from a Bitbucket Cloud list endpoint.
///
/// # Example
///
/// ```rust
/// use bitbucket_mcp_server::api::common::PaginatedResponse;
/// use serde_json::Value;
///
/// let json = r#"{
///     "values": [{"slug": "repo1"}],
///     "page": 1,
///     "pagelen": 10,
///     "size": 25,
///     "next": "https://api.bitbucket.org/2.0/repositories/acme?page=2"
/// }"#;
///
/// let response: PaginatedResponse<Value> = serde_json::from_str(json).unwrap();
/// assert_eq!(response.values.len(), 1);
/// assert!(response.has_next());
/// ```
///
/// # Notes
///
/// - `size` may be omitted by Bitbucket on large result sets
/// - Page numbers are 1-indexed
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PaginatedResponse<T> {
    /// Items in the current page. May be empty.
    pub values: Vec<T>,

    /// Total number of items across all pages.
    #[serde(default)]
    pub size: Option<u64>,

    /// Current page number (1-indexed).
    #[serde(default)]
    pub page: Option<u32>,

    /// Maximum number of items per page.
    #[serde(default)]
    pub pagelen: Option<u32>,

    /// URL of the next page. `None` on the last page.
    #[serde(default)]
    pub next: Option<String>,

    /// URL of the previous page. `None` on the first page.
    #[serde(default)]
    pub previous: Option<String>,
}

impl<T> PaginatedResponse<T> {
    /// Returns `true` when Bitbucket advertised a further page.
    pub fn has_next(&self) -> bool {
        self.next.is_some()
    }
}
