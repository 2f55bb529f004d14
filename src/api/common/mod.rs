//
//  bitbucket-mcp-server
//  api/common/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Common API Types
//!
//! Shared building blocks for the Bitbucket Cloud resources:
//!
//! - [`ApiError`] - the single error type every client operation returns
//! - [`Document`] - an upstream body kept exactly as received (re-exported from [`document`])
//! - [`Operation`] - which client operation a failure belongs to
//! - [`Link`] - HATEOAS-style link representation
//! - [`UserRef`] - lightweight user reference embedded in pull requests and issues
//! - [`PaginatedResponse`] - the Cloud pagination envelope (re-exported from [`pagination`])
//!
//! # Example
//!
//! ```rust
//! use bitbucket_mcp_server::api::common::{ApiError, Operation};
//!
//! fn describe(result: Result<(), ApiError>) -> String {
//!     match result {
//!         Ok(()) => "ok".to_string(),
//!         Err(ApiError::AuthNotConfigured) => "set credentials first".to_string(),
//!         Err(e) => e.to_string(),
//!     }
//! }
//!
//! assert_eq!(Operation::ListIssues.to_string(), "list issues");
//! ```
//!
//! # Notes
//!
//! - Resource types are read-only views. Tool output is always the raw
//!   [`Document`], never a re-serialized view.

use std::fmt;

use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

mod document;
mod pagination;

pub use document::*;
pub use pagination::*;

/// Message reported when a write operation is attempted without credentials.
pub const AUTH_NOT_CONFIGURED_MESSAGE: &str = "Bitbucket authentication not configured. \
     Set BITBUCKET_USERNAME and BITBUCKET_APP_PASSWORD environment variables.";

/// Identifies the client operation a request was made for.
///
/// The [`Display`](fmt::Display) form is the verb phrase used in error
/// messages, e.g. `Failed to list pull requests: ...`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// `GET /repositories/{workspace}`
    ListRepositories,
    /// `GET /repositories/{workspace}/{repo_slug}`
    GetRepository,
    /// `GET /repositories/{workspace}/{repo_slug}/pullrequests`
    ListPullRequests,
    /// `GET /repositories/{workspace}/{repo_slug}/pullrequests/{id}`
    GetPullRequest,
    /// `GET /repositories/{workspace}/{repo_slug}/issues`
    ListIssues,
    /// `POST /repositories/{workspace}/{repo_slug}/pullrequests`
    CreatePullRequest,
}

impl Operation {
    /// Human-readable verb phrase for this operation.
    pub fn verb_phrase(self) -> &'static str {
        match self {
            Self::ListRepositories => "list repositories",
            Self::GetRepository => "get repository",
            Self::ListPullRequests => "list pull requests",
            Self::GetPullRequest => "get pull request",
            Self::ListIssues => "list issues",
            Self::CreatePullRequest => "create pull request",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.verb_phrase())
    }
}

/// Error type for all Bitbucket API operations.
///
/// | Variant | Raised when | Network call made |
/// |---------|-------------|-------------------|
/// | `AuthNotConfigured` | a write operation runs without credentials | no |
/// | `Upstream` | Bitbucket answered with a non-2xx status | yes |
/// | `Transport` | the request could not be sent or the body could not be decoded | maybe |
///
/// Both request-level variants render as `Failed to <operation>: <message>`.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Credentials are required for this operation but none were configured.
    #[error("{}", AUTH_NOT_CONFIGURED_MESSAGE)]
    AuthNotConfigured,

    /// Bitbucket returned a non-success status code.
    ///
    /// `message` is the `error.message` field of the Bitbucket error envelope
    /// when the body carries one, and a generic status line otherwise.
    #[error("Failed to {operation}: {message}")]
    Upstream {
        /// The operation that failed.
        operation: Operation,
        /// The HTTP status returned by Bitbucket.
        status: StatusCode,
        /// Message extracted from the error body.
        message: String,
    },

    /// Connection failures, timeouts and malformed response bodies.
    #[error("Failed to {operation}: {source}")]
    Transport {
        /// The operation that failed.
        operation: Operation,
        /// The underlying reqwest error.
        source: reqwest::Error,
    },
}

impl ApiError {
    /// Builds an [`ApiError::Upstream`] from a failed response body.
    ///
    /// Bitbucket Cloud reports errors as
    /// `{"type": "error", "error": {"message": "..."}}`. When the body does not
    /// follow that shape the message falls back to the status code.
    pub fn from_response(operation: Operation, status: StatusCode, body: &str) -> Self {
        let message = serde_json::from_str::<Value>(body)
            .ok()
            .and_then(|json| {
                json.get("error")
                    .and_then(|e| e.get("message"))
                    .and_then(Value::as_str)
                    .filter(|m| !m.is_empty())
                    .map(str::to_string)
            })
            .unwrap_or_else(|| format!("Request failed with status code {}", status.as_u16()));

        Self::Upstream {
            operation,
            status,
            message,
        }
    }

    /// The operation the error belongs to, if it came from a request.
    pub fn operation(&self) -> Option<Operation> {
        match self {
            Self::AuthNotConfigured => None,
            Self::Upstream { operation, .. } | Self::Transport { operation, .. } => {
                Some(*operation)
            }
        }
    }

    /// The upstream HTTP status, if Bitbucket answered at all.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Upstream { status, .. } => Some(*status),
            Self::Transport { source, .. } => source.status(),
            Self::AuthNotConfigured => None,
        }
    }
}

/// HATEOAS-style link.
///
/// Common names for clone links are `https` and `ssh`; `html` links carry no
/// name.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Link {
    /// The URL of the linked resource.
    pub href: String,

    /// Optional descriptive name for the link.
    #[serde(default)]
    pub name: Option<String>,
}

/// Links block carrying the canonical web page of a resource.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct HtmlLinks {
    /// Browser URL of the resource.
    pub html: Link,
}

/// Lightweight user reference.
///
/// Used for pull request authors and issue reporters/assignees.
///
/// ```rust
/// use bitbucket_mcp_server::api::common::UserRef;
///
/// let json = r#"{
///     "display_name": "Jane Doe",
///     "uuid": "{d6f7a1c2-0000-0000-0000-000000000000}",
///     "nickname": "jdoe"
/// }"#;
///
/// let user: UserRef = serde_json::from_str(json).unwrap();
/// assert_eq!(user.display_name, "Jane Doe");
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct UserRef {
    /// Display name as configured in the user's profile.
    pub display_name: String,

    /// UUID identifier, with curly braces as returned by Bitbucket.
    #[serde(default)]
    pub uuid: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operation_verb_phrases() {
        assert_eq!(Operation::ListRepositories.to_string(), "list repositories");
        assert_eq!(Operation::GetRepository.to_string(), "get repository");
        assert_eq!(Operation::ListPullRequests.to_string(), "list pull requests");
        assert_eq!(Operation::GetPullRequest.to_string(), "get pull request");
        assert_eq!(Operation::ListIssues.to_string(), "list issues");
        assert_eq!(Operation::CreatePullRequest.to_string(), "create pull request");
    }

    #[test]
    fn test_from_response_extracts_nested_message() {
        let body = r#"{"type": "error", "error": {"message": "Repository not found"}}"#;
        let err = ApiError::from_response(Operation::GetRepository, StatusCode::NOT_FOUND, body);

        assert_eq!(err.to_string(), "Failed to get repository: Repository not found");
        assert_eq!(err.status(), Some(StatusCode::NOT_FOUND));
        assert_eq!(err.operation(), Some(Operation::GetRepository));
    }

    #[test]
    fn test_from_response_falls_back_to_status_line() {
        let err = ApiError::from_response(
            Operation::ListIssues,
            StatusCode::BAD_GATEWAY,
            "<html>Bad Gateway</html>",
        );
        assert_eq!(
            err.to_string(),
            "Failed to list issues: Request failed with status code 502"
        );

        let err = ApiError::from_response(
            Operation::ListIssues,
            StatusCode::FORBIDDEN,
            r#"{"errors": [{"message": "server format"}]}"#,
        );
        assert_eq!(
            err.to_string(),
            "Failed to list issues: Request failed with status code 403"
        );
    }

    #[test]
    fn test_auth_not_configured_message() {
        let err = ApiError::AuthNotConfigured;
        assert_eq!(
            err.to_string(),
            "Bitbucket authentication not configured. Set BITBUCKET_USERNAME and \
             BITBUCKET_APP_PASSWORD environment variables."
        );
        assert!(err.operation().is_none());
        assert!(err.status().is_none());
    }

    #[test]
    fn test_user_ref_ignores_unmodelled_fields() {
        let json = serde_json::json!({
            "type": "user",
            "account_id": "557058:1234",
            "display_name": "Jane Doe"
        });
        let user: UserRef = serde_json::from_value(json).unwrap();
        assert_eq!(user.display_name, "Jane Doe");
        assert!(user.uuid.is_none());
    }
}
