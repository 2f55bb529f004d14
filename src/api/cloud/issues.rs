//
//  bitbucket-mcp-server
//  api/cloud/issues.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Cloud issue tracker types and operations.
//!
//! # Issue States
//!
//! * `new` - Newly created, not yet triaged
//! * `open` - Acknowledged and being worked on
//! * `resolved` - Fixed or addressed
//! * `on hold` - Temporarily paused
//! * `invalid` - Not a valid issue
//! * `duplicate` - Duplicate of another issue
//! * `wontfix` - Will not be fixed
//! * `closed` - Completed
//!
//! Unlike pull request states these are kept as plain strings: the filter is
//! forwarded to Bitbucket untouched and whatever state comes back is reported
//! as-is.
//!
//! # Notes
//!
//! - Issues must be enabled for the repository
//! - Issue numbers are sequential within each repository

use serde::Deserialize;

use crate::api::client::{BitbucketClient, DEFAULT_PAGELEN};
use crate::api::common::{ApiError, Document, HtmlLinks, Operation, PaginatedResponse, UserRef};

/// Issue states Bitbucket documents. Advisory only.
pub const ISSUE_STATES: [&str; 8] = [
    "new",
    "open",
    "resolved",
    "on hold",
    "invalid",
    "duplicate",
    "wontfix",
    "closed",
];

/// Typed view of an issue in a Bitbucket Cloud repository.
///
/// # Example
///
/// ```rust
/// use bitbucket_mcp_server::api::cloud::Issue;
///
/// fn display_issue(issue: &Issue) {
///     println!("#{}: {} [{}]", issue.id, issue.title, issue.state);
///     println!("  Priority: {} | Kind: {}", issue.priority, issue.kind);
///     if let Some(ref reporter) = issue.reporter {
///         println!("  Reporter: {}", reporter.display_name);
///     }
///     if let Some(ref assignee) = issue.assignee {
///         println!("  Assignee: {}", assignee.display_name);
///     }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Issue {
    /// Unique numeric identifier within the repository.
    pub id: u64,

    /// Short summary of the issue.
    pub title: String,

    /// Optional body in raw, markup and rendered form.
    #[serde(default)]
    pub content: Option<IssueContent>,

    /// Current state, e.g. `new` or `on hold`.
    pub state: String,

    /// Type of issue: `bug`, `enhancement`, `proposal`, `task`.
    pub kind: String,

    /// Priority: `trivial`, `minor`, `major`, `critical`, `blocker`.
    pub priority: String,

    /// ISO 8601 timestamp of creation.
    pub created_on: String,

    /// ISO 8601 timestamp of last update.
    pub updated_on: String,

    /// The user who created the issue. `null` for anonymous reports.
    #[serde(default)]
    pub reporter: Option<UserRef>,

    /// The user assigned to the issue. Bitbucket sends `null` when unassigned.
    #[serde(default)]
    pub assignee: Option<UserRef>,

    /// Canonical web link.
    pub links: HtmlLinks,
}

/// Issue body in its different representations.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct IssueContent {
    /// Text as typed by the author.
    #[serde(default)]
    pub raw: Option<String>,

    /// Markup language of `raw`, e.g. `markdown`.
    #[serde(default)]
    pub markup: Option<String>,

    /// Rendered HTML.
    #[serde(default)]
    pub html: Option<String>,
}

impl BitbucketClient {
    /// Lists issues of a repository, ten per page.
    ///
    /// The state filter is not validated locally.
    ///
    /// `GET /repositories/{workspace}/{repo_slug}/issues?pagelen=10[&state=...]`
    pub async fn list_issues(
        &self,
        workspace: &str,
        repo_slug: &str,
        state: Option<&str>,
    ) -> Result<Document<PaginatedResponse<Issue>>, ApiError> {
        let path = format!("/repositories/{}/{}/issues", workspace, repo_slug);
        let mut query = vec![("pagelen", DEFAULT_PAGELEN.to_string())];
        if let Some(state) = state.filter(|s| !s.is_empty()) {
            query.push(("state", state.to_string()));
        }

        self.get(Operation::ListIssues, &path, &query).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;
    use serde_json::{json, Value};

    fn sample_issue() -> Value {
        json!({
            "id": 7,
            "title": "Login button not responding",
            "content": {"raw": "Nothing happens", "markup": "markdown", "html": "<p>Nothing happens</p>", "type": "rendered"},
            "state": "on hold",
            "kind": "bug",
            "priority": "major",
            "created_on": "2025-02-01T00:00:00.000000+00:00",
            "updated_on": "2025-02-02T00:00:00.000000+00:00",
            "reporter": {"display_name": "Jane Doe", "uuid": "{jane}"},
            "assignee": null,
            "links": {"html": {"href": "https://bitbucket.org/acme/web/issues/7"}},
            "votes": 2
        })
    }

    #[test]
    fn test_issue_accepts_any_state() {
        let mut body = sample_issue();
        body["state"] = json!("somebody's custom state");
        let issue: Issue = serde_json::from_value(body).unwrap();
        assert_eq!(issue.state, "somebody's custom state");
    }

    #[test]
    fn test_anonymous_unassigned_issue() {
        let mut body = sample_issue();
        body["reporter"] = Value::Null;
        let issue: Issue = serde_json::from_value(body).unwrap();
        assert!(issue.reporter.is_none());
        assert!(issue.assignee.is_none());
        assert_eq!(issue.content.unwrap().markup.as_deref(), Some("markdown"));
    }

    #[tokio::test]
    async fn test_list_issues_forwards_free_form_state() {
        let mut server = mockito::Server::new_async().await;
        let body = json!({"values": [sample_issue()], "pagelen": 10, "page": 1, "size": 1});
        let mock = server
            .mock("GET", "/repositories/acme/web/issues")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("pagelen".into(), "10".into()),
                Matcher::UrlEncoded("state".into(), "on hold".into()),
            ]))
            .with_status(200)
            .with_body(body.to_string())
            .create_async()
            .await;

        let client = BitbucketClient::with_base_url(server.url()).unwrap();
        let page = client
            .list_issues("acme", "web", Some("on hold"))
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(
            serde_json::to_string(page.as_value()).unwrap(),
            serde_json::to_string(&body).unwrap()
        );
        assert_eq!(page.parse().unwrap().values[0].kind, "bug");
    }

    #[tokio::test]
    async fn test_list_issues_without_state() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/repositories/acme/web/issues")
            .match_query(Matcher::Exact("pagelen=10".into()))
            .with_status(200)
            .with_body(r#"{"values": []}"#)
            .create_async()
            .await;

        let client = BitbucketClient::with_base_url(server.url()).unwrap();
        client.list_issues("acme", "web", None).await.unwrap();

        mock.assert_async().await;
    }
}
