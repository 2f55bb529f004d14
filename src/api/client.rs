//
//  bitbucket-mcp-server
//  api/client.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # HTTP Client Wrapper for the Bitbucket Cloud API
//!
//! This module provides the HTTP client every resource operation goes
//! through. It owns the base URL, the optional credentials and the one place
//! where responses are checked and failures are turned into [`ApiError`]s.
//!
//! ## Features
//!
//! - Basic authentication applied to every request when configured
//! - Response bodies returned as received, key order included
//! - Uniform `Failed to <operation>: <message>` errors
//! - Custom User-Agent header
//!
//! The resource operations themselves live next to their types in
//! [`crate::api::cloud`].

use anyhow::Result;
use reqwest::{Client, RequestBuilder};
use serde::Serialize;
use serde_json::Value;

use crate::api::common::{ApiError, Document, Operation};
use crate::auth::AuthCredential;

/// Base URL of the Bitbucket Cloud REST API v2.0.
pub const CLOUD_API_URL: &str = "https://api.bitbucket.org/2.0";

/// Page size requested from every list endpoint.
pub const DEFAULT_PAGELEN: u32 = 10;

/// The HTTP client for the Bitbucket Cloud API.
///
/// The client is immutable once built: a reqwest connection pool, a base URL
/// and optional credentials. Share it by reference between concurrent calls.
///
/// # Creating a Client
///
/// ```rust,no_run
/// use bitbucket_mcp_server::api::BitbucketClient;
/// use bitbucket_mcp_server::auth::AuthCredential;
///
/// // Anonymous client, enough for public repositories
/// let client = BitbucketClient::cloud()?;
/// assert!(!client.is_authenticated());
///
/// // Authenticated client, required for creating pull requests
/// let client = BitbucketClient::cloud()?
///     .with_auth(AuthCredential::app_password("alice", "app-password"));
/// assert!(client.is_authenticated());
/// # Ok::<(), anyhow::Error>(())
/// ```
#[derive(Debug)]
pub struct BitbucketClient {
    /// The underlying HTTP client
    http: Client,
    /// Base URL without a trailing slash
    base_url: String,
    /// Optional authentication credentials
    auth: Option<AuthCredential>,
}

impl BitbucketClient {
    /// Creates a client targeting `https://api.bitbucket.org/2.0`.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client could not be created.
    pub fn cloud() -> Result<Self> {
        Self::with_base_url(CLOUD_API_URL)
    }

    /// Creates a client targeting another host with the Cloud path layout.
    ///
    /// Useful for pointing the client at a local mock server.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use bitbucket_mcp_server::api::BitbucketClient;
    ///
    /// let client = BitbucketClient::with_base_url("http://127.0.0.1:8080/")?;
    /// assert_eq!(client.base_url(), "http://127.0.0.1:8080");
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self> {
        let base_url = base_url.into().trim_end_matches('/').to_string();

        Ok(Self {
            http: Client::builder()
                .user_agent(format!("{}/{}", crate::APP_NAME, crate::VERSION))
                .build()?,
            base_url,
            auth: None,
        })
    }

    /// Sets the authentication credentials for this client.
    pub fn with_auth(mut self, auth: AuthCredential) -> Self {
        self.auth = Some(auth);
        self
    }

    /// Returns `true` when credentials are configured.
    pub fn is_authenticated(&self) -> bool {
        self.auth.is_some()
    }

    /// Returns the base URL requests are made against.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fails with [`ApiError::AuthNotConfigured`] when no credentials are set.
    ///
    /// Write operations call this before building their request so that no
    /// network traffic happens without credentials.
    pub(crate) fn require_auth(&self) -> Result<(), ApiError> {
        if self.auth.is_none() {
            return Err(ApiError::AuthNotConfigured);
        }
        Ok(())
    }

    /// Makes a GET request to `path` with the given query parameters.
    pub(crate) async fn get<T>(
        &self,
        operation: Operation,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<Document<T>, ApiError> {
        let url = format!("{}{}", self.base_url, path);
        let mut request = self.http.get(&url);
        if !query.is_empty() {
            request = request.query(query);
        }

        self.send(operation, request).await
    }

    /// Makes a POST request to `path` with a JSON body.
    pub(crate) async fn post<T, B: Serialize>(
        &self,
        operation: Operation,
        path: &str,
        body: &B,
    ) -> Result<Document<T>, ApiError> {
        let url = format!("{}{}", self.base_url, path);
        let request = self.http.post(&url).json(body);

        self.send(operation, request).await
    }

    /// Sends a request and normalizes every failure into an [`ApiError`].
    ///
    /// Non-2xx responses become [`ApiError::Upstream`]; connection failures
    /// and bodies that are not JSON become [`ApiError::Transport`]. A JSON body
    /// is never checked against a model here.
    async fn send<T>(
        &self,
        operation: Operation,
        request: RequestBuilder,
    ) -> Result<Document<T>, ApiError> {
        let request = match &self.auth {
            Some(auth) => auth.apply_to_request(request),
            None => request,
        };

        let transport = |source| ApiError::Transport { operation, source };

        let response = request.send().await.map_err(transport)?;
        let status = response.status();
        tracing::debug!(%operation, %status, url = %response.url(), "bitbucket response");

        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(ApiError::from_response(operation, status, &text));
        }

        let body: Value = response.json().await.map_err(transport)?;
        Ok(Document::new(body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;
    use serde_json::json;

    #[test]
    fn test_cloud_base_url() {
        let client = BitbucketClient::cloud().unwrap();
        assert_eq!(client.base_url(), "https://api.bitbucket.org/2.0");
        assert!(!client.is_authenticated());
    }

    #[test]
    fn test_require_auth() {
        let client = BitbucketClient::cloud().unwrap();
        assert!(matches!(client.require_auth(), Err(ApiError::AuthNotConfigured)));

        let client = client.with_auth(AuthCredential::app_password("alice", "s3cret"));
        assert!(client.require_auth().is_ok());
    }

    #[tokio::test]
    async fn test_get_applies_basic_auth() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/user")
            .match_header("authorization", "Basic YWxpY2U6czNjcmV0")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"ok": true}"#)
            .create_async()
            .await;

        let client = BitbucketClient::with_base_url(server.url())
            .unwrap()
            .with_auth(AuthCredential::app_password("alice", "s3cret"));
        let body = client
            .get::<Value>(Operation::GetRepository, "/user", &[])
            .await
            .unwrap();

        assert_eq!(body.into_value(), json!({"ok": true}));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_get_without_auth_sends_no_header() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/user")
            .match_header("authorization", Matcher::Missing)
            .with_status(200)
            .with_body("{}")
            .create_async()
            .await;

        let client = BitbucketClient::with_base_url(server.url()).unwrap();
        client
            .get::<Value>(Operation::GetRepository, "/user", &[])
            .await
            .unwrap();

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_upstream_error_uses_nested_message() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/repositories/acme/missing")
            .with_status(404)
            .with_header("content-type", "application/json")
            .with_body(r#"{"type": "error", "error": {"message": "Repository acme/missing not found"}}"#)
            .create_async()
            .await;

        let client = BitbucketClient::with_base_url(server.url()).unwrap();
        let err = client
            .get::<Value>(Operation::GetRepository, "/repositories/acme/missing", &[])
            .await
            .unwrap_err();

        assert_eq!(
            err.to_string(),
            "Failed to get repository: Repository acme/missing not found"
        );
        assert_eq!(err.status(), Some(reqwest::StatusCode::NOT_FOUND));
    }

    #[tokio::test]
    async fn test_body_is_returned_verbatim() {
        let mut server = mockito::Server::new_async().await;
        let body = r#"{"type":"repository","links":{"self":{"href":"s"},"clone":[]},"language":null,"full_name":"acme/web"}"#;
        server
            .mock("GET", "/repositories/acme/web")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(body)
            .create_async()
            .await;

        let client = BitbucketClient::with_base_url(server.url()).unwrap();
        let doc = client
            .get::<Value>(Operation::GetRepository, "/repositories/acme/web", &[])
            .await
            .unwrap();

        assert_eq!(serde_json::to_string(doc.as_value()).unwrap(), body);
    }

    #[tokio::test]
    async fn test_malformed_body_is_transport_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/repositories/acme")
            .with_status(200)
            .with_body("this is not json")
            .create_async()
            .await;

        let client = BitbucketClient::with_base_url(server.url()).unwrap();
        let err = client
            .get::<Value>(Operation::ListRepositories, "/repositories/acme", &[])
            .await
            .unwrap_err();

        assert!(matches!(err, ApiError::Transport { .. }));
        assert!(err
            .to_string()
            .starts_with("Failed to list repositories: error decoding response body"));
    }

    #[tokio::test]
    async fn test_connection_failure_is_transport_error() {
        let client = BitbucketClient::with_base_url("http://127.0.0.1:1").unwrap();
        let err = client
            .get::<Value>(Operation::ListIssues, "/repositories/acme/web/issues", &[])
            .await
            .unwrap_err();

        assert!(matches!(err, ApiError::Transport { .. }));
        assert!(err.to_string().starts_with("Failed to list issues: "));
    }
}
