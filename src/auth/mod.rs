//
//  bitbucket-mcp-server
//  auth/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Authentication
//!
//! Bitbucket Cloud accepts an account username paired with an app password
//! over HTTP Basic authentication. This module holds that pair and knows how
//! to attach it to an outgoing request.
//!
//! ## Example
//!
//! ```rust
//! use bitbucket_mcp_server::auth::AuthCredential;
//!
//! let credential = AuthCredential::from_parts(
//!     Some("alice".to_string()),
//!     Some("app-password".to_string()),
//! );
//! assert!(credential.is_some());
//!
//! // Either half missing means no credential at all.
//! assert!(AuthCredential::from_parts(Some("alice".to_string()), None).is_none());
//! ```

use std::fmt;

use reqwest::RequestBuilder;

/// Username and app password used for HTTP Basic authentication.
///
/// The password is never printed: the [`Debug`] implementation redacts it so
/// the credential can sit inside structures that get logged.
#[derive(Clone, PartialEq, Eq)]
pub struct AuthCredential {
    username: String,
    app_password: String,
}

impl AuthCredential {
    /// Creates a credential from a username and an app password.
    pub fn app_password(username: impl Into<String>, app_password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            app_password: app_password.into(),
        }
    }

    /// Builds a credential only when both halves are present and non-empty.
    ///
    /// This mirrors how the values arrive from the environment: an unset
    /// variable and an empty one both mean "not configured".
    ///
    /// # Example
    ///
    /// ```rust
    /// use bitbucket_mcp_server::auth::AuthCredential;
    ///
    /// assert!(AuthCredential::from_parts(Some("alice".into()), Some(String::new())).is_none());
    /// ```
    pub fn from_parts(username: Option<String>, app_password: Option<String>) -> Option<Self> {
        let username = username.filter(|u| !u.is_empty())?;
        let app_password = app_password.filter(|p| !p.is_empty())?;
        Some(Self::app_password(username, app_password))
    }

    /// The username half of the credential.
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Applies Basic authentication to the given request.
    pub fn apply_to_request(&self, request: RequestBuilder) -> RequestBuilder {
        request.basic_auth(&self.username, Some(&self.app_password))
    }
}

impl fmt::Debug for AuthCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthCredential")
            .field("username", &self.username)
            .field("app_password", &"********")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_parts_requires_both_values() {
        assert!(AuthCredential::from_parts(None, None).is_none());
        assert!(AuthCredential::from_parts(Some("alice".into()), None).is_none());
        assert!(AuthCredential::from_parts(None, Some("secret".into())).is_none());
        assert!(AuthCredential::from_parts(Some(String::new()), Some("secret".into())).is_none());

        let credential =
            AuthCredential::from_parts(Some("alice".into()), Some("secret".into())).unwrap();
        assert_eq!(credential.username(), "alice");
    }

    #[test]
    fn test_debug_redacts_password() {
        let credential = AuthCredential::app_password("alice", "hunter2");
        let printed = format!("{:?}", credential);
        assert!(printed.contains("alice"));
        assert!(!printed.contains("hunter2"));
    }

    #[test]
    fn test_apply_to_request_sets_basic_header() {
        let credential = AuthCredential::app_password("alice", "s3cret");
        let request = credential
            .apply_to_request(reqwest::Client::new().get("https://api.bitbucket.org/2.0/user"))
            .build()
            .unwrap();

        let header = request.headers().get(reqwest::header::AUTHORIZATION).unwrap();
        assert_eq!(header, "Basic YWxpY2U6czNjcmV0");
    }
}
