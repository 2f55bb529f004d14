//
//  bitbucket-mcp-server
//  api/common/document.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Upstream JSON documents.
//!
//! Every client operation returns the response body exactly as Bitbucket sent
//! it: same keys, same key order, same nulls and empty arrays. The type
//! parameter names the resource the document describes and lets callers
//! decode a typed view when they need one.
//!
//! ```rust
//! use bitbucket_mcp_server::api::cloud::Repository;
//! use bitbucket_mcp_server::api::common::Document;
//! use serde_json::json;
//!
//! let doc: Document<Repository> = Document::new(json!({
//!     "type": "repository",
//!     "full_name": "acme/web",
//!     "is_private": true
//! }));
//!
//! // The raw body is untouched
//! assert_eq!(doc.as_value()["type"], "repository");
//!
//! // The typed view picks out the modelled fields
//! let repo = doc.parse().unwrap();
//! assert_eq!(repo.full_name, "acme/web");
//! ```

use std::fmt;
use std::marker::PhantomData;

use serde::de::DeserializeOwned;
use serde_json::Value;

/// A JSON body as received from Bitbucket, describing a `T`.
pub struct Document<T> {
    raw: Value,
    resource: PhantomData<fn() -> T>,
}

impl<T> Document<T> {
    /// Wraps a decoded response body.
    pub fn new(raw: Value) -> Self {
        Self {
            raw,
            resource: PhantomData,
        }
    }

    /// The body as received.
    pub fn as_value(&self) -> &Value {
        &self.raw
    }

    /// Consumes the document, returning the body as received.
    pub fn into_value(self) -> Value {
        self.raw
    }
}

impl<T: DeserializeOwned> Document<T> {
    /// Decodes the typed view of the document.
    ///
    /// Fails when the body does not fit the model, for example a pull request
    /// in a state other than `OPEN`, `MERGED` or `DECLINED`. The raw body is
    /// unaffected either way.
    pub fn parse(&self) -> serde_json::Result<T> {
        T::deserialize(&self.raw)
    }
}

impl<T> Clone for Document<T> {
    fn clone(&self) -> Self {
        Self::new(self.raw.clone())
    }
}

impl<T> fmt::Debug for Document<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Document").field(&self.raw).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::cloud::{Issue, PullRequest};
    use serde_json::json;

    #[test]
    fn test_raw_body_keeps_key_order() {
        let body = json!({"type": "issue", "id": 1, "assignee": null, "links": {"self": {}, "html": {}}});
        let doc: Document<Issue> = Document::new(body.clone());

        assert_eq!(
            serde_json::to_string(doc.as_value()).unwrap(),
            serde_json::to_string(&body).unwrap()
        );
        let keys: Vec<&String> = doc.as_value().as_object().unwrap().keys().collect();
        assert_eq!(keys, ["type", "id", "assignee", "links"]);
    }

    #[test]
    fn test_view_failure_leaves_body_intact() {
        let body = json!({"id": 5, "state": "SUPERSEDED"});
        let doc: Document<PullRequest> = Document::new(body.clone());

        assert!(doc.parse().is_err());
        assert_eq!(doc.into_value(), body);
    }
}
