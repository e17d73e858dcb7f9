use std::collections::HashMap;

use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Runtime context for a single HTTP request
///
/// Built by the server middleware and handed to feature handlers
#[derive(Debug, Clone)]
pub struct RequestContext {
    /// HTTP request parts (method, URI, headers, extensions)
    pub parts: http::request::Parts,
    /// Authentication state from bearer token validation
    pub authentication: Authentication,
}

impl RequestContext {
    /// Create a minimal context for non-HTTP use
    ///
    /// Contains empty headers and no session
    pub fn empty() -> Self {
        let (parts, ()) = http::Request::builder()
            .method(http::Method::GET)
            .uri("/")
            .body(())
            .expect("valid minimal request")
            .into_parts();

        Self {
            parts,
            authentication: Authentication::default(),
        }
    }

    /// Access request headers
    pub fn headers(&self) -> &http::HeaderMap {
        &self.parts.headers
    }

    /// Validated session, if the request carried one
    pub fn session(&self) -> Option<&SessionToken> {
        self.authentication.session.as_ref()
    }
}

/// Authentication state extracted from incoming requests
#[derive(Default, Clone, Debug)]
pub struct Authentication {
    /// Validated session token, if present
    pub session: Option<SessionToken>,
}

/// Validated session JWT with raw and parsed representations
#[derive(Clone, Debug)]
pub struct SessionToken {
    /// Raw token string
    pub raw: SecretString,
    /// Parsed and validated JWT
    pub token: jwt_compact::Token<SessionClaims>,
}

impl SessionToken {
    /// Custom claims carried by the token
    pub fn claims(&self) -> &SessionClaims {
        &self.token.claims().custom
    }
}

impl std::ops::Deref for SessionToken {
    type Target = jwt_compact::Token<SessionClaims>;
    fn deref(&self) -> &Self::Target {
        &self.token
    }
}

/// Session claims issued by the auth provider
#[serde_with::serde_as]
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Subject (user id)
    #[serde(default, rename = "sub", skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    /// Audience (single value or array)
    #[serde_as(deserialize_as = "Option<serde_with::OneOrMany<_>>")]
    #[serde(default, rename = "aud", skip_serializing_if = "Option::is_none")]
    pub audience: Option<Vec<String>>,
    /// Additional claims such as `role` or `email`
    #[serde(flatten)]
    pub additional: HashMap<String, Value>,
}

impl SessionClaims {
    /// Extract a claim value by path, supporting nested claims
    ///
    /// Paths can be simple (e.g. "role") or nested (e.g. "app_metadata.role").
    #[must_use]
    pub fn get_claim(&self, path: &str) -> Option<String> {
        match path {
            "sub" => return self.subject.clone(),
            "aud" => return self.audience.as_ref().and_then(|aud| aud.first().cloned()),
            _ => {}
        }

        let mut segments = path.split('.');
        let first = segments.next()?;
        let value = segments.try_fold(self.additional.get(first)?, |current, segment| current.get(segment))?;

        match value {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }
}
