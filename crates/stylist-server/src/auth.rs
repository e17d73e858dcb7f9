use std::sync::Arc;

use axum::extract::Request;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use http::{Method, StatusCode};
use jwt_compact::{
    AlgorithmExt, TimeOptions, UntrustedToken,
    alg::{Hs256, Hs256Key},
};
use secrecy::{ExposeSecret, SecretString};
use stylist_config::AuthConfig;
use stylist_core::{Authentication, SessionClaims, SessionToken};

/// Verifies session tokens signed with the auth provider's shared secret
#[derive(Clone)]
pub struct SessionVerifier {
    key: Arc<Hs256Key>,
    public_paths: Vec<String>,
}

impl SessionVerifier {
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            key: Arc::new(Hs256Key::new(config.jwt_secret.expose_secret().as_bytes())),
            public_paths: config.public_paths.clone(),
        }
    }

    /// A public path covers itself and anything nested below it
    fn is_public(&self, path: &str) -> bool {
        self.public_paths.iter().any(|public| {
            path.strip_prefix(public.as_str())
                .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
        })
    }

    /// Check signature, then expiry when the token carries one
    fn verify(&self, raw: &str) -> Result<SessionToken, String> {
        let untrusted = UntrustedToken::new(raw).map_err(|e| format!("malformed token: {e}"))?;

        let token = Hs256
            .validator::<SessionClaims>(self.key.as_ref())
            .validate(&untrusted)
            .map_err(|e| format!("invalid signature: {e}"))?;

        if token.claims().expiration.is_some() {
            token
                .claims()
                .validate_expiration(&TimeOptions::default())
                .map_err(|e| format!("expired token: {e}"))?;
        }

        Ok(SessionToken {
            raw: SecretString::from(raw.to_owned()),
            token,
        })
    }
}

/// Require a valid bearer session on non-public paths
///
/// Preflight requests pass through untouched so the CORS layer can answer
/// them.
pub async fn auth_middleware(verifier: SessionVerifier, request: Request, next: Next) -> Response {
    if *request.method() == Method::OPTIONS || verifier.is_public(request.uri().path()) {
        return next.run(request).await;
    }

    let token = request
        .headers()
        .get(http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "));

    let Some(token) = token else {
        return unauthorized("Missing bearer token");
    };

    match verifier.verify(token.trim()) {
        Ok(session) => {
            tracing::debug!(subject = session.claims().subject.as_deref().unwrap_or("<none>"), "session verified");

            let mut request = request;
            request.extensions_mut().insert(Authentication { session: Some(session) });
            next.run(request).await
        }
        Err(reason) => {
            tracing::warn!(%reason, "session authentication failed");
            unauthorized("Invalid bearer token")
        }
    }
}

fn unauthorized(message: &str) -> Response {
    (StatusCode::UNAUTHORIZED, axum::Json(serde_json::json!({ "error": message }))).into_response()
}
