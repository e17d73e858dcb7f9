//! Session tokens signed the way the auth provider signs them

use jwt_compact::{
    AlgorithmExt, Claims, Header,
    alg::{Hs256, Hs256Key},
};

pub const SECRET: &str = "integration-test-secret";

/// Sign a session token for `role` with the shared test secret
pub fn token_with_role(role: &str) -> String {
    sign(SECRET, role)
}

/// Sign a session token with an arbitrary secret
pub fn sign(secret: &str, role: &str) -> String {
    let claims = Claims::new(serde_json::json!({ "sub": "user-1", "role": role }));
    Hs256
        .token(&Header::empty(), &claims, &Hs256Key::new(secret.as_bytes()))
        .expect("sign session token")
}
