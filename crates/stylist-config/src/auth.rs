use secrecy::SecretString;
use serde::Deserialize;

/// Bearer token verification for session JWTs issued by the auth provider
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AuthConfig {
    /// Whether bearer verification is enforced
    #[serde(default)]
    pub enabled: bool,

    /// Shared HS256 secret used by the auth provider to sign session tokens
    pub jwt_secret: SecretString,

    /// Paths that skip authentication
    #[serde(default = "default_public_paths")]
    pub public_paths: Vec<String>,

    /// Claim holding the session role
    #[serde(default = "default_role_claim")]
    pub role_claim: String,

    /// Roles allowed to curate the trending styles catalog
    #[serde(default = "default_admin_roles")]
    pub admin_roles: Vec<String>,
}

fn default_public_paths() -> Vec<String> {
    vec!["/health".to_string(), "/trending-styles".to_string()]
}

fn default_role_claim() -> String {
    "role".to_string()
}

fn default_admin_roles() -> Vec<String> {
    vec!["authenticated".to_string()]
}
