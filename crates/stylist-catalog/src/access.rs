use stylist_config::AuthConfig;
use stylist_core::RequestContext;

use crate::error::CatalogError;

/// Who may curate the catalog
#[derive(Debug, Clone, Default)]
pub struct AdminPolicy {
    enabled: bool,
    role_claim: String,
    admin_roles: Vec<String>,
}

impl AdminPolicy {
    pub fn from_config(auth: Option<&AuthConfig>) -> Self {
        match auth {
            Some(auth) if auth.enabled => Self {
                enabled: true,
                role_claim: auth.role_claim.clone(),
                admin_roles: auth.admin_roles.clone(),
            },
            _ => Self::default(),
        }
    }

    /// Require a verified session whose role is an admin role
    ///
    /// Without session verification there is no way to tell admins apart,
    /// so every request is refused.
    pub fn authorize(&self, context: &RequestContext) -> Result<(), CatalogError> {
        if !self.enabled {
            return Err(CatalogError::Unauthorized);
        }

        let session = context.session().ok_or(CatalogError::Unauthorized)?;
        let role = session.claims().get_claim(&self.role_claim);

        match role {
            Some(role) if self.admin_roles.contains(&role) => Ok(()),
            _ => {
                tracing::debug!(role = role.as_deref().unwrap_or("<none>"), "admin role required");
                Err(CatalogError::Forbidden)
            }
        }
    }
}
