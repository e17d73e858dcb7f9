use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use url::Url;
use uuid::Uuid;

use crate::error::CatalogError;

/// A curated style shown on the public landing page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendingStyle {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    /// Public URL of the style photo
    pub image_path: String,
    pub created_at: Timestamp,
}

/// Body of a create request
#[derive(Debug, Clone, Deserialize)]
pub struct NewTrendingStyle {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image_path: String,
}

/// A create request that passed validation
#[derive(Debug, Clone)]
pub struct ValidStyle {
    pub title: String,
    pub description: String,
    pub image_path: Url,
}

impl NewTrendingStyle {
    /// Check required fields and the image URL
    pub fn validate(self) -> Result<ValidStyle, CatalogError> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(CatalogError::InvalidRequest("Title is required".to_string()));
        }

        let image_path = self.image_path.trim();
        if image_path.is_empty() {
            return Err(CatalogError::InvalidRequest("Image is required".to_string()));
        }

        let image_path = Url::parse(image_path)
            .map_err(|e| CatalogError::InvalidRequest(format!("Image path is not a valid URL: {e}")))?;

        Ok(ValidStyle {
            title: title.to_owned(),
            description: self.description.trim().to_owned(),
            image_path,
        })
    }
}

impl From<stylist_config::CatalogSeed> for ValidStyle {
    fn from(seed: stylist_config::CatalogSeed) -> Self {
        Self {
            title: seed.title,
            description: seed.description,
            image_path: seed.image_path,
        }
    }
}
