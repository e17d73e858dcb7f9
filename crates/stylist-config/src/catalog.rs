use serde::Deserialize;
use url::Url;

/// Trending styles catalog configuration
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CatalogConfig {
    /// Styles loaded into the catalog at startup
    #[serde(default)]
    pub styles: Vec<CatalogSeed>,
}

/// A trending style declared in the config file
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CatalogSeed {
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Public URL of the style photo
    pub image_path: Url,
}
