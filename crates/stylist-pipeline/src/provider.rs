pub(crate) mod openai;

use async_trait::async_trait;

use crate::{
    error::ProviderError,
    types::{GeneratedImage, ImageSpec, SuggestionQuery},
};

/// Upstream model access used by the pipeline
#[async_trait]
pub trait StyleProvider: Send + Sync {
    /// Ask the vision/chat model for free-text style suggestions
    async fn suggest(&self, query: &SuggestionQuery) -> Result<String, ProviderError>;

    /// Generate exactly one image
    async fn synthesize(&self, spec: &ImageSpec) -> Result<GeneratedImage, ProviderError>;

    /// Whether an API credential is configured
    fn has_credentials(&self) -> bool;

    /// Get the provider name
    fn name(&self) -> &str;
}
