use serde::{Deserialize, Serialize};
use url::Url;

/// Body of `POST /generate-styles`
///
/// Both fields are optional at the wire level so that a missing prompt is
/// reported through the pipeline's own validation error.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationRequest {
    /// What the user wants from the new style
    #[serde(default)]
    pub prompt: Option<String>,
    /// Public URL of the uploaded reference photo
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

/// Successful generation response
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GenerationResponse {
    /// Generated image URLs in production order
    pub suggestions: Vec<String>,
}

/// One image produced by the synthesis step
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct GeneratedImage {
    pub url: String,
}

/// Input to the vision/chat suggestion call
#[derive(Debug, Clone)]
pub struct SuggestionQuery {
    /// Instruction text sent as the user message
    pub instruction: String,
    /// Reference photo attached as an image part
    pub reference: Option<Url>,
}

/// Input to a single image generation call
#[derive(Debug, Clone)]
pub struct ImageSpec {
    pub prompt: String,
    pub size: String,
    pub quality: String,
}

/// A suggestion that produced no image
#[derive(Debug, Clone, Serialize)]
pub struct SkippedSuggestion {
    /// Position in the suggestion list
    pub index: usize,
    pub suggestion: String,
    /// Failure kind (`rate_limited`, `transient`, `permanent`)
    pub kind: &'static str,
    pub reason: String,
    pub attempts: u32,
}
