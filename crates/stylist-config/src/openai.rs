use std::time::Duration;

use secrecy::SecretString;
use serde::Deserialize;
use url::Url;

/// `OpenAI` API access shared by the suggestion and synthesis steps
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OpenAiConfig {
    /// API key; requests fail with a fixed message when absent
    #[serde(default)]
    pub api_key: Option<SecretString>,
    /// Base URL override (e.g. a compatible gateway)
    #[serde(default)]
    pub base_url: Option<Url>,
    /// Vision-capable chat model used to write suggestions
    #[serde(default = "default_chat_model")]
    pub chat_model: String,
    /// Image model used for synthesis
    #[serde(default = "default_image_model")]
    pub image_model: String,
    /// Completion token budget for the suggestion step
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    /// Per-call timeout applied by the HTTP client
    #[serde(default = "default_request_timeout", deserialize_with = "crate::duration::deserialize")]
    pub request_timeout: Duration,
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: None,
            chat_model: default_chat_model(),
            image_model: default_image_model(),
            max_tokens: default_max_tokens(),
            request_timeout: default_request_timeout(),
        }
    }
}

fn default_chat_model() -> String {
    "gpt-4o".to_string()
}

fn default_image_model() -> String {
    "dall-e-3".to_string()
}

#[allow(clippy::missing_const_for_fn)]
fn default_max_tokens() -> u32 {
    500
}

#[allow(clippy::missing_const_for_fn)]
fn default_request_timeout() -> Duration {
    Duration::from_secs(120)
}
