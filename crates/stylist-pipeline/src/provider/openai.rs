use async_trait::async_trait;
use reqwest::{Client, Response};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use stylist_config::OpenAiConfig;
use url::Url;

use super::StyleProvider;
use crate::{
    error::ProviderError,
    types::{GeneratedImage, ImageSpec, SuggestionQuery},
};

/// Default `OpenAI` API base URL
const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// `OpenAI` chat completion and image generation client
pub(crate) struct OpenAiProvider {
    client: Client,
    api_key: Option<SecretString>,
    base_url: String,
    chat_model: String,
    image_model: String,
    max_tokens: u32,
}

impl OpenAiProvider {
    /// Build the provider and its HTTP client from configuration
    pub fn new(config: &OpenAiConfig) -> reqwest::Result<Self> {
        let client = Client::builder().timeout(config.request_timeout).build()?;
        let base_url = config
            .base_url
            .as_ref()
            .map_or(DEFAULT_BASE_URL, Url::as_str)
            .trim_end_matches('/')
            .to_owned();

        Ok(Self {
            client,
            api_key: config
                .api_key
                .clone()
                .filter(|key| !key.expose_secret().trim().is_empty()),
            base_url,
            chat_model: config.chat_model.clone(),
            image_model: config.image_model.clone(),
            max_tokens: config.max_tokens,
        })
    }

    async fn post<T: Serialize + Sync>(&self, path: &str, body: &T) -> Result<Response, ProviderError> {
        let Some(api_key) = &self.api_key else {
            return Err(ProviderError::Unauthorized {
                message: "OpenAI API key not configured".to_string(),
                details: None,
            });
        };

        let url = format!("{}/{path}", self.base_url);

        let response = self
            .client
            .post(&url)
            .bearer_auth(api_key.expose_secret())
            .json(body)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(%url, error = %e, "OpenAI request failed");
                if e.is_timeout() {
                    ProviderError::Connection(format!("request to {path} timed out"))
                } else {
                    ProviderError::Connection(e.to_string())
                }
            })?;

        if response.status().is_success() {
            Ok(response)
        } else {
            Err(error_from_response(response).await)
        }
    }
}

/// Map a non-success response to a provider error, keeping the payload
async fn error_from_response(response: Response) -> ProviderError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    let details = serde_json::from_str::<Value>(&body).ok();

    let message = details
        .as_ref()
        .and_then(|d| d.pointer("/error/message"))
        .and_then(Value::as_str)
        .map(ToOwned::to_owned)
        .or_else(|| (!body.trim().is_empty()).then(|| body.trim().to_owned()))
        .unwrap_or_else(|| status.canonical_reason().unwrap_or("unknown error").to_owned());

    tracing::warn!(status = %status, %message, "OpenAI API error");

    match status.as_u16() {
        429 => ProviderError::RateLimited { message, details },
        401 | 403 => ProviderError::Unauthorized { message, details },
        code => ProviderError::Api {
            status: code,
            message,
            details,
        },
    }
}

// -- Wire types --

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: Vec<ContentPart<'a>>,
}

#[derive(Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentPart<'a> {
    Text { text: &'a str },
    ImageUrl { image_url: ImageUrlPart<'a> },
}

#[derive(Serialize)]
struct ImageUrlPart<'a> {
    url: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Deserialize)]
struct ChatResponseMessage {
    content: Option<String>,
}

#[derive(Serialize)]
struct ImageRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    n: u32,
    size: &'a str,
    quality: &'a str,
}

#[derive(Deserialize)]
struct ImageResponse {
    data: Vec<ImageData>,
}

#[derive(Deserialize)]
struct ImageData {
    url: Option<String>,
}

#[async_trait]
impl StyleProvider for OpenAiProvider {
    async fn suggest(&self, query: &SuggestionQuery) -> Result<String, ProviderError> {
        let mut content = vec![ContentPart::Text {
            text: &query.instruction,
        }];
        if let Some(reference) = &query.reference {
            content.push(ContentPart::ImageUrl {
                image_url: ImageUrlPart {
                    url: reference.as_str(),
                },
            });
        }

        let request = ChatRequest {
            model: &self.chat_model,
            messages: vec![ChatMessage { role: "user", content }],
            max_tokens: self.max_tokens,
        };

        tracing::debug!(model = %self.chat_model, with_reference = query.reference.is_some(), "requesting style suggestions");

        let response: ChatResponse = self
            .post("chat/completions", &request)
            .await?
            .json()
            .await
            .map_err(|e| ProviderError::InvalidResponse(format!("chat completion: {e}")))?;

        response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| ProviderError::InvalidResponse("chat completion had no content".to_string()))
    }

    async fn synthesize(&self, spec: &ImageSpec) -> Result<GeneratedImage, ProviderError> {
        let request = ImageRequest {
            model: &self.image_model,
            prompt: &spec.prompt,
            n: 1,
            size: &spec.size,
            quality: &spec.quality,
        };

        tracing::debug!(model = %self.image_model, "sending image generation request");

        let response: ImageResponse = self
            .post("images/generations", &request)
            .await?
            .json()
            .await
            .map_err(|e| ProviderError::InvalidResponse(format!("image generation: {e}")))?;

        response
            .data
            .into_iter()
            .find_map(|d| d.url)
            .map(|url| GeneratedImage { url })
            .ok_or_else(|| ProviderError::InvalidResponse("no images generated".to_string()))
    }

    fn has_credentials(&self) -> bool {
        self.api_key.is_some()
    }

    fn name(&self) -> &str {
        "openai"
    }
}
