use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use url::Url;

use crate::{
    error::{GenerationError, Result},
    types::GenerationRequest,
};

/// Request that passed intake validation
#[derive(Debug, Clone)]
pub struct ValidatedRequest {
    pub prompt: String,
    pub reference: Option<Url>,
}

/// Check the prompt and the shape of the reference URL
///
/// A blank `imageUrl` is treated as absent; anything else must be an
/// absolute http(s) URL.
pub fn validate(request: GenerationRequest) -> Result<ValidatedRequest> {
    let prompt = request
        .prompt
        .map(|p| p.trim().to_owned())
        .filter(|p| !p.is_empty())
        .ok_or_else(|| GenerationError::Validation("Prompt is required".to_string()))?;

    let reference = match request.image_url.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(raw) => Some(parse_reference(raw)?),
    };

    Ok(ValidatedRequest { prompt, reference })
}

fn parse_reference(raw: &str) -> Result<Url> {
    let url = Url::parse(raw).map_err(|e| GenerationError::Validation(format!("Invalid imageUrl: {e}")))?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        scheme => Err(GenerationError::Validation(format!(
            "Invalid imageUrl: unsupported scheme '{scheme}'"
        ))),
    }
}

/// Reachability check for the reference image
#[async_trait]
pub trait ReferenceProbe: Send + Sync {
    /// Succeeds when the image can be fetched; otherwise returns the reason
    async fn probe(&self, url: &Url) -> std::result::Result<(), String>;
}

/// Probe that issues a bounded GET against the reference URL
pub struct HttpReferenceProbe {
    client: Client,
}

impl HttpReferenceProbe {
    /// Create a probe whose requests give up after `timeout`
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed
    pub fn new(timeout: Duration) -> reqwest::Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl ReferenceProbe for HttpReferenceProbe {
    async fn probe(&self, url: &Url) -> std::result::Result<(), String> {
        let response = self.client.get(url.clone()).send().await.map_err(|e| {
            if e.is_timeout() {
                "request timed out".to_string()
            } else {
                e.to_string()
            }
        })?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(format!("server responded with {status}"))
        }
    }
}
