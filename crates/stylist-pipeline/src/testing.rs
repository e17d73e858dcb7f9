//! Scripted collaborators for pipeline unit tests

use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU32, Ordering};

use async_trait::async_trait;
use url::Url;

use crate::{
    error::ProviderError,
    intake::ReferenceProbe,
    provider::StyleProvider,
    types::{GeneratedImage, ImageSpec, SuggestionQuery},
};

pub fn rate_limited() -> ProviderError {
    ProviderError::RateLimited {
        message: "Rate limit exceeded".into(),
        details: None,
    }
}

pub fn server_error() -> ProviderError {
    ProviderError::Api {
        status: 500,
        message: "The server had an error".into(),
        details: None,
    }
}

/// Provider whose image calls fail according to a queue, then succeed
pub struct ScriptedProvider {
    completion: Mutex<Option<Result<String, ProviderError>>>,
    image_errors: Mutex<VecDeque<ProviderError>>,
    credentials: bool,
    suggest_calls: AtomicU32,
    synthesize_calls: AtomicU32,
}

impl ScriptedProvider {
    pub fn new() -> Self {
        Self {
            completion: Mutex::new(None),
            image_errors: Mutex::new(VecDeque::new()),
            credentials: true,
            suggest_calls: AtomicU32::new(0),
            synthesize_calls: AtomicU32::new(0),
        }
    }

    /// Answer the suggestion call with `text`
    pub fn with_completion(self, text: &str) -> Self {
        *self.completion.lock().unwrap() = Some(Ok(text.to_owned()));
        self
    }

    /// Fail the suggestion call with `error`
    pub fn with_completion_error(self, error: ProviderError) -> Self {
        *self.completion.lock().unwrap() = Some(Err(error));
        self
    }

    /// Fail the next image calls with these errors, in order
    pub fn then_image_errors(self, errors: impl IntoIterator<Item = ProviderError>) -> Self {
        self.image_errors.lock().unwrap().extend(errors);
        self
    }

    pub fn without_credentials(mut self) -> Self {
        self.credentials = false;
        self
    }

    pub fn suggest_calls(&self) -> u32 {
        self.suggest_calls.load(Ordering::SeqCst)
    }

    pub fn synthesize_calls(&self) -> u32 {
        self.synthesize_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl StyleProvider for ScriptedProvider {
    async fn suggest(&self, _query: &SuggestionQuery) -> Result<String, ProviderError> {
        self.suggest_calls.fetch_add(1, Ordering::SeqCst);

        self.completion
            .lock()
            .unwrap()
            .take()
            .unwrap_or_else(|| Ok("Buzz cut\nSide part\nCurly fringe\nLong layers\nSlick back".to_owned()))
    }

    async fn synthesize(&self, _spec: &ImageSpec) -> Result<GeneratedImage, ProviderError> {
        let call = self.synthesize_calls.fetch_add(1, Ordering::SeqCst) + 1;

        match self.image_errors.lock().unwrap().pop_front() {
            Some(error) => Err(error),
            None => Ok(GeneratedImage {
                url: format!("https://images.example.com/generated-{call}.png"),
            }),
        }
    }

    fn has_credentials(&self) -> bool {
        self.credentials
    }

    fn name(&self) -> &str {
        "scripted"
    }
}

/// Probe with a fixed answer that counts its calls
pub struct StaticProbe {
    result: Result<(), String>,
    calls: AtomicU32,
}

impl StaticProbe {
    pub fn reachable() -> Self {
        Self {
            result: Ok(()),
            calls: AtomicU32::new(0),
        }
    }

    pub fn unreachable(reason: &str) -> Self {
        Self {
            result: Err(reason.to_owned()),
            calls: AtomicU32::new(0),
        }
    }

    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ReferenceProbe for StaticProbe {
    async fn probe(&self, _url: &Url) -> Result<(), String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.result.clone()
    }
}
