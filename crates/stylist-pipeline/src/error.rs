use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::Value;
use stylist_core::HttpError;
use thiserror::Error;

use crate::types::SkippedSuggestion;

pub type Result<T> = std::result::Result<T, GenerationError>;

/// How the synthesis loop treats a failed image call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Upstream throttling; retried up to the rate-limit budget
    RateLimited,
    /// Server-side or network failure; retried once more
    Transient,
    /// Rejected request or unusable response; skipped without retry
    Permanent,
    /// Credential failure; aborts the whole request
    Fatal,
}

impl FailureKind {
    /// Short label used in logs and metrics
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::RateLimited => "rate_limited",
            Self::Transient => "transient",
            Self::Permanent => "permanent",
            Self::Fatal => "fatal",
        }
    }
}

/// Failure reported by an upstream provider call
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Upstream returned 429
    #[error("rate limited by provider: {message}")]
    RateLimited { message: String, details: Option<Value> },

    /// Upstream rejected the API credential
    #[error("provider authentication failed: {message}")]
    Unauthorized { message: String, details: Option<Value> },

    /// Any other non-success status
    #[error("provider API error ({status}): {message}")]
    Api {
        status: u16,
        message: String,
        details: Option<Value>,
    },

    /// Network failure or timeout before a response arrived
    #[error("connection error: {0}")]
    Connection(String),

    /// Response arrived but could not be used
    #[error("invalid provider response: {0}")]
    InvalidResponse(String),
}

impl ProviderError {
    /// Classify the failure for the retry policy
    pub const fn kind(&self) -> FailureKind {
        match self {
            Self::RateLimited { .. } => FailureKind::RateLimited,
            Self::Unauthorized { .. } => FailureKind::Fatal,
            Self::Api { status, .. } if *status >= 500 || *status == 408 => FailureKind::Transient,
            Self::Connection(_) => FailureKind::Transient,
            Self::Api { .. } | Self::InvalidResponse(_) => FailureKind::Permanent,
        }
    }

    /// Upstream error payload, when the provider sent one
    pub fn details(&self) -> Option<&Value> {
        match self {
            Self::RateLimited { details, .. } | Self::Unauthorized { details, .. } | Self::Api { details, .. } => {
                details.as_ref()
            }
            Self::Connection(_) | Self::InvalidResponse(_) => None,
        }
    }
}

/// Errors surfaced by a generation request
#[derive(Debug, Error)]
pub enum GenerationError {
    /// Missing prompt or malformed request body
    #[error("{0}")]
    Validation(String),

    /// The supplied reference image could not be fetched
    #[error("Reference image could not be fetched: {reason}")]
    ReferenceUnreachable { reason: String },

    /// No API key is configured for the provider
    #[error("OpenAI API key not configured")]
    MissingCredentials,

    /// The chat model answered without any usable suggestion lines
    #[error("No style suggestions were returned")]
    NoSuggestions,

    /// Upstream failure that aborts the request
    #[error(transparent)]
    Provider(#[from] ProviderError),

    /// Every suggestion failed synthesis
    #[error("Failed to generate any images")]
    NoImages { skipped: Vec<SkippedSuggestion> },

    /// The request ran past its deadline
    #[error("Generation deadline exceeded")]
    DeadlineExceeded,
}

impl GenerationError {
    /// Diagnostic payload returned under `details`
    pub fn details(&self) -> Option<Value> {
        match self {
            Self::Provider(e) => e.details().cloned(),
            Self::NoImages { skipped } => serde_json::to_value(skipped).ok(),
            _ => None,
        }
    }

    /// Terminal outcome label for metrics
    pub const fn outcome(&self) -> &'static str {
        match self {
            Self::Validation(_) | Self::ReferenceUnreachable { .. } => "failed_validation",
            Self::MissingCredentials | Self::NoSuggestions | Self::Provider(_) => "failed_upstream",
            Self::NoImages { .. } => "failed_no_images",
            Self::DeadlineExceeded => "deadline_exceeded",
        }
    }
}

impl HttpError for GenerationError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::ReferenceUnreachable { .. } => StatusCode::BAD_REQUEST,
            Self::MissingCredentials | Self::NoSuggestions | Self::Provider(_) | Self::NoImages { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            Self::DeadlineExceeded => StatusCode::GATEWAY_TIMEOUT,
        }
    }

    fn error_type(&self) -> &str {
        match self {
            Self::Validation(_) | Self::ReferenceUnreachable { .. } => "validation_error",
            Self::MissingCredentials => "configuration_error",
            Self::Provider(ProviderError::Unauthorized { .. }) => "upstream_auth_error",
            Self::NoSuggestions | Self::Provider(_) => "upstream_error",
            Self::NoImages { .. } => "generation_failed",
            Self::DeadlineExceeded => "deadline_exceeded",
        }
    }

    fn client_message(&self) -> String {
        match self {
            Self::Provider(ProviderError::Unauthorized { .. }) => "OpenAI API key was rejected".to_string(),
            _ => self.to_string(),
        }
    }
}

/// Error body returned to callers
#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<Value>,
}

impl IntoResponse for GenerationError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.client_message(),
            details: self.details(),
        };

        (self.status_code(), Json(body)).into_response()
    }
}
