#![allow(
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::missing_const_for_fn,
    clippy::module_name_repetitions
)]

mod error;
mod intake;
mod pipeline;
mod provider;
mod suggest;
mod synthesis;
#[cfg(test)]
mod testing;
mod types;

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    routing::post,
};
use stylist_core::RequestContext;

pub use error::{FailureKind, GenerationError, ProviderError, Result};
pub use intake::{HttpReferenceProbe, ReferenceProbe, ValidatedRequest};
pub use pipeline::{Pipeline, PipelineBuilder};
pub use provider::StyleProvider;
pub use suggest::{LineParser, SuggestionParser};
pub use synthesis::{ImageOptions, RetryPolicy, SynthesisReport, synthesize_all};
pub use types::{GeneratedImage, GenerationRequest, GenerationResponse, ImageSpec, SkippedSuggestion, SuggestionQuery};

/// Build the generation pipeline from configuration
///
/// # Errors
///
/// Returns an error if an HTTP client fails to initialize
pub fn build_pipeline(config: &stylist_config::Config) -> anyhow::Result<Arc<Pipeline>> {
    let pipeline = PipelineBuilder::new(config)
        .build()
        .map_err(|e| anyhow::anyhow!("Failed to initialize generation pipeline: {e}"))?;

    Ok(Arc::new(pipeline))
}

/// Create the endpoint router for style generation
pub fn endpoint_router() -> Router<Arc<Pipeline>> {
    Router::new().route("/generate-styles", post(generate_styles))
}

/// Handle style generation requests
async fn generate_styles(
    State(pipeline): State<Arc<Pipeline>>,
    axum::Extension(context): axum::Extension<RequestContext>,
    body: std::result::Result<Json<GenerationRequest>, JsonRejection>,
) -> Result<Json<GenerationResponse>> {
    let Json(request) = body.map_err(|rejection| GenerationError::Validation(rejection.body_text()))?;

    tracing::debug!(
        authenticated = context.session().is_some(),
        with_reference = request.image_url.is_some(),
        "style generation handler called"
    );

    let response = pipeline.generate(request).await?;

    Ok(Json(response))
}
