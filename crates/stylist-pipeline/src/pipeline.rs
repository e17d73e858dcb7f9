use std::sync::Arc;
use std::time::Duration;

use stylist_config::PipelineConfig;
use stylist_telemetry::PipelineMetrics;
use tokio::time::Instant;

use crate::{
    error::{GenerationError, Result},
    intake::{self, HttpReferenceProbe, ReferenceProbe},
    provider::{StyleProvider, openai::OpenAiProvider},
    suggest::{self, LineParser, SuggestionParser},
    synthesis::{self, ImageOptions, RetryPolicy, SynthesisReport},
    types::{GenerationRequest, GenerationResponse, SuggestionQuery},
};

/// Suggestion-to-image pipeline
///
/// Holds only per-process collaborators; every request runs with its own
/// counters and image list.
pub struct Pipeline {
    provider: Arc<dyn StyleProvider>,
    probe: Arc<dyn ReferenceProbe>,
    parser: Arc<dyn SuggestionParser>,
    policy: RetryPolicy,
    image_options: ImageOptions,
    suggestion_count: u32,
    deadline: Duration,
    metrics: PipelineMetrics,
}

impl Pipeline {
    /// Assemble a pipeline from its collaborators
    ///
    /// Uses the line-based suggestion parser; see [`Pipeline::with_parser`].
    pub fn new(provider: Arc<dyn StyleProvider>, probe: Arc<dyn ReferenceProbe>, config: &PipelineConfig) -> Self {
        Self {
            provider,
            probe,
            parser: Arc::new(LineParser),
            policy: RetryPolicy::from_config(config),
            image_options: ImageOptions {
                size: config.image_size.clone(),
                quality: config.image_quality.clone(),
            },
            suggestion_count: config.suggestion_count,
            deadline: config.request_deadline,
            metrics: PipelineMetrics::new(),
        }
    }

    /// Replace the suggestion parser
    #[must_use]
    pub fn with_parser(mut self, parser: Arc<dyn SuggestionParser>) -> Self {
        self.parser = parser;
        self
    }

    /// Run one generation request end to end
    ///
    /// The whole run is bounded by the configured deadline; when it
    /// elapses the in-flight upstream call is dropped.
    pub async fn generate(&self, request: GenerationRequest) -> Result<GenerationResponse> {
        let start = Instant::now();

        let result = tokio::time::timeout(self.deadline, self.run(request))
            .await
            .unwrap_or(Err(GenerationError::DeadlineExceeded));

        let outcome = match &result {
            Ok(_) => "succeeded",
            Err(e) => e.outcome(),
        };
        self.metrics.record_generation(start.into_std(), outcome);

        result
    }

    async fn run(&self, request: GenerationRequest) -> Result<GenerationResponse> {
        let request = intake::validate(request)?;

        if !self.provider.has_credentials() {
            tracing::error!(provider = self.provider.name(), "API key not configured");
            return Err(GenerationError::MissingCredentials);
        }

        if let Some(reference) = &request.reference {
            self.probe.probe(reference).await.map_err(|reason| {
                tracing::warn!(%reference, %reason, "reference image unreachable");
                GenerationError::ReferenceUnreachable { reason }
            })?;
        }

        let query = SuggestionQuery {
            instruction: suggest::instruction(&request.prompt, self.suggestion_count, request.reference.is_some()),
            reference: request.reference,
        };
        let suggestions = suggest::request_suggestions(self.provider.as_ref(), self.parser.as_ref(), &query).await?;

        let report = synthesis::synthesize_all(
            self.provider.as_ref(),
            &suggestions,
            &self.image_options,
            &self.policy,
            &self.metrics,
        )
        .await?;

        assemble(report)
    }
}

/// Builder for constructing the pipeline from configuration
pub struct PipelineBuilder<'a> {
    config: &'a stylist_config::Config,
}

impl<'a> PipelineBuilder<'a> {
    pub fn new(config: &'a stylist_config::Config) -> Self {
        Self { config }
    }

    pub fn build(self) -> reqwest::Result<Pipeline> {
        let provider = OpenAiProvider::new(&self.config.openai)?;
        if !provider.has_credentials() {
            tracing::warn!("no OpenAI API key configured; generation requests will fail");
        }

        let probe = HttpReferenceProbe::new(self.config.pipeline.reference_timeout)?;

        Ok(Pipeline::new(Arc::new(provider), Arc::new(probe), &self.config.pipeline))
    }
}

/// Turn the synthesis report into the response payload
fn assemble(report: SynthesisReport) -> Result<GenerationResponse> {
    if report.images.is_empty() {
        tracing::error!(skipped = report.skipped.len(), "no images were generated");
        return Err(GenerationError::NoImages {
            skipped: report.skipped,
        });
    }

    tracing::info!(
        images = report.images.len(),
        skipped = report.skipped.len(),
        "generation complete"
    );

    Ok(GenerationResponse {
        suggestions: report.images.into_iter().map(|image| image.url).collect(),
    })
}
