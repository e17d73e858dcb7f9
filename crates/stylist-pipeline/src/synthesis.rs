use std::time::Duration;

use stylist_config::PipelineConfig;
use stylist_telemetry::PipelineMetrics;

use crate::{
    error::{FailureKind, ProviderError},
    provider::StyleProvider,
    suggest::image_prompt,
    types::{GeneratedImage, ImageSpec, SkippedSuggestion},
};

/// Retry and pacing rules for the sequential synthesis loop
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Stop once this many images exist
    pub success_cap: usize,
    /// Total attempts for a rate-limited suggestion
    pub max_attempts: u32,
    /// Extra attempts after a transient failure
    pub transient_retries: u32,
    /// Fixed wait between attempts
    pub retry_delay: Duration,
    /// Wait after a success before the next call
    pub pace_delay: Duration,
}

impl RetryPolicy {
    pub fn from_config(config: &PipelineConfig) -> Self {
        Self {
            success_cap: config.success_cap,
            max_attempts: config.max_attempts,
            transient_retries: config.transient_retries,
            retry_delay: config.retry_delay,
            pace_delay: config.pace_delay,
        }
    }

    /// Attempts allowed for a suggestion whose latest failure has `kind`
    const fn attempt_budget(&self, kind: FailureKind) -> u32 {
        match kind {
            FailureKind::RateLimited => self.max_attempts,
            FailureKind::Transient => 1 + self.transient_retries,
            FailureKind::Permanent | FailureKind::Fatal => 1,
        }
    }
}

/// Result of the synthesis loop
#[derive(Debug, Default)]
pub struct SynthesisReport {
    /// Images in production order
    pub images: Vec<GeneratedImage>,
    /// Suggestions that were given up on
    pub skipped: Vec<SkippedSuggestion>,
}

/// Image options shared by every call in one request
#[derive(Debug, Clone)]
pub struct ImageOptions {
    pub size: String,
    pub quality: String,
}

struct AttemptFailure {
    error: ProviderError,
    attempts: u32,
}

/// Generate one image per suggestion, one call at a time
///
/// Individual failures are skipped. Only a credential failure escapes,
/// since every later call would fail the same way.
pub async fn synthesize_all(
    provider: &dyn StyleProvider,
    suggestions: &[String],
    options: &ImageOptions,
    policy: &RetryPolicy,
    metrics: &PipelineMetrics,
) -> Result<SynthesisReport, ProviderError> {
    let mut report = SynthesisReport::default();

    for (index, suggestion) in suggestions.iter().enumerate() {
        if report.images.len() >= policy.success_cap {
            tracing::debug!(cap = policy.success_cap, "success cap reached");
            break;
        }

        let spec = ImageSpec {
            prompt: image_prompt(suggestion),
            size: options.size.clone(),
            quality: options.quality.clone(),
        };

        match attempt_with_retry(provider, &spec, policy, metrics).await {
            Ok((image, attempts)) => {
                tracing::debug!(index, attempts, "generated image for suggestion");
                metrics.image_generated();
                report.images.push(image);

                let more_work = index + 1 < suggestions.len() && report.images.len() < policy.success_cap;
                if more_work && !policy.pace_delay.is_zero() {
                    tokio::time::sleep(policy.pace_delay).await;
                }
            }
            Err(failure) if failure.error.kind() == FailureKind::Fatal => return Err(failure.error),
            Err(AttemptFailure { error, attempts }) => {
                let kind = error.kind().as_str();
                tracing::warn!(index, attempts, kind, error = %error, "skipping suggestion");
                metrics.image_skipped(kind);
                report.skipped.push(SkippedSuggestion {
                    index,
                    suggestion: suggestion.clone(),
                    kind,
                    reason: error.to_string(),
                    attempts,
                });
            }
        }
    }

    Ok(report)
}

async fn attempt_with_retry(
    provider: &dyn StyleProvider,
    spec: &ImageSpec,
    policy: &RetryPolicy,
    metrics: &PipelineMetrics,
) -> Result<(GeneratedImage, u32), AttemptFailure> {
    let mut attempts = 0;

    loop {
        attempts += 1;
        metrics.synthesis_attempt();

        match provider.synthesize(spec).await {
            Ok(image) => return Ok((image, attempts)),
            Err(error) => {
                if attempts >= policy.attempt_budget(error.kind()) {
                    return Err(AttemptFailure { error, attempts });
                }

                tracing::debug!(attempts, kind = error.kind().as_str(), "retrying image generation");
                tokio::time::sleep(policy.retry_delay).await;
            }
        }
    }
}
