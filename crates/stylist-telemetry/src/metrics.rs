//! Metric names and the instruments recorded by the generation pipeline

use std::time::Instant;

use opentelemetry::{
    KeyValue, global,
    metrics::{Counter, Histogram},
};

pub const IMAGES_GENERATED: &str = "stylist.images.generated";
pub const IMAGES_SKIPPED: &str = "stylist.images.skipped";
pub const SYNTHESIS_ATTEMPTS: &str = "stylist.synthesis.attempts";
pub const GENERATION_DURATION: &str = "stylist.generation.duration";

/// Instruments for one pipeline instance
///
/// Backed by the global meter provider, so they are no-ops until
/// [`crate::init`] installs an exporter.
#[derive(Clone)]
pub struct PipelineMetrics {
    images_generated: Counter<u64>,
    images_skipped: Counter<u64>,
    synthesis_attempts: Counter<u64>,
    generation_duration: Histogram<f64>,
}

impl PipelineMetrics {
    pub fn new() -> Self {
        let meter = global::meter("stylist");

        Self {
            images_generated: meter
                .u64_counter(IMAGES_GENERATED)
                .with_description("Images returned to clients")
                .build(),
            images_skipped: meter
                .u64_counter(IMAGES_SKIPPED)
                .with_description("Suggestions dropped after synthesis failures")
                .build(),
            synthesis_attempts: meter
                .u64_counter(SYNTHESIS_ATTEMPTS)
                .with_description("Calls made to the image generation API")
                .build(),
            generation_duration: meter
                .f64_histogram(GENERATION_DURATION)
                .with_unit("s")
                .with_description("Wall time of a generation request")
                .build(),
        }
    }

    pub fn image_generated(&self) {
        self.images_generated.add(1, &[]);
    }

    /// Count a skipped suggestion, tagged with the failure kind
    pub fn image_skipped(&self, reason: &'static str) {
        self.images_skipped.add(1, &[KeyValue::new("reason", reason)]);
    }

    pub fn synthesis_attempt(&self) {
        self.synthesis_attempts.add(1, &[]);
    }

    /// Record request duration, tagged with its terminal outcome
    pub fn record_generation(&self, start: Instant, outcome: &'static str) {
        self.generation_duration
            .record(start.elapsed().as_secs_f64(), &[KeyValue::new("outcome", outcome)]);
    }
}

impl Default for PipelineMetrics {
    fn default() -> Self {
        Self::new()
    }
}
