use std::time::Duration;

use serde::Deserialize;

/// Tuning for the suggestion-to-image pipeline
///
/// Defaults reproduce the production behavior: five suggestions, at most
/// five images, three attempts on rate limits with a two second pause, and
/// a one second breather after every generated image.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PipelineConfig {
    /// Number of suggestions requested from the chat model
    #[serde(default = "default_suggestion_count")]
    pub suggestion_count: u32,
    /// Maximum number of images produced per request
    #[serde(default = "default_success_cap")]
    pub success_cap: usize,
    /// Total attempts per suggestion when the image API rate limits
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
    /// Extra attempts per suggestion after a transient upstream failure
    #[serde(default = "default_transient_retries")]
    pub transient_retries: u32,
    /// Fixed delay between attempts
    #[serde(default = "default_retry_delay", deserialize_with = "crate::duration::deserialize")]
    pub retry_delay: Duration,
    /// Pause after each generated image
    #[serde(default = "default_pace_delay", deserialize_with = "crate::duration::deserialize")]
    pub pace_delay: Duration,
    /// Timeout for the reference image reachability check
    #[serde(default = "default_reference_timeout", deserialize_with = "crate::duration::deserialize")]
    pub reference_timeout: Duration,
    /// Upper bound for a whole generation request
    #[serde(default = "default_request_deadline", deserialize_with = "crate::duration::deserialize")]
    pub request_deadline: Duration,
    /// Requested image size
    #[serde(default = "default_image_size")]
    pub image_size: String,
    /// Requested image quality
    #[serde(default = "default_image_quality")]
    pub image_quality: String,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            suggestion_count: default_suggestion_count(),
            success_cap: default_success_cap(),
            max_attempts: default_max_attempts(),
            transient_retries: default_transient_retries(),
            retry_delay: default_retry_delay(),
            pace_delay: default_pace_delay(),
            reference_timeout: default_reference_timeout(),
            request_deadline: default_request_deadline(),
            image_size: default_image_size(),
            image_quality: default_image_quality(),
        }
    }
}

#[allow(clippy::missing_const_for_fn)]
fn default_suggestion_count() -> u32 {
    5
}

#[allow(clippy::missing_const_for_fn)]
fn default_success_cap() -> usize {
    5
}

#[allow(clippy::missing_const_for_fn)]
fn default_max_attempts() -> u32 {
    3
}

#[allow(clippy::missing_const_for_fn)]
fn default_transient_retries() -> u32 {
    1
}

#[allow(clippy::missing_const_for_fn)]
fn default_retry_delay() -> Duration {
    Duration::from_millis(2000)
}

#[allow(clippy::missing_const_for_fn)]
fn default_pace_delay() -> Duration {
    Duration::from_millis(1000)
}

#[allow(clippy::missing_const_for_fn)]
fn default_reference_timeout() -> Duration {
    Duration::from_secs(30)
}

#[allow(clippy::missing_const_for_fn)]
fn default_request_deadline() -> Duration {
    Duration::from_secs(300)
}

fn default_image_size() -> String {
    "1024x1024".to_string()
}

fn default_image_quality() -> String {
    "standard".to_string()
}
