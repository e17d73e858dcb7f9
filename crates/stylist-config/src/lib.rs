#![allow(clippy::must_use_candidate)]

pub mod auth;
pub mod catalog;
pub mod cors;
mod duration;
mod env;
pub mod health;
mod loader;
pub mod openai;
pub mod pipeline;
pub mod server;
pub mod telemetry;

use serde::Deserialize;

pub use auth::*;
pub use catalog::*;
pub use cors::*;
pub use health::*;
pub use openai::*;
pub use pipeline::*;
pub use server::*;
pub use telemetry::TelemetryConfig;

/// Top-level Stylist configuration
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Bearer token verification
    #[serde(default)]
    pub auth: Option<AuthConfig>,
    /// `OpenAI` chat and image API access
    #[serde(default)]
    pub openai: OpenAiConfig,
    /// Suggestion pipeline tuning
    #[serde(default)]
    pub pipeline: PipelineConfig,
    /// Trending styles catalog
    #[serde(default)]
    pub catalog: CatalogConfig,
    /// Telemetry configuration
    #[serde(default)]
    pub telemetry: Option<TelemetryConfig>,
}
