//! Programmatic configuration builder for integration tests

use std::net::SocketAddr;
use std::time::Duration;

use secrecy::SecretString;
use stylist_config::{
    AuthConfig, CatalogSeed, Config, CorsConfig, HealthConfig, OpenAiConfig, PipelineConfig, ServerConfig,
};

/// Builder for constructing test configurations
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Create a new builder with minimal defaults
    ///
    /// Retry and pacing delays are shortened so tests run in real time.
    pub fn new() -> Self {
        Self {
            config: Config {
                server: ServerConfig {
                    listen_address: Some(SocketAddr::from(([127, 0, 0, 1], 0))),
                    health: HealthConfig {
                        enabled: true,
                        ..HealthConfig::default()
                    },
                    ..ServerConfig::default()
                },
                pipeline: PipelineConfig {
                    retry_delay: Duration::from_millis(20),
                    pace_delay: Duration::from_millis(5),
                    reference_timeout: Duration::from_secs(5),
                    ..PipelineConfig::default()
                },
                ..Config::default()
            },
        }
    }

    /// Point the `OpenAI` client at a mock backend
    pub fn with_openai(mut self, base_url: &str) -> Self {
        self.config.openai = OpenAiConfig {
            api_key: Some(SecretString::from("test-key")),
            base_url: Some(base_url.parse().expect("valid URL")),
            request_timeout: Duration::from_secs(10),
            ..OpenAiConfig::default()
        };
        self
    }

    /// Drop the API key while keeping the mock base URL
    pub fn without_api_key(mut self) -> Self {
        self.config.openai.api_key = None;
        self
    }

    /// Replace the API key sent to the backend
    pub fn with_api_key(mut self, key: &str) -> Self {
        self.config.openai.api_key = Some(SecretString::from(key.to_owned()));
        self
    }

    /// Enable session verification with the given shared secret
    pub fn with_auth(mut self, secret: &str) -> Self {
        self.config.auth = Some(AuthConfig {
            enabled: true,
            jwt_secret: SecretString::from(secret.to_owned()),
            public_paths: vec!["/health".to_owned(), "/trending-styles".to_owned()],
            role_claim: "role".to_owned(),
            admin_roles: vec!["authenticated".to_owned()],
        });
        self
    }

    /// Set CORS configuration
    pub fn with_cors(mut self, config: CorsConfig) -> Self {
        self.config.server.cors = config;
        self
    }

    /// Set the whole-request deadline
    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.config.pipeline.request_deadline = deadline;
        self
    }

    /// Seed the catalog with a style
    pub fn with_catalog_style(mut self, title: &str, image_path: &str) -> Self {
        self.config.catalog.styles.push(CatalogSeed {
            title: title.to_owned(),
            description: String::new(),
            image_path: image_path.parse().expect("valid URL"),
        });
        self
    }

    /// Disable health endpoint
    pub fn without_health(mut self) -> Self {
        self.config.server.health.enabled = false;
        self
    }

    /// Build the final config
    pub fn build(self) -> Config {
        self.config
    }
}
