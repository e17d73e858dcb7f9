use std::path::Path;

use secrecy::ExposeSecret;

use crate::Config;

impl Config {
    /// Load configuration from a TOML file
    ///
    /// Reads the file, expands `{{ env.VAR }}` placeholders, then
    /// deserializes and validates the result.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, environment variable
    /// expansion fails, TOML parsing fails, or validation fails
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("failed to read config file {}: {e}", path.display()))?;

        Self::from_toml(&raw)
    }

    /// Parse configuration from TOML text
    ///
    /// # Errors
    ///
    /// Returns an error if expansion, parsing or validation fails
    pub fn from_toml(raw: &str) -> anyhow::Result<Self> {
        let expanded =
            crate::env::expand_env(raw).map_err(|e| anyhow::anyhow!("config variable expansion failed: {e}"))?;

        let config: Self = toml::from_str(&expanded).map_err(|e| anyhow::anyhow!("failed to parse config: {e}"))?;

        config.validate()?;

        Ok(config)
    }

    /// Validate that the configuration is internally consistent
    ///
    /// # Errors
    ///
    /// Returns an error if pipeline bounds are zero or auth is enabled
    /// without a signing secret
    pub fn validate(&self) -> anyhow::Result<()> {
        self.validate_pipeline_config()?;
        self.validate_auth_config()?;
        Ok(())
    }

    fn validate_pipeline_config(&self) -> anyhow::Result<()> {
        let pipeline = &self.pipeline;

        if pipeline.suggestion_count == 0 {
            anyhow::bail!("pipeline.suggestion_count must be greater than 0");
        }

        if pipeline.success_cap == 0 {
            anyhow::bail!("pipeline.success_cap must be greater than 0");
        }

        if pipeline.max_attempts == 0 {
            anyhow::bail!("pipeline.max_attempts must be greater than 0");
        }

        if pipeline.request_deadline.is_zero() {
            anyhow::bail!("pipeline.request_deadline must be greater than 0");
        }

        Ok(())
    }

    /// Validate auth configuration when auth is enabled
    fn validate_auth_config(&self) -> anyhow::Result<()> {
        let Some(ref auth) = self.auth else {
            return Ok(());
        };

        if !auth.enabled {
            return Ok(());
        }

        if auth.jwt_secret.expose_secret().is_empty() {
            anyhow::bail!("auth.jwt_secret must not be empty when auth is enabled");
        }

        if auth.role_claim.is_empty() {
            anyhow::bail!("auth.role_claim must not be empty");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::time::Duration;

    use secrecy::ExposeSecret;

    use crate::{AnyOrArray, Config};

    #[test]
    fn empty_config_uses_production_defaults() {
        let config = Config::from_toml("").unwrap();

        assert_eq!(config.pipeline.suggestion_count, 5);
        assert_eq!(config.pipeline.success_cap, 5);
        assert_eq!(config.pipeline.max_attempts, 3);
        assert_eq!(config.pipeline.retry_delay, Duration::from_millis(2000));
        assert_eq!(config.pipeline.pace_delay, Duration::from_millis(1000));
        assert_eq!(config.pipeline.reference_timeout, Duration::from_secs(30));
        assert_eq!(config.pipeline.image_size, "1024x1024");
        assert_eq!(config.pipeline.image_quality, "standard");
        assert_eq!(config.openai.image_model, "dall-e-3");
        assert!(config.openai.api_key.is_none());
        assert!(config.server.health.enabled);
        assert_eq!(config.server.cors.origins, AnyOrArray::Any);
        assert!(config.auth.is_none());
    }

    #[test]
    fn durations_parse_from_strings() {
        let config = Config::from_toml(
            r#"
            [pipeline]
            retry_delay = "10ms"
            pace_delay = "0ms"
            request_deadline = "1m"
            "#,
        )
        .unwrap();

        assert_eq!(config.pipeline.retry_delay, Duration::from_millis(10));
        assert_eq!(config.pipeline.pace_delay, Duration::ZERO);
        assert_eq!(config.pipeline.request_deadline, Duration::from_secs(60));
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let err = Config::from_toml("[pipeline]\nretries = 4\n").unwrap_err();
        assert!(err.to_string().contains("failed to parse config"));
    }

    #[test]
    fn zero_success_cap_is_rejected() {
        let err = Config::from_toml("[pipeline]\nsuccess_cap = 0\n").unwrap_err();
        assert!(err.to_string().contains("success_cap"));
    }

    #[test]
    fn enabled_auth_requires_secret() {
        let err = Config::from_toml("[auth]\nenabled = true\njwt_secret = \"\"\n").unwrap_err();
        assert!(err.to_string().contains("jwt_secret"));
    }

    #[test]
    fn auth_defaults_cover_public_catalog() {
        let config = Config::from_toml("[auth]\nenabled = true\njwt_secret = \"s3cret\"\n").unwrap();
        let auth = config.auth.unwrap();

        assert!(auth.public_paths.iter().any(|p| p == "/trending-styles"));
        assert_eq!(auth.admin_roles, vec!["authenticated".to_string()]);
        assert_eq!(auth.role_claim, "role");
    }

    #[test]
    fn catalog_seed_requires_valid_url() {
        let err = Config::from_toml(
            r#"
            [[catalog.styles]]
            title = "Buzz cut"
            image_path = "not a url"
            "#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("failed to parse config"));
    }

    #[test]
    fn load_reads_file_and_expands_env() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[openai]\napi_key = \"{{{{ env.STYLIST_LOADER_KEY }}}}\"").unwrap();

        temp_env::with_var("STYLIST_LOADER_KEY", Some("sk-from-env"), || {
            let config = Config::load(file.path()).unwrap();
            assert!(config.openai.api_key.is_some());
        });
    }

    #[test]
    fn sample_config_loads_without_openai_key() {
        let sample = include_str!("../../../stylist.toml");

        temp_env::with_vars(
            [("STYLIST_JWT_SECRET", Some("s3cret")), ("OPENAI_API_KEY", None)],
            || {
                let config = Config::from_toml(sample).unwrap();
                let key = config.openai.api_key.unwrap();
                assert!(key.expose_secret().is_empty());
                assert!(config.auth.is_some_and(|auth| auth.enabled));
            },
        );
    }

    #[test]
    fn missing_file_is_reported() {
        let err = Config::load(std::path::Path::new("/nonexistent/stylist.toml")).unwrap_err();
        assert!(err.to_string().contains("failed to read config file"));
    }
}
