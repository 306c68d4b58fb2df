//! Client settings
//!
//! Loaded from `EDUPREDICT_`-prefixed environment variables, validated before
//! use. Embeddings that configure the client programmatically can skip this
//! and use the builder directly.

use crate::client::{ApiClient, ApiClientBuilder};
use crate::retry::RetryPolicy;
use crate::ClientError;
use config::{Config, ConfigError, Environment};
use edupredict_core::validation::{validators, ValidateConfig};
use edupredict_core::CredentialStore;
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;

/// Connection settings for the EduPredict backend
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct ClientSettings {
    /// Backend origin, without the `/api` prefix
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_retry_max_attempts")]
    pub retry_max_attempts: u32,
    #[serde(default = "default_retry_base_delay_ms")]
    pub retry_base_delay_ms: u64,
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_retry_max_attempts() -> u32 {
    3
}

fn default_retry_base_delay_ms() -> u64 {
    500
}

impl ClientSettings {
    /// Load and validate settings from the environment
    pub fn from_env() -> Result<Self, ConfigError> {
        let settings: Self = Config::builder()
            .add_source(Environment::with_prefix("EDUPREDICT").try_parsing(true))
            .build()?
            .try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    /// Build a client from these settings
    pub fn into_client(
        self,
        credentials: Arc<dyn CredentialStore>,
    ) -> Result<ApiClient, ClientError> {
        ApiClientBuilder::default()
            .base_url(self.base_url)
            .credentials(credentials)
            .timeout(Duration::from_secs(self.timeout_secs))
            .retry(RetryPolicy {
                max_attempts: self.retry_max_attempts,
                base_delay: Duration::from_millis(self.retry_base_delay_ms),
            })
            .build()
    }
}

impl ValidateConfig for ClientSettings {
    fn validate(&self) -> Result<(), ConfigError> {
        validators::validate_not_empty(&self.base_url, "base_url")?;
        validators::validate_url(&self.base_url, "base_url")?;
        validators::validate_range(self.timeout_secs, 1, 300, "timeout_secs")?;
        validators::validate_range(self.retry_max_attempts, 1, 10, "retry_max_attempts")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings_from(env: &[(&str, &str)]) -> Result<ClientSettings, ConfigError> {
        let mut source = config::Map::new();
        for (key, value) in env {
            source.insert((*key).to_owned(), (*value).to_owned());
        }
        let settings: ClientSettings = Config::builder()
            .add_source(
                Environment::with_prefix("EDUPREDICT")
                    .try_parsing(true)
                    .source(Some(source)),
            )
            .build()?
            .try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    #[test]
    fn loads_with_defaults() {
        let settings =
            settings_from(&[("EDUPREDICT_BASE_URL", "https://api.edupredict.test")]).unwrap();
        assert_eq!(settings.base_url, "https://api.edupredict.test");
        assert_eq!(settings.timeout_secs, 30);
        assert_eq!(settings.retry_max_attempts, 3);
        assert_eq!(settings.retry_base_delay_ms, 500);
    }

    #[test]
    fn rejects_malformed_base_url() {
        assert!(settings_from(&[("EDUPREDICT_BASE_URL", "not a url")]).is_err());
    }

    #[test]
    fn rejects_zero_retry_attempts() {
        let result = settings_from(&[
            ("EDUPREDICT_BASE_URL", "https://api.edupredict.test"),
            ("EDUPREDICT_RETRY_MAX_ATTEMPTS", "0"),
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn builds_a_client() {
        let settings =
            settings_from(&[("EDUPREDICT_BASE_URL", "https://api.edupredict.test/")]).unwrap();
        let client = settings
            .into_client(Arc::new(edupredict_core::MemoryCredentialStore::new()))
            .unwrap();
        assert_eq!(client.base_url(), "https://api.edupredict.test");
    }
}
