//! Client configuration
//!
//! Loaded from TOML; every field has a default so an empty file is valid.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Environment variable overriding [`ClientConfig::backend_url`]
pub const BACKEND_URL_ENV: &str = "EDUNOVA_BACKEND_URL";

/// Edunova client configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Base URL of the roadmap backend
    pub backend_url: String,
    /// Per-request timeout in seconds
    #[serde(rename = "request_timeout")]
    pub request_timeout_secs: u64,
    /// Lifetime of the persisted roadmap in seconds
    #[serde(rename = "session_max_age")]
    pub session_max_age_secs: u64,
    /// Cap on in-flight prefetches (`None` = every node at once)
    pub prefetch_concurrency: Option<usize>,
}

impl ClientConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With backend URL
    #[inline]
    #[must_use]
    pub fn with_backend_url(mut self, url: impl Into<String>) -> Self {
        self.backend_url = url.into();
        self
    }

    /// With request timeout
    #[inline]
    #[must_use]
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout_secs = timeout.as_secs();
        self
    }

    /// With session max-age
    #[inline]
    #[must_use]
    pub fn with_session_max_age(mut self, max_age: Duration) -> Self {
        self.session_max_age_secs = max_age.as_secs();
        self
    }

    /// With prefetch concurrency cap
    #[inline]
    #[must_use]
    pub fn with_prefetch_concurrency(mut self, limit: Option<usize>) -> Self {
        self.prefetch_concurrency = limit;
        self
    }

    /// Request timeout as a duration
    #[inline]
    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Session max-age as a duration
    #[inline]
    #[must_use]
    pub fn session_max_age(&self) -> Duration {
        Duration::from_secs(self.session_max_age_secs)
    }

    /// Parse and validate TOML
    ///
    /// # Errors
    /// - `ConfigError::Parse` on malformed TOML
    /// - `ConfigError::Invalid` on out-of-range values
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from file, then apply environment overrides
    ///
    /// # Errors
    /// - `ConfigError::Io` if the file cannot be read
    /// - any error from [`ClientConfig::from_toml_str`]
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::io_error(path, e))?;

        let config = Self::from_toml_str(&content)?.with_env_overrides();
        config.validate()?;

        tracing::debug!(path = %path.display(), backend = %config.backend_url, "loaded config");
        Ok(config)
    }

    /// Apply `EDUNOVA_BACKEND_URL` if set
    #[must_use]
    pub fn with_env_overrides(self) -> Self {
        match std::env::var(BACKEND_URL_ENV) {
            Ok(url) if !url.trim().is_empty() => self.with_backend_url(url),
            _ => self,
        }
    }

    /// Check value ranges
    ///
    /// # Errors
    /// `ConfigError::Invalid` naming the offending field
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.backend_url.trim().is_empty() {
            return Err(ConfigError::Invalid("backend_url must not be empty".to_string()));
        }
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "request_timeout must be positive".to_string(),
            ));
        }
        if self.session_max_age_secs == 0 {
            return Err(ConfigError::Invalid(
                "session_max_age must be positive".to_string(),
            ));
        }
        if self.prefetch_concurrency == Some(0) {
            return Err(ConfigError::Invalid(
                "prefetch_concurrency must be positive when set".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            backend_url: "http://localhost:5000".to_string(),
            request_timeout_secs: 60,
            session_max_age_secs: 3600,
            prefetch_concurrency: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn empty_toml_uses_defaults() {
        let config = ClientConfig::from_toml_str("").unwrap();
        assert_eq!(config, ClientConfig::default());
        assert_eq!(config.session_max_age(), Duration::from_secs(3600));
    }

    #[test]
    fn toml_overrides_fields() {
        let config = ClientConfig::from_toml_str(
            r#"
            backend_url = "http://backend:8080"
            request_timeout = 5
            prefetch_concurrency = 4
            "#,
        )
        .unwrap();

        assert_eq!(config.backend_url, "http://backend:8080");
        assert_eq!(config.request_timeout(), Duration::from_secs(5));
        assert_eq!(config.prefetch_concurrency, Some(4));
        assert_eq!(config.session_max_age_secs, 3600);
    }

    #[test]
    fn rejects_zero_concurrency() {
        let err = ClientConfig::from_toml_str("prefetch_concurrency = 0").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn rejects_zero_durations() {
        for toml in ["request_timeout = 0", "session_max_age = 0"] {
            let err = ClientConfig::from_toml_str(toml).unwrap_err();
            assert!(matches!(err, ConfigError::Invalid(_)), "{toml}");
        }
    }

    #[test]
    fn secs_suffixed_keys_are_not_recognised() {
        let config = ClientConfig::from_toml_str("session_max_age_secs = 60").unwrap();
        assert_eq!(config.session_max_age(), Duration::from_secs(3600));
    }

    #[test]
    fn rejects_empty_backend() {
        let err = ClientConfig::from_toml_str(r#"backend_url = " ""#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn rejects_malformed_toml() {
        let err = ClientConfig::from_toml_str("request_timeout = \"soon\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "session_max_age = 60").unwrap();

        let config = ClientConfig::load(file.path()).unwrap();
        assert_eq!(config.session_max_age(), Duration::from_secs(60));
    }

    #[test]
    fn load_missing_file() {
        let err = ClientConfig::load("/nonexistent/edunova.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn builder_methods() {
        let config = ClientConfig::new()
            .with_backend_url("http://example.test")
            .with_request_timeout(Duration::from_secs(3))
            .with_prefetch_concurrency(Some(2));

        assert_eq!(config.backend_url, "http://example.test");
        assert_eq!(config.request_timeout_secs, 3);
        assert_eq!(config.prefetch_concurrency, Some(2));
        assert!(config.validate().is_ok());
    }
}
