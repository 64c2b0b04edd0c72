//! Explicit configuration values passed into client construction.
//!
//! Required settings are plain fields and optional ones are `Option`s; nothing
//! downstream reads the process environment.

use crate::env::VerifyEnv;
use drupal_verify_shared::{ErrorCode, ErrorEnvelope, SecretString};
use std::fmt;
use url::Url;

/// Default HTTP timeout in milliseconds.
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;
/// Minimum accepted HTTP timeout in milliseconds.
pub const MIN_TIMEOUT_MS: u64 = 1;
/// Maximum accepted HTTP timeout in milliseconds.
pub const MAX_TIMEOUT_MS: u64 = 600_000;

/// Typed validation errors for the verification configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Neither the environment nor the caller supplied a base URL.
    MissingBaseUrl,
    /// The base URL is not an absolute http(s) URL.
    InvalidBaseUrl {
        /// Value provided.
        value: String,
    },
    /// The timeout is out of bounds.
    TimeoutOutOfRange {
        /// Value provided (ms).
        value_ms: u64,
    },
}

impl ConfigError {
    fn error_code(&self) -> ErrorCode {
        match self {
            Self::MissingBaseUrl => ErrorCode::new("config", "missing_base_url"),
            Self::InvalidBaseUrl { .. } => ErrorCode::new("config", "invalid_base_url"),
            Self::TimeoutOutOfRange { .. } => ErrorCode::new("config", "timeout_out_of_range"),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingBaseUrl => formatter.write_str(
                "a Drupal base URL is required (set DRUPAL_BASE_URL or pass a default)",
            ),
            Self::InvalidBaseUrl { value } => {
                write!(formatter, "Drupal base URL `{value}` is not an absolute http(s) URL")
            },
            Self::TimeoutOutOfRange { value_ms } => write!(
                formatter,
                "timeout {value_ms}ms is out of range ({MIN_TIMEOUT_MS}..={MAX_TIMEOUT_MS})"
            ),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<ConfigError> for ErrorEnvelope {
    fn from(error: ConfigError) -> Self {
        let envelope = Self::expected(error.error_code(), error.to_string());
        match error {
            ConfigError::MissingBaseUrl => envelope,
            ConfigError::InvalidBaseUrl { value } => envelope.with_metadata("value", value),
            ConfigError::TimeoutOutOfRange { value_ms } => {
                envelope.with_metadata("value_ms", value_ms.to_string())
            },
        }
    }
}

/// Connection settings for one Drupal site.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrupalConfig {
    /// Base URL of the site, e.g. `https://islandora.traefik.me`.
    pub base_url: Box<str>,
    /// Default basic-auth username.
    pub username: Option<Box<str>>,
    /// Default basic-auth password.
    pub password: Option<SecretString>,
    /// HTTP timeout in milliseconds.
    pub timeout_ms: u64,
}

impl DrupalConfig {
    /// Validate a base URL and build an anonymous configuration.
    pub fn new(base_url: impl AsRef<str>) -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: validate_base_url(base_url.as_ref())?,
            username: None,
            password: None,
            timeout_ms: DEFAULT_TIMEOUT_MS,
        })
    }

    /// Attach default basic-auth credentials.
    #[must_use]
    pub fn with_basic_auth(
        mut self,
        username: impl Into<Box<str>>,
        password: impl Into<SecretString>,
    ) -> Self {
        self.username = Some(username.into());
        self.password = Some(password.into());
        self
    }

    /// Override the HTTP timeout.
    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Result<Self, ConfigError> {
        self.timeout_ms = validate_timeout(timeout_ms)?;
        Ok(self)
    }
}

/// Configuration for a verification run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifyConfig {
    /// Drupal connection settings.
    pub drupal: DrupalConfig,
    /// Test-suite base directory name, if configured.
    pub test_basedir: Option<Box<str>>,
    /// Test-assets base URL, if configured.
    pub assets_base_url: Option<Box<str>>,
}

impl VerifyConfig {
    /// Build the configuration from parsed env overrides.
    ///
    /// `DRUPAL_BASE_URL` wins over `default_base_url`; when neither is present
    /// construction fails.
    pub fn from_env(env: &VerifyEnv, default_base_url: Option<&str>) -> Result<Self, ConfigError> {
        let base_url = env
            .base_url
            .as_deref()
            .or(default_base_url)
            .ok_or(ConfigError::MissingBaseUrl)?;

        let mut drupal = DrupalConfig::new(base_url)?;
        drupal.username = env.username.clone();
        drupal.password = env.password.clone();
        if let Some(timeout_ms) = env.timeout_ms {
            drupal = drupal.with_timeout_ms(timeout_ms)?;
        }

        Ok(Self {
            drupal,
            test_basedir: env.test_basedir.clone(),
            assets_base_url: env.assets_base_url.clone(),
        })
    }

    /// Build the configuration from the process environment.
    pub fn from_std_env(default_base_url: Option<&str>) -> Result<Self, ErrorEnvelope> {
        let env = VerifyEnv::from_std_env()?;
        Ok(Self::from_env(&env, default_base_url)?)
    }
}

fn validate_base_url(raw: &str) -> Result<Box<str>, ConfigError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ConfigError::MissingBaseUrl);
    }

    let invalid = || ConfigError::InvalidBaseUrl {
        value: raw.to_owned(),
    };
    let parsed = Url::parse(trimmed).map_err(|_| invalid())?;
    if !matches!(parsed.scheme(), "http" | "https") || parsed.cannot_be_a_base() {
        return Err(invalid());
    }

    Ok(trimmed.into())
}

const fn validate_timeout(value_ms: u64) -> Result<u64, ConfigError> {
    if value_ms < MIN_TIMEOUT_MS || value_ms > MAX_TIMEOUT_MS {
        return Err(ConfigError::TimeoutOutOfRange { value_ms });
    }
    Ok(value_ms)
}
