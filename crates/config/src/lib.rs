//! # drupal-verify-config
//!
//! Environment access and the explicit configuration value handed to the
//! JSON:API client. This crate depends on `shared` only.

/// Environment variable access.
pub mod env;
/// Configuration values and validation.
pub mod schema;

pub use env::{
    ENV_BASE_ASSETS_URL, ENV_DRUPAL_BASE_URL, ENV_DRUPAL_PASSWORD, ENV_DRUPAL_TEST_BASEDIR,
    ENV_DRUPAL_TIMEOUT_MS, ENV_DRUPAL_USERNAME, EnvParseError, EnvSource, VerifyEnv,
};
pub use schema::{
    ConfigError, DEFAULT_TIMEOUT_MS, DrupalConfig, MAX_TIMEOUT_MS, MIN_TIMEOUT_MS, VerifyConfig,
};

/// Returns the config crate version.
#[must_use]
pub const fn config_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
