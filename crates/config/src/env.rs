//! Environment variable access for Drupal verification runs.
//!
//! Parsing is strict: a variable that is present but blank, or that fails to
//! coerce to the requested type, is an error and never a silent default.
//! Secret values are redacted in error metadata.

use drupal_verify_shared::{ErrorCode, ErrorEnvelope, SecretString, redact_if_secret};
use std::collections::BTreeMap;
use std::fmt;
use url::Url;

/// Env var: base URL of the Drupal site under test.
pub const ENV_DRUPAL_BASE_URL: &str = "DRUPAL_BASE_URL";
/// Env var: name (not path) of the test-suite base directory.
pub const ENV_DRUPAL_TEST_BASEDIR: &str = "DRUPAL_TEST_BASEDIR";
/// Env var: base URL of the test-assets container.
pub const ENV_BASE_ASSETS_URL: &str = "BASE_ASSETS_URL";
/// Env var: basic-auth username.
pub const ENV_DRUPAL_USERNAME: &str = "DRUPAL_USERNAME";
/// Env var: basic-auth password (secret).
// gitleaks:allow
pub const ENV_DRUPAL_PASSWORD: &str = "DRUPAL_PASSWORD";
/// Env var: HTTP timeout in milliseconds.
pub const ENV_DRUPAL_TIMEOUT_MS: &str = "DRUPAL_TIMEOUT_MS";

const KNOWN_VARS: [&str; 6] = [
    ENV_DRUPAL_BASE_URL,
    ENV_DRUPAL_TEST_BASEDIR,
    ENV_BASE_ASSETS_URL,
    ENV_DRUPAL_USERNAME,
    ENV_DRUPAL_PASSWORD,
    ENV_DRUPAL_TIMEOUT_MS,
];

/// Typed env parsing errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnvParseError {
    /// A required env var was not set.
    MissingRequired {
        /// Env var name.
        var: String,
    },
    /// An env var was present but empty after trimming.
    EmptyValue {
        /// Env var name.
        var: String,
    },
    /// Boolean env var had an invalid value.
    InvalidBool {
        /// Env var name.
        var: String,
        /// Raw input value.
        value: String,
    },
    /// Integer env var had an invalid value.
    InvalidInt {
        /// Env var name.
        var: String,
        /// Raw input value.
        value: String,
    },
    /// URL env var had an invalid value.
    InvalidUrl {
        /// Env var name.
        var: String,
        /// Raw input value.
        value: String,
    },
}

impl EnvParseError {
    fn error_code(&self) -> ErrorCode {
        match self {
            Self::MissingRequired { .. } => ErrorCode::new("config", "missing_env_var"),
            Self::EmptyValue { .. } => ErrorCode::new("config", "empty_env_var"),
            Self::InvalidBool { .. } => ErrorCode::new("config", "invalid_env_bool"),
            Self::InvalidInt { .. } => ErrorCode::new("config", "invalid_env_int"),
            Self::InvalidUrl { .. } => ErrorCode::new("config", "invalid_env_url"),
        }
    }

    /// Name of the env var that failed to parse.
    #[must_use]
    pub fn var(&self) -> &str {
        match self {
            Self::MissingRequired { var }
            | Self::EmptyValue { var }
            | Self::InvalidBool { var, .. }
            | Self::InvalidInt { var, .. }
            | Self::InvalidUrl { var, .. } => var,
        }
    }
}

impl fmt::Display for EnvParseError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingRequired { var } => {
                write!(formatter, "missing required environment variable: {var}")
            },
            Self::EmptyValue { var } => write!(formatter, "{var} must be non-empty"),
            Self::InvalidBool { var, .. } => write!(formatter, "{var} must be a boolean"),
            Self::InvalidInt { var, .. } => write!(formatter, "{var} must be an integer"),
            Self::InvalidUrl { var, .. } => write!(formatter, "{var} must be a valid URL"),
        }
    }
}

impl std::error::Error for EnvParseError {}

impl From<EnvParseError> for ErrorEnvelope {
    fn from(error: EnvParseError) -> Self {
        let code = error.error_code();
        let message = error.to_string();
        let envelope = Self::expected(code, message);

        match error {
            EnvParseError::MissingRequired { var } | EnvParseError::EmptyValue { var } => {
                envelope.with_metadata("env_var", var)
            },
            EnvParseError::InvalidBool { var, value }
            | EnvParseError::InvalidInt { var, value }
            | EnvParseError::InvalidUrl { var, value } => {
                let value = redact_if_secret(&var, &value);
                envelope
                    .with_metadata("env_var", var)
                    .with_metadata("value", value)
            },
        }
    }
}

/// Snapshot of environment variables with typed accessors.
///
/// Built from the process environment or from an explicit map, so tests can
/// run without touching global state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvSource {
    vars: BTreeMap<String, String>,
}

impl EnvSource {
    /// Snapshot a key/value map (useful for tests and fixtures).
    #[must_use]
    pub fn from_map(map: BTreeMap<String, String>) -> Self {
        Self { vars: map }
    }

    /// Snapshot the current process environment.
    ///
    /// Variables whose name or value is not valid Unicode are skipped.
    #[must_use]
    pub fn from_std_env() -> Self {
        let vars = std::env::vars_os()
            .filter_map(|(key, value)| Some((key.into_string().ok()?, value.into_string().ok()?)))
            .collect();
        Self { vars }
    }

    /// Borrow the raw value of a variable, if set.
    #[must_use]
    pub fn raw(&self, var: &str) -> Option<&str> {
        self.vars.get(var).map(String::as_str)
    }

    /// Value of a required variable, trimmed.
    pub fn require(&self, var: &str) -> Result<Box<str>, EnvParseError> {
        self.optional(var)?
            .ok_or_else(|| EnvParseError::MissingRequired {
                var: var.to_owned(),
            })
    }

    /// Value of a variable, or `default` when unset.
    ///
    /// `default` applies only when the variable is absent. A variable that
    /// is set but empty or whitespace-only is an [`EnvParseError::EmptyValue`]
    /// rather than a fallback; set values are returned trimmed.
    pub fn get_or(&self, var: &str, default: &str) -> Result<Box<str>, EnvParseError> {
        Ok(self.optional(var)?.unwrap_or_else(|| default.into()))
    }

    /// Integer value of a variable, or `default` when unset.
    pub fn get_or_int(&self, var: &str, default: i64) -> Result<i64, EnvParseError> {
        let Some(value) = self.optional(var)? else {
            return Ok(default);
        };
        value.parse::<i64>().map_err(|_| EnvParseError::InvalidInt {
            var: var.to_owned(),
            value: value.into_string(),
        })
    }

    /// Boolean value of a variable, or `default` when unset.
    ///
    /// Accepts `true/false`, `t/f`, `1/0`, `yes/no` and `on/off` in any case.
    pub fn get_or_bool(&self, var: &str, default: bool) -> Result<bool, EnvParseError> {
        let Some(value) = self.optional(var)? else {
            return Ok(default);
        };
        parse_bool(&value).ok_or_else(|| EnvParseError::InvalidBool {
            var: var.to_owned(),
            value: value.into_string(),
        })
    }

    /// Drupal base URL from `DRUPAL_BASE_URL`.
    pub fn base_url(&self) -> Result<Box<str>, EnvParseError> {
        self.require(ENV_DRUPAL_BASE_URL)
    }

    /// Drupal base URL from `DRUPAL_BASE_URL`, or `default` when unset.
    pub fn base_url_or(&self, default: &str) -> Result<Box<str>, EnvParseError> {
        self.get_or(ENV_DRUPAL_BASE_URL, default)
    }

    /// Test-suite base directory name from `DRUPAL_TEST_BASEDIR`.
    pub fn test_basedir(&self) -> Result<Box<str>, EnvParseError> {
        self.require(ENV_DRUPAL_TEST_BASEDIR)
    }

    /// Test-suite base directory name, or `default` when unset.
    pub fn test_basedir_or(&self, default: &str) -> Result<Box<str>, EnvParseError> {
        self.get_or(ENV_DRUPAL_TEST_BASEDIR, default)
    }

    /// Test-assets base URL from `BASE_ASSETS_URL`.
    pub fn assets_base_url(&self) -> Result<Box<str>, EnvParseError> {
        self.require(ENV_BASE_ASSETS_URL)
    }

    /// Test-assets base URL, or `default` when unset.
    pub fn assets_base_url_or(&self, default: &str) -> Result<Box<str>, EnvParseError> {
        self.get_or(ENV_BASE_ASSETS_URL, default)
    }

    fn optional(&self, var: &str) -> Result<Option<Box<str>>, EnvParseError> {
        parse_optional_trimmed_string(&self.vars, var)
    }
}

/// Typed overrides parsed from the environment in one pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VerifyEnv {
    /// Drupal base URL (`DRUPAL_BASE_URL`).
    pub base_url: Option<Box<str>>,
    /// Test-suite base directory name (`DRUPAL_TEST_BASEDIR`).
    pub test_basedir: Option<Box<str>>,
    /// Test-assets base URL (`BASE_ASSETS_URL`).
    pub assets_base_url: Option<Box<str>>,
    /// Basic-auth username (`DRUPAL_USERNAME`).
    pub username: Option<Box<str>>,
    /// Basic-auth password (`DRUPAL_PASSWORD`).
    pub password: Option<SecretString>,
    /// HTTP timeout in milliseconds (`DRUPAL_TIMEOUT_MS`).
    pub timeout_ms: Option<u64>,
}

impl VerifyEnv {
    /// Parse env overrides from a key/value map (useful for tests and fixtures).
    pub fn from_map(map: &BTreeMap<String, String>) -> Result<Self, EnvParseError> {
        Ok(Self {
            base_url: parse_optional_url_string(map, ENV_DRUPAL_BASE_URL)?,
            test_basedir: parse_optional_trimmed_string(map, ENV_DRUPAL_TEST_BASEDIR)?,
            assets_base_url: parse_optional_url_string(map, ENV_BASE_ASSETS_URL)?,
            username: parse_optional_trimmed_string(map, ENV_DRUPAL_USERNAME)?,
            password: parse_optional_secret(map, ENV_DRUPAL_PASSWORD)?,
            timeout_ms: parse_optional_u64(map, ENV_DRUPAL_TIMEOUT_MS)?,
        })
    }

    /// Parse env overrides from the current process environment.
    pub fn from_std_env() -> Result<Self, EnvParseError> {
        let mut map = BTreeMap::new();
        for name in KNOWN_VARS {
            if let Ok(value) = std::env::var(name) {
                map.insert(name.to_string(), value);
            }
        }
        Self::from_map(&map)
    }

    /// Parse env overrides from an [`EnvSource`] snapshot.
    pub fn from_source(source: &EnvSource) -> Result<Self, EnvParseError> {
        Self::from_map(&source.vars)
    }
}

fn parse_optional_trimmed_string(
    map: &BTreeMap<String, String>,
    var: &str,
) -> Result<Option<Box<str>>, EnvParseError> {
    let Some(raw) = map.get(var) else {
        return Ok(None);
    };

    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(EnvParseError::EmptyValue {
            var: var.to_owned(),
        });
    }

    Ok(Some(trimmed.to_owned().into_boxed_str()))
}

// Passwords keep surrounding whitespace; only a fully blank value is rejected.
fn parse_optional_secret(
    map: &BTreeMap<String, String>,
    var: &str,
) -> Result<Option<SecretString>, EnvParseError> {
    let Some(raw) = map.get(var) else {
        return Ok(None);
    };

    if raw.trim().is_empty() {
        return Err(EnvParseError::EmptyValue {
            var: var.to_owned(),
        });
    }

    Ok(Some(SecretString::new(raw.clone())))
}

fn parse_optional_u64(
    map: &BTreeMap<String, String>,
    var: &str,
) -> Result<Option<u64>, EnvParseError> {
    let Some(trimmed) = parse_optional_trimmed_string(map, var)? else {
        return Ok(None);
    };

    trimmed
        .parse::<u64>()
        .map(Some)
        .map_err(|_| EnvParseError::InvalidInt {
            var: var.to_owned(),
            value: trimmed.into_string(),
        })
}

fn parse_optional_url_string(
    map: &BTreeMap<String, String>,
    var: &str,
) -> Result<Option<Box<str>>, EnvParseError> {
    let Some(trimmed) = parse_optional_trimmed_string(map, var)? else {
        return Ok(None);
    };

    let invalid = || EnvParseError::InvalidUrl {
        var: var.to_owned(),
        value: trimmed.to_string(),
    };
    let parsed = Url::parse(&trimmed).map_err(|_| invalid())?;
    if parsed.scheme() != "http" && parsed.scheme() != "https" {
        return Err(invalid());
    }

    // Keep the caller's spelling; `Url` would append a trailing slash.
    Ok(Some(trimmed))
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "t" | "1" | "yes" | "on" => Some(true),
        "false" | "f" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}
