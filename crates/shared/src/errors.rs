//! Error envelope shared by every drupal-verify crate.
//!
//! Module errors (`EnvParseError`, `ConfigError`, `DrupalTypeError`, fixture
//! lookup failures) convert into an [`ErrorEnvelope`] carrying a namespaced
//! code and string metadata, so a failing test prints one uniform line.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Metadata attached to errors for diagnostics.
pub type ErrorMetadata = BTreeMap<String, String>;

/// Where a failure came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorKind {
    /// Bad input: configuration, fixtures, response shape or cardinality.
    Expected,
    /// Transport, I/O or server failures.
    Unexpected,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(match self {
            Self::Expected => "expected",
            Self::Unexpected => "unexpected",
        })
    }
}

/// Whether re-running against the same backend might succeed.
///
/// Nothing here retries; the class only informs the failure report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorClass {
    /// Transient: timeouts, refused connections, 5xx and 429 responses.
    Retriable,
    /// Permanent for the given input.
    NonRetriable,
}

impl ErrorClass {
    /// Returns true when the error is considered retriable.
    #[must_use]
    pub const fn is_retriable(self) -> bool {
        matches!(self, Self::Retriable)
    }
}

impl fmt::Display for ErrorClass {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(if self.is_retriable() {
            "retriable"
        } else {
            "non-retriable"
        })
    }
}

/// Stable `namespace:code` identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ErrorCode {
    namespace: String,
    code: String,
}

impl ErrorCode {
    /// Create a new error code with a namespace and code.
    pub fn new(namespace: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            code: code.into(),
        }
    }

    /// `core:invalid_input`.
    pub fn invalid_input() -> Self {
        Self::new("core", "invalid_input")
    }

    /// `core:timeout`.
    pub fn timeout() -> Self {
        Self::new("core", "timeout")
    }

    /// `core:io`.
    pub fn io() -> Self {
        Self::new("core", "io")
    }

    /// Returns the namespace portion.
    #[must_use]
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Returns the code identifier.
    #[must_use]
    pub fn code(&self) -> &str {
        &self.code
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}:{}", self.namespace, self.code)
    }
}

/// Structured error returned by every fallible operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    /// Origin category.
    pub kind: ErrorKind,
    /// Retry classification.
    pub class: ErrorClass,
    /// Stable error code.
    pub code: ErrorCode,
    /// Human-readable error message.
    pub message: String,
    /// Diagnostic values such as `url`, `status`, `env_var` or `found`.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub metadata: ErrorMetadata,
}

impl ErrorEnvelope {
    /// An input error; never retriable.
    pub fn expected(code: ErrorCode, message: impl Into<String>) -> Self {
        Self::build(ErrorKind::Expected, ErrorClass::NonRetriable, code, message)
    }

    /// A transport or environment failure with an explicit classification.
    pub fn unexpected(code: ErrorCode, message: impl Into<String>, class: ErrorClass) -> Self {
        Self::build(ErrorKind::Unexpected, class, code, message)
    }

    fn build(kind: ErrorKind, class: ErrorClass, code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            kind,
            class,
            code,
            message: message.into(),
            metadata: ErrorMetadata::new(),
        }
    }

    /// Attach a single metadata entry, replacing any previous value.
    #[must_use]
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// Borrow a metadata value by key.
    #[must_use]
    pub fn metadata_value(&self, key: &str) -> Option<&str> {
        self.metadata.get(key).map(String::as_str)
    }
}

impl fmt::Display for ErrorEnvelope {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}: {}", self.code, self.message)?;
        if !self.metadata.is_empty() {
            let rendered = self
                .metadata
                .iter()
                .map(|(key, value)| format!("{key}={value}"))
                .collect::<Vec<_>>()
                .join(", ");
            write!(formatter, " [{rendered}]")?;
        }
        Ok(())
    }
}

impl std::error::Error for ErrorEnvelope {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_set_kind_and_class() {
        let expected = ErrorEnvelope::expected(ErrorCode::invalid_input(), "invalid");
        assert_eq!(expected.kind, ErrorKind::Expected);
        assert_eq!(expected.class, ErrorClass::NonRetriable);
        assert!(expected.metadata.is_empty());

        let unexpected =
            ErrorEnvelope::unexpected(ErrorCode::timeout(), "timeout", ErrorClass::Retriable);
        assert_eq!(unexpected.kind, ErrorKind::Unexpected);
        assert!(unexpected.class.is_retriable());
        assert_eq!(unexpected.code.namespace(), "core");
        assert_eq!(unexpected.code.code(), "timeout");
    }

    #[test]
    fn display_includes_sorted_metadata() {
        let error = ErrorEnvelope::expected(ErrorCode::new("jsonapi", "cardinality_mismatch"), "bad")
            .with_metadata("found", "2")
            .with_metadata("expected", "1");

        assert_eq!(
            error.to_string(),
            "jsonapi:cardinality_mismatch: bad [expected=1, found=2]"
        );
        assert_eq!(error.metadata_value("found"), Some("2"));
        assert_eq!(error.metadata_value("missing"), None);
    }

    #[test]
    fn envelopes_serialize_for_reports() -> Result<(), serde_json::Error> {
        let error = ErrorEnvelope::unexpected(ErrorCode::io(), "refused", ErrorClass::Retriable)
            .with_metadata("url", "http://localhost/jsonapi/node/page");
        let value = serde_json::to_value(&error)?;

        assert_eq!(value["kind"], "Unexpected");
        assert_eq!(value["code"]["namespace"], "core");
        assert_eq!(value["metadata"]["url"], "http://localhost/jsonapi/node/page");
        Ok(())
    }
}
