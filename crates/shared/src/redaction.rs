//! Secret detection and redaction utilities.
//!
//! Basic-auth passwords travel from the environment into request builders;
//! these helpers keep them out of `Debug` output, log lines and error
//! metadata.

/// The redacted placeholder string.
pub const REDACTED: &str = "[REDACTED]";

/// Checks if a key/variable name likely refers to a secret.
///
/// # Examples
///
/// ```
/// use drupal_verify_shared::is_secret_key;
///
/// assert!(is_secret_key("DRUPAL_PASSWORD"));
/// assert!(is_secret_key("api_token"));
/// assert!(!is_secret_key("DRUPAL_BASE_URL"));
/// ```
pub fn is_secret_key(key: &str) -> bool {
    let key = key.to_ascii_uppercase();
    key.contains("KEY")
        || key.contains("TOKEN")
        || key.contains("SECRET")
        || key.contains("PASSWORD")
        || key.contains("CREDENTIAL")
        || key.contains("AUTH")
}

/// Redacts a value if the key is likely a secret.
///
/// ```
/// use drupal_verify_shared::redact_if_secret;
///
/// assert_eq!(redact_if_secret("DRUPAL_PASSWORD", "moo"), "[REDACTED]");
/// assert_eq!(redact_if_secret("DRUPAL_USERNAME", "admin"), "admin");
/// ```
pub fn redact_if_secret(key: &str, value: &str) -> String {
    if is_secret_key(key) {
        REDACTED.to_string()
    } else {
        value.to_string()
    }
}

/// A secret string wrapper that redacts on Display/Debug.
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct SecretString(Box<str>);

impl SecretString {
    /// Wrap a secret value.
    pub fn new(value: impl Into<Box<str>>) -> Self {
        Self(value.into())
    }

    /// Borrow the underlying secret.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for SecretString {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(REDACTED)
    }
}

impl std::fmt::Display for SecretString {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(REDACTED)
    }
}

impl AsRef<str> for SecretString {
    fn as_ref(&self) -> &str {
        self.expose()
    }
}

impl From<&str> for SecretString {
    fn from(value: &str) -> Self {
        Self(value.into())
    }
}

impl From<Box<str>> for SecretString {
    fn from(value: Box<str>) -> Self {
        Self(value)
    }
}

impl From<String> for SecretString {
    fn from(value: String) -> Self {
        Self(value.into_boxed_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_common_secret_patterns() {
        assert!(is_secret_key("DRUPAL_PASSWORD"));
        assert!(is_secret_key("password"));
        assert!(is_secret_key("ACCESS_TOKEN"));
        assert!(is_secret_key("CLIENT_SECRET"));
        assert!(is_secret_key("basic_auth"));
    }

    #[test]
    fn rejects_non_secret_patterns() {
        assert!(!is_secret_key("DRUPAL_BASE_URL"));
        assert!(!is_secret_key("DRUPAL_TEST_BASEDIR"));
        assert!(!is_secret_key("BASE_ASSETS_URL"));
        assert!(!is_secret_key("DRUPAL_USERNAME"));
        assert!(!is_secret_key("DRUPAL_TIMEOUT_MS"));
    }

    #[test]
    fn secret_string_redacts_display_and_debug() {
        let secret = SecretString::new("moo");
        assert_eq!(secret.to_string(), REDACTED);
        assert_eq!(format!("{secret:?}"), REDACTED);
        assert_eq!(secret.expose(), "moo");
    }
}
