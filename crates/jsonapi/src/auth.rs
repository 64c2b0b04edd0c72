//! Basic-auth policy for JSON:API requests.

use drupal_verify_shared::SecretString;

/// Basic-auth credentials sent with a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BasicAuth {
    username: Box<str>,
    password: SecretString,
}

impl BasicAuth {
    /// Username, exactly as supplied.
    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Password, exactly as supplied.
    #[must_use]
    pub fn password(&self) -> &str {
        self.password.expose()
    }
}

/// Decide whether a request carries basic-auth credentials.
///
/// A username that is absent, empty or whitespace-only means no
/// `Authorization` header, whatever the password. Otherwise the username and
/// password are used verbatim; an absent password is sent as empty.
///
/// ```
/// use drupal_verify_jsonapi::build_basic_auth;
///
/// assert!(build_basic_auth(Some("  "), Some("moo")).is_none());
/// let auth = build_basic_auth(Some("admin"), None);
/// assert_eq!(auth.map(|auth| auth.password().len()), Some(0));
/// ```
pub fn build_basic_auth(username: Option<&str>, password: Option<&str>) -> Option<BasicAuth> {
    let username = username.filter(|value| !value.trim().is_empty())?;
    Some(BasicAuth {
        username: username.into(),
        password: SecretString::new(password.unwrap_or_default()),
    })
}
