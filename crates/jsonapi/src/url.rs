//! JSON:API request descriptors and URL composition.

use crate::auth::{BasicAuth, build_basic_auth};
use crate::document::ResourceIdentifier;
use drupal_verify_domain::DrupalType;
use drupal_verify_shared::{ErrorCode, ErrorEnvelope, Result, SecretString};
use std::fmt;
use url::Url;

/// Path prefix of Drupal's JSON:API module.
pub const JSONAPI_PATH: &str = "jsonapi";

/// Components of a JSON:API query against one entity type and bundle.
///
/// `filter` and `value` match a single field, e.g. `title` and
/// `The Adventures of Sherlock Holmes`. Anything more complex goes in
/// `raw_filter`, which is appended after `?` as-is and makes `filter` and
/// `value` ignored, for example:
///
/// ```text
/// filter[name-group][condition][operator]=ENDS_WITH&filter[name-group][condition][path]=name
/// ```
///
/// `value` is inserted into the query without escaping. Spaces are
/// percent-encoded on parse, but `&` starts a new pair, `+` decodes as a space
/// and `#` starts a fragment. Values containing those characters must be
/// encoded by the caller and passed through `raw_filter`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JsonApiUrl {
    /// Site base URL; trailing slashes are ignored.
    pub base_url: Box<str>,
    /// Drupal entity, e.g. `taxonomy_term`.
    pub entity: Box<str>,
    /// Drupal bundle, e.g. `person`.
    pub bundle: Box<str>,
    /// Resource UUID appended as a final path segment.
    pub resource_id: Option<Box<str>>,
    /// Field to match, e.g. `name` or `id`.
    pub filter: Option<Box<str>>,
    /// Value the filter field must match.
    pub value: Option<Box<str>>,
    /// Complete query string used verbatim.
    pub raw_filter: Option<Box<str>>,
    /// Basic-auth username; blank means unauthenticated.
    pub username: Option<Box<str>>,
    /// Basic-auth password.
    pub password: Option<SecretString>,
}

impl JsonApiUrl {
    /// Describe a query against `entity`/`bundle` on the given site.
    pub fn new(
        base_url: impl Into<Box<str>>,
        entity: impl Into<Box<str>>,
        bundle: impl Into<Box<str>>,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            entity: entity.into(),
            bundle: bundle.into(),
            ..Self::default()
        }
    }

    /// Describe a query against the entity and bundle of a Drupal type.
    pub fn for_type(base_url: impl Into<Box<str>>, drupal_type: &DrupalType) -> Self {
        Self::new(base_url, drupal_type.entity(), drupal_type.bundle())
    }

    /// Describe the canonical URL of a referenced resource.
    pub fn for_identifier(base_url: impl Into<Box<str>>, identifier: &ResourceIdentifier) -> Self {
        Self::for_type(base_url, &identifier.kind).with_resource_id(identifier.id.as_str())
    }

    /// Address a single resource by UUID.
    #[must_use]
    pub fn with_resource_id(mut self, id: impl Into<Box<str>>) -> Self {
        self.resource_id = Some(id.into());
        self
    }

    /// Match `field` against `value`.
    #[must_use]
    pub fn with_filter(mut self, field: impl Into<Box<str>>, value: impl Into<Box<str>>) -> Self {
        self.filter = Some(field.into());
        self.value = Some(value.into());
        self
    }

    /// Use a complete query string instead of `filter`/`value`.
    #[must_use]
    pub fn with_raw_filter(mut self, raw_filter: impl Into<Box<str>>) -> Self {
        self.raw_filter = Some(raw_filter.into());
        self
    }

    /// Attach basic-auth credentials.
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

    /// Drop any credentials.
    #[must_use]
    pub fn without_auth(mut self) -> Self {
        self.username = None;
        self.password = None;
        self
    }

    /// Credentials to send, if the username is non-blank.
    #[must_use]
    pub fn basic_auth(&self) -> Option<BasicAuth> {
        build_basic_auth(
            self.username.as_deref(),
            self.password.as_ref().map(SecretString::expose),
        )
    }

    /// Compose `base/jsonapi/entity/bundle[/id][?query]`.
    pub fn to_url(&self) -> Result<Url> {
        let base_url = required_component("base_url", &self.base_url)?;
        let entity = required_component("entity", &self.entity)?;
        let bundle = required_component("bundle", &self.bundle)?;

        let mut composed = format!(
            "{}/{JSONAPI_PATH}/{entity}/{bundle}",
            base_url.trim_end_matches('/')
        );
        if let Some(id) = non_blank(self.resource_id.as_deref()) {
            composed.push('/');
            composed.push_str(id);
        }

        if let Some(raw_filter) = non_empty(self.raw_filter.as_deref()) {
            composed.push('?');
            composed.push_str(raw_filter);
        } else if let Some(filter) = non_empty(self.filter.as_deref()) {
            let value = self.value.as_deref().unwrap_or_default();
            composed.push_str(&format!("?filter[{filter}]={value}"));
        }

        Url::parse(&composed).map_err(|error| {
            ErrorEnvelope::expected(
                ErrorCode::new("jsonapi", "invalid_url"),
                format!("`{composed}` is not a valid absolute URL: {error}"),
            )
            .with_metadata("url", composed.clone())
        })
    }
}

impl fmt::Display for JsonApiUrl {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_url() {
            Ok(url) => formatter.write_str(url.as_str()),
            Err(error) => write!(formatter, "<invalid JSON:API url: {}>", error.message),
        }
    }
}

fn required_component<'a>(name: &'static str, value: &'a str) -> Result<&'a str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ErrorEnvelope::expected(
            ErrorCode::new("jsonapi", "invalid_url_component"),
            format!("{name} must not be empty"),
        )
        .with_metadata("component", name));
    }
    Ok(trimmed)
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|value| !value.is_empty())
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}
