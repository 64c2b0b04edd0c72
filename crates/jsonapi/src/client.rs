//! HTTP client for Drupal's JSON:API.
//!
//! One GET per call, no retry. Anything other than `200 OK` is a failure and
//! the body of a failed request is never decoded.

use crate::auth::BasicAuth;
use crate::document::{Relationship, ResourceIdentifier};
use crate::response::JsonApiResponse;
use crate::url::JsonApiUrl;
use bytes::Bytes;
use drupal_verify_config::DrupalConfig;
use drupal_verify_shared::{ErrorClass, ErrorCode, ErrorEnvelope, Result, SecretString};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use std::time::Duration;
use url::Url;

/// JSON:API client bound to one Drupal site.
#[derive(Debug, Clone)]
pub struct JsonApiClient {
    client: reqwest::Client,
    base_url: Box<str>,
    username: Option<Box<str>>,
    password: Option<SecretString>,
}

impl JsonApiClient {
    /// Build a client from connection settings.
    pub fn new(config: &DrupalConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|error| {
                ErrorEnvelope::unexpected(
                    ErrorCode::new("jsonapi", "client_init_failed"),
                    format!("failed to build JSON:API client: {error}"),
                    ErrorClass::NonRetriable,
                )
            })?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            username: config.username.clone(),
            password: config.password.clone(),
        })
    }

    /// Base URL of the site.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Start a query against `entity`/`bundle`, seeded with the configured
    /// base URL and default credentials.
    pub fn request(&self, entity: impl Into<Box<str>>, bundle: impl Into<Box<str>>) -> JsonApiUrl {
        self.with_default_auth(JsonApiUrl::new(self.base_url.clone(), entity, bundle))
    }

    /// GET `url` and return the body of a `200 OK` response.
    pub async fn get_resource(&self, url: &Url, auth: Option<&BasicAuth>) -> Result<Bytes> {
        let mut request = self.client.get(url.clone());
        if let Some(auth) = auth {
            request = request.basic_auth(auth.username(), Some(auth.password()));
            tracing::info!(url = %url, authenticated = true, "Retrieving (with Authorization: basic)");
        } else {
            tracing::info!(url = %url, authenticated = false, "Retrieving");
        }

        let response = request
            .send()
            .await
            .map_err(|error| map_reqwest_error(&error, url))?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(map_status_error(status, url));
        }

        response
            .bytes()
            .await
            .map_err(|error| map_reqwest_error(&error, url))
    }

    /// Fetch and decode a query.
    pub async fn get(&self, request: &JsonApiUrl) -> Result<JsonApiResponse> {
        let url = request.to_url()?;
        let body = self
            .get_resource(&url, request.basic_auth().as_ref())
            .await?;
        JsonApiResponse::from_slice(&body).map_err(|error| error.with_metadata("url", url.as_str()))
    }

    /// Fetch and decode a query that must match exactly one resource.
    pub async fn get_single(&self, request: &JsonApiUrl) -> Result<JsonApiResponse> {
        let url = request.to_url()?;
        let body = self
            .get_resource(&url, request.basic_auth().as_ref())
            .await?;
        JsonApiResponse::single_from_slice(&body)
            .map_err(|error| error.with_metadata("url", url.as_str()))
    }

    /// Fetch, decode and project a query.
    pub async fn get_as<T: DeserializeOwned>(&self, request: &JsonApiUrl) -> Result<T> {
        self.get(request).await?.project()
    }

    /// Fetch, decode and project a query that must match exactly one resource.
    pub async fn get_single_as<T: DeserializeOwned>(&self, request: &JsonApiUrl) -> Result<T> {
        self.get_single(request).await?.project()
    }

    /// Fetch the resource a relationship points at and project it.
    pub async fn resolve<T: DeserializeOwned>(&self, identifier: &ResourceIdentifier) -> Result<T> {
        let request =
            self.with_default_auth(JsonApiUrl::for_identifier(self.base_url.clone(), identifier));
        self.get_single_as(&request).await
    }

    /// Resolve every identifier of a relationship, in order.
    pub async fn resolve_all<T: DeserializeOwned>(
        &self,
        relationship: &Relationship,
    ) -> Result<Vec<T>> {
        let identifiers = relationship.identifiers();
        let mut resolved = Vec::with_capacity(identifiers.len());
        for identifier in identifiers {
            resolved.push(self.resolve(identifier).await?);
        }
        Ok(resolved)
    }

    fn with_default_auth(&self, request: JsonApiUrl) -> JsonApiUrl {
        JsonApiUrl {
            username: self.username.clone(),
            password: self.password.clone(),
            ..request
        }
    }
}

fn map_status_error(status: StatusCode, url: &Url) -> ErrorEnvelope {
    let class = if status.is_server_error() || status == StatusCode::TOO_MANY_REQUESTS {
        ErrorClass::Retriable
    } else {
        ErrorClass::NonRetriable
    };
    ErrorEnvelope::unexpected(
        ErrorCode::new("jsonapi", "unexpected_status"),
        format!("{} status encountered when requesting {url}", status.as_u16()),
        class,
    )
    .with_metadata("status", status.as_u16().to_string())
    .with_metadata("url", url.as_str())
}

fn map_reqwest_error(error: &reqwest::Error, url: &Url) -> ErrorEnvelope {
    let envelope = if error.is_timeout() {
        ErrorEnvelope::unexpected(
            ErrorCode::timeout(),
            format!("request to {url} timed out"),
            ErrorClass::Retriable,
        )
    } else if error.is_connect() {
        ErrorEnvelope::unexpected(
            ErrorCode::io(),
            format!("connection to {url} failed: {error}"),
            ErrorClass::Retriable,
        )
    } else {
        ErrorEnvelope::unexpected(
            ErrorCode::new("jsonapi", "request_failed"),
            format!("encountered error requesting {url}: {error}"),
            ErrorClass::NonRetriable,
        )
    };
    envelope.with_metadata("url", url.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> Result<DrupalConfig> {
        Ok(DrupalConfig::new("http://localhost:8000/")?.with_basic_auth("admin", "moo"))
    }

    #[test]
    fn request_is_seeded_from_configuration() -> Result<()> {
        let client = JsonApiClient::new(&config()?)?;
        let request = client.request("taxonomy_term", "person");

        assert_eq!(client.base_url(), "http://localhost:8000/");
        assert_eq!(
            request.to_url()?.as_str(),
            "http://localhost:8000/jsonapi/taxonomy_term/person"
        );
        assert_eq!(
            request.basic_auth().as_ref().map(BasicAuth::username),
            Some("admin")
        );
        Ok(())
    }

    #[test]
    fn status_errors_carry_status_and_url() -> Result<()> {
        let url = Url::parse("http://localhost/jsonapi/node/page").map_err(|error| {
            ErrorEnvelope::expected(ErrorCode::invalid_input(), error.to_string())
        })?;

        let error = map_status_error(StatusCode::NOT_FOUND, &url);
        assert_eq!(error.code, ErrorCode::new("jsonapi", "unexpected_status"));
        assert_eq!(error.metadata_value("status"), Some("404"));
        assert_eq!(error.metadata_value("url"), Some(url.as_str()));
        assert!(!error.class.is_retriable());

        let error = map_status_error(StatusCode::SERVICE_UNAVAILABLE, &url);
        assert!(error.class.is_retriable());
        Ok(())
    }
}
