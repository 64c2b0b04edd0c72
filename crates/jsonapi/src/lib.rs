//! # drupal-verify-jsonapi
//!
//! Client side of Drupal's JSON:API for verification tests:
//!
//! - **URL builder** - `JsonApiUrl` composes `base/jsonapi/entity/bundle` queries
//! - **Auth policy** - `build_basic_auth` decides whether credentials are sent
//! - **Client** - `JsonApiClient` issues one GET per call and requires `200 OK`
//! - **Decoder** - `JsonApiResponse` normalizes `data` into a sequence and
//!   projects it into typed structures
//! - **Documents** - `Document`, `Resource`, `Relationship` projection targets
//!
//! ```no_run
//! use drupal_verify_config::DrupalConfig;
//! use drupal_verify_jsonapi::{Document, JsonApiClient};
//! use serde::Deserialize;
//!
//! #[derive(Debug, Default, Deserialize)]
//! struct Person {
//!     name: String,
//! }
//!
//! # async fn run() -> drupal_verify_shared::Result<()> {
//! let client = JsonApiClient::new(&DrupalConfig::new("https://islandora.traefik.me")?)?;
//! let request = client
//!     .request("taxonomy_term", "person")
//!     .with_filter("name", "Ansel Adams");
//! let person = client.get_single_as::<Document<Person>>(&request).await?.single()?;
//! assert_eq!(person.attributes.name, "Ansel Adams");
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod client;
pub mod document;
pub mod response;
pub mod url;

pub use auth::{BasicAuth, build_basic_auth};
pub use client::JsonApiClient;
pub use document::{
    Document, Relationship, RelationshipData, Relationships, Resource, ResourceIdentifier,
};
pub use response::{DataPayload, JsonApiInfo, JsonApiResponse, ResourceObject};
pub use crate::url::{JSONAPI_PATH, JsonApiUrl};

/// Returns the jsonapi crate version.
#[must_use]
pub const fn jsonapi_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn jsonapi_crate_compiles() {
        assert!(!jsonapi_crate_version().is_empty());
    }
}
