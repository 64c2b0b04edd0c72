//! # drupal-verify-domain
//!
//! Domain values shared by the JSON:API client and the test kit:
//!
//! - **Drupal types** - `DrupalType`, the `entity--bundle` label of a resource
//! - **Expected values** - `ExpectedPerson`, `ExpectedRepoObj`, ... loaded from
//!   JSON fixtures and compared against what Drupal serves
//!
//! ## Dependency Rules
//!
//! - Depends only on the `shared` crate
//! - No HTTP, filesystem, or environment access

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub use drupal_verify_shared::shared_crate_version;

// =============================================================================
// DOMAIN MODULES
// =============================================================================

pub mod drupal_type;
pub mod expected;

pub use drupal_type::{DrupalType, DrupalTypeError, TYPE_SEPARATOR};
pub use expected::{
    AgentAuthority, AuthorityLink, Expected, ExpectedAccessRights, ExpectedCollection,
    ExpectedCopyrightAndUse, ExpectedCorporateBody, ExpectedEntity, ExpectedFamily,
    ExpectedGenre, ExpectedGeolocation, ExpectedIslandoraAccessTerms, ExpectedLanguage,
    ExpectedMediaExtractedText, ExpectedMediaGeneric, ExpectedMediaImage,
    ExpectedMediaRemoteVideo, ExpectedPerson, ExpectedRepoObj, ExpectedResourceType,
    ExpectedSubject, ExpectedWithName, ExpectedWithTitle, FormattedText, LanguageString,
    LinkedAgent, MediaUri, ModelRef, NamedOrTitled, RelatedName, TitledLink,
};

/// Returns the domain crate version.
#[must_use]
pub const fn domain_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

// =============================================================================
// TESTS
// =============================================================================
