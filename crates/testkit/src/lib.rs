//! # drupal-verify-testkit
//!
//! Test helpers for verification suites.
//! This crate depends on `shared` only; fixtures deserialize into any
//! `serde` type, usually the `domain` expected-value model.

pub mod fatal;
pub mod fixtures;
pub mod locate;
pub mod tracing_init;

pub use fatal::OrFail;
pub use fixtures::{bundled_path, find_and_load, fixtures_dir, load_bundled, load_expected};
pub use locate::{
    EXPECTED_DIR, LocateError, VERIFICATION_DIR, find_expected_json, find_expected_json_in,
    find_in_test_basedir,
};
pub use tracing_init::init_test_tracing;

/// Returns the testkit crate version.
#[must_use]
pub const fn testkit_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;
    use drupal_verify_shared::shared_crate_version;

    #[test]
    fn testkit_crate_compiles() {
        let version = testkit_crate_version();
        assert!(!version.is_empty());
    }

    #[test]
    fn testkit_can_use_shared() {
        assert!(!shared_crate_version().is_empty());
    }

    #[test]
    fn fixtures_dir_is_bundled() {
        assert!(fixtures_dir().join(EXPECTED_DIR).is_dir());
    }

    #[test]
    fn tracing_init_is_idempotent() {
        init_test_tracing();
        init_test_tracing();
    }
}
