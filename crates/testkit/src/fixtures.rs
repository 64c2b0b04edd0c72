//! Loading expected-value fixtures.

use crate::locate::{LocateError, find_expected_json_in};
use drupal_verify_shared::{ErrorClass, ErrorCode, ErrorEnvelope, Result};
use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};

/// Directory of the JSON fixtures shipped with this crate.
#[must_use]
pub fn fixtures_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures")
}

/// Read and deserialize a fixture file.
pub fn load_expected<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<T> {
    let path = path.as_ref();
    let contents = fs::read(path).map_err(|error| {
        ErrorEnvelope::unexpected(
            ErrorCode::new("fixture", "read_failed"),
            format!("failed to read fixture {}: {error}", path.display()),
            ErrorClass::NonRetriable,
        )
        .with_metadata("path", path.display().to_string())
    })?;

    serde_json::from_slice(&contents).map_err(|error| {
        ErrorEnvelope::expected(
            ErrorCode::new("fixture", "parse_failed"),
            format!("failed to parse fixture {}: {error}", path.display()),
        )
        .with_metadata("path", path.display().to_string())
        .with_metadata("target", std::any::type_name::<T>())
    })
}

/// Locate `name` under `root` and load it.
pub fn find_and_load<T: DeserializeOwned>(
    root: &Path,
    name: &str,
    searchdirs: &[&str],
) -> Result<T> {
    let relative = find_expected_json_in(root, name, searchdirs).map_err(ErrorEnvelope::from)?;
    load_expected(root.join(relative))
}

/// Load one of this crate's bundled fixtures by file name.
pub fn load_bundled<T: DeserializeOwned>(name: &str) -> Result<T> {
    find_and_load(&fixtures_dir(), name, &[])
}

/// Locate a bundled fixture and return its absolute path.
pub fn bundled_path(name: &str) -> std::result::Result<PathBuf, LocateError> {
    let root = fixtures_dir();
    find_expected_json_in(&root, name, &[]).map(|relative| root.join(relative))
}
