//! Locate expected-value fixtures on disk without hard-coded paths.
//!
//! Tests run from an IDE start in the crate directory, while a suite runner
//! may start several levels above it. Both find the same fixture by walking
//! the tree in lexical order and matching on file name.

use drupal_verify_shared::{ErrorClass, ErrorCode, ErrorEnvelope};
use std::fs;
use std::io;
use std::path::{Path, PathBuf, is_separator};
use thiserror::Error;

/// Directory name holding expected-value fixtures.
pub const EXPECTED_DIR: &str = "expected";
/// Path from a test-suite base directory to its fixture directory.
pub const VERIFICATION_DIR: &str = "verification";

/// Failures while locating a fixture.
#[derive(Debug, Error)]
pub enum LocateError {
    /// A file name or search directory contained a path separator.
    #[error("supplied {role} '{value}' must not contain a path separator")]
    PathSeparator {
        /// `name` or `searchdir`.
        role: &'static str,
        /// Offending value.
        value: String,
    },
    /// No matching file was found.
    #[error("could not locate file '{name}' under {}", .root.display())]
    NotFound {
        /// File name searched for.
        name: String,
        /// Walk root.
        root: PathBuf,
        /// Search directories, if any.
        searchdirs: Vec<String>,
    },
    /// Reading a directory failed mid-walk.
    #[error("unexpected error when searching {}: {source}", .path.display())]
    Walk {
        /// Directory being read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
}

impl From<LocateError> for ErrorEnvelope {
    fn from(error: LocateError) -> Self {
        let message = error.to_string();
        match error {
            LocateError::PathSeparator { role, value } => {
                Self::expected(ErrorCode::new("fixture", "path_separator"), message)
                    .with_metadata("role", role)
                    .with_metadata("value", value)
            },
            LocateError::NotFound {
                name,
                root,
                searchdirs,
            } => Self::expected(ErrorCode::new("fixture", "not_found"), message)
                .with_metadata("name", name)
                .with_metadata("root", root.display().to_string())
                .with_metadata("searchdirs", searchdirs.join(",")),
            LocateError::Walk { path, .. } => Self::unexpected(
                ErrorCode::io(),
                message,
                ErrorClass::NonRetriable,
            )
            .with_metadata("path", path.display().to_string()),
        }
    }
}

/// Find `name` starting from the working directory.
///
/// See [`find_expected_json_in`]; the returned path is relative to the
/// working directory.
pub fn find_expected_json(name: &str, searchdirs: &[&str]) -> Result<PathBuf, LocateError> {
    find_expected_json_in(Path::new("."), name, searchdirs)
}

/// Find the first regular file called `name` under `root`.
///
/// Neither `name` nor any `searchdirs` entry may contain a path separator.
/// Without search dirs the whole tree is searched. With search dirs, only
/// the subtrees of directories whose relative path contains one of them as
/// a component are searched, in walk order. The returned path is relative to
/// `root`.
pub fn find_expected_json_in(
    root: &Path,
    name: &str,
    searchdirs: &[&str],
) -> Result<PathBuf, LocateError> {
    reject_separator("name", name)?;
    for dir in searchdirs {
        reject_separator("searchdir", dir)?;
    }

    let basedirs = if searchdirs.is_empty() {
        vec![PathBuf::new()]
    } else {
        let mut found = Vec::new();
        collect_basedirs(root, &PathBuf::new(), searchdirs, &mut found)?;
        found
    };

    for basedir in &basedirs {
        if let Some(path) = find_file(root, basedir, name)? {
            tracing::debug!(name, path = %path.display(), "located fixture");
            return Ok(path);
        }
    }

    Err(LocateError::NotFound {
        name: name.to_owned(),
        root: root.to_path_buf(),
        searchdirs: searchdirs.iter().map(ToString::to_string).collect(),
    })
}

/// Resolve `name` through a test-suite base directory.
///
/// When a directory called `test_basedir` exists under `root`, the result is
/// `<basedir>/verification/expected/<name>`. Otherwise the first directory
/// called `expected` is used, which is the layout seen when running from
/// inside the base directory. The file itself is not checked.
pub fn find_in_test_basedir(
    root: &Path,
    test_basedir: &str,
    name: &str,
) -> Result<PathBuf, LocateError> {
    reject_separator("name", name)?;
    reject_separator("searchdir", test_basedir)?;

    if let Some(basedir) = find_dir(root, &PathBuf::new(), test_basedir)? {
        return Ok(basedir.join(VERIFICATION_DIR).join(EXPECTED_DIR).join(name));
    }
    if let Some(expected) = find_dir(root, &PathBuf::new(), EXPECTED_DIR)? {
        return Ok(expected.join(name));
    }

    Err(LocateError::NotFound {
        name: name.to_owned(),
        root: root.to_path_buf(),
        searchdirs: vec![test_basedir.to_owned(), EXPECTED_DIR.to_owned()],
    })
}

fn reject_separator(role: &'static str, value: &str) -> Result<(), LocateError> {
    if value.chars().any(is_separator) {
        return Err(LocateError::PathSeparator {
            role,
            value: value.to_owned(),
        });
    }
    Ok(())
}

struct Entry {
    name: String,
    is_dir: bool,
    is_file: bool,
}

// Entries sorted by name; symlinks are neither followed nor matched.
fn sorted_entries(root: &Path, relative: &Path) -> Result<Vec<Entry>, LocateError> {
    let dir = root.join(relative);
    let walk_error = |source| LocateError::Walk {
        path: dir.clone(),
        source,
    };

    let mut entries = Vec::new();
    for entry in fs::read_dir(&dir).map_err(walk_error)? {
        let entry = entry.map_err(walk_error)?;
        let file_type = entry.file_type().map_err(walk_error)?;
        let Ok(name) = entry.file_name().into_string() else {
            continue;
        };
        entries.push(Entry {
            name,
            is_dir: file_type.is_dir(),
            is_file: file_type.is_file(),
        });
    }
    entries.sort_by(|left, right| left.name.cmp(&right.name));
    Ok(entries)
}

fn collect_basedirs(
    root: &Path,
    relative: &Path,
    searchdirs: &[&str],
    found: &mut Vec<PathBuf>,
) -> Result<(), LocateError> {
    for entry in sorted_entries(root, relative)? {
        if !entry.is_dir {
            continue;
        }
        let path = relative.join(&entry.name);
        if path_contains(&path, searchdirs) {
            found.push(path);
        } else {
            tracing::debug!(dir = %path.display(), "skipping dir");
            collect_basedirs(root, &path, searchdirs, found)?;
        }
    }
    Ok(())
}

fn path_contains(path: &Path, candidates: &[&str]) -> bool {
    path.components().any(|component| {
        component
            .as_os_str()
            .to_str()
            .is_some_and(|element| candidates.contains(&element))
    })
}

fn find_file(root: &Path, relative: &Path, name: &str) -> Result<Option<PathBuf>, LocateError> {
    tracing::debug!(dir = %relative.display(), "searching dir");
    for entry in sorted_entries(root, relative)? {
        let path = relative.join(&entry.name);
        if entry.is_file && entry.name == name {
            return Ok(Some(path));
        }
        if entry.is_dir {
            if let Some(found) = find_file(root, &path, name)? {
                return Ok(Some(found));
            }
        }
    }
    Ok(None)
}

fn find_dir(root: &Path, relative: &Path, name: &str) -> Result<Option<PathBuf>, LocateError> {
    for entry in sorted_entries(root, relative)? {
        if !entry.is_dir {
            continue;
        }
        let path = relative.join(&entry.name);
        if entry.name == name {
            return Ok(Some(path));
        }
        if let Some(found) = find_dir(root, &path, name)? {
            return Ok(Some(found));
        }
    }
    Ok(None)
}
