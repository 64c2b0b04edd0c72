//! Drupal resource type labels (`entity--bundle`).

use drupal_verify_shared::{ErrorCode, ErrorEnvelope};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Separator between the entity and bundle parts of a type label.
pub const TYPE_SEPARATOR: &str = "--";

/// Validation failures for Drupal type labels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrupalTypeError {
    /// The label has no `--` separator (e.g. a bundle-less `user`).
    MissingSeparator {
        /// Raw label.
        input: String,
    },
    /// The label has more than one `--` separator.
    MultipleSeparators {
        /// Raw label.
        input: String,
    },
    /// Entity or bundle part is empty after trimming.
    EmptyPart {
        /// Raw label.
        input: String,
        /// Which part was empty (`entity` or `bundle`).
        part: &'static str,
    },
}

impl DrupalTypeError {
    fn input(&self) -> &str {
        match self {
            Self::MissingSeparator { input }
            | Self::MultipleSeparators { input }
            | Self::EmptyPart { input, .. } => input,
        }
    }
}

impl fmt::Display for DrupalTypeError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingSeparator { input } => write!(
                formatter,
                "Drupal type `{input}` must contain exactly one `{TYPE_SEPARATOR}` separator"
            ),
            Self::MultipleSeparators { input } => write!(
                formatter,
                "Drupal type `{input}` contains more than one `{TYPE_SEPARATOR}` separator"
            ),
            Self::EmptyPart { input, part } => {
                write!(formatter, "Drupal type `{input}` has an empty {part}")
            },
        }
    }
}

impl std::error::Error for DrupalTypeError {}

impl From<DrupalTypeError> for ErrorEnvelope {
    fn from(error: DrupalTypeError) -> Self {
        let input = error.input().to_owned();
        let mut envelope = Self::expected(
            ErrorCode::new("domain", "invalid_drupal_type"),
            error.to_string(),
        )
        .with_metadata("input", input);
        if let DrupalTypeError::EmptyPart { part, .. } = error {
            envelope = envelope.with_metadata("part", part);
        }
        envelope
    }
}

/// Entity type and bundle of a Drupal resource.
///
/// JSON:API reports the type of every resource as a single label, e.g.
/// `"type": "taxonomy_term--person"`, where `taxonomy_term` is the entity and
/// `person` the bundle.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DrupalType {
    label: Box<str>,
    split: usize,
}

impl DrupalType {
    /// Parse a `entity--bundle` label.
    pub fn parse(input: impl AsRef<str>) -> Result<Self, DrupalTypeError> {
        let raw = input.as_ref();
        let trimmed = raw.trim();
        let Some((entity, bundle)) = trimmed.split_once(TYPE_SEPARATOR) else {
            return Err(DrupalTypeError::MissingSeparator {
                input: raw.to_owned(),
            });
        };
        if bundle.contains(TYPE_SEPARATOR) {
            return Err(DrupalTypeError::MultipleSeparators {
                input: raw.to_owned(),
            });
        }
        if entity.trim().is_empty() {
            return Err(DrupalTypeError::EmptyPart {
                input: raw.to_owned(),
                part: "entity",
            });
        }
        if bundle.trim().is_empty() {
            return Err(DrupalTypeError::EmptyPart {
                input: raw.to_owned(),
                part: "bundle",
            });
        }

        Ok(Self {
            label: trimmed.to_owned().into_boxed_str(),
            split: entity.len(),
        })
    }

    /// Compose a label from its entity and bundle parts.
    pub fn new(entity: &str, bundle: &str) -> Result<Self, DrupalTypeError> {
        Self::parse(format!("{entity}{TYPE_SEPARATOR}{bundle}"))
    }

    /// The entity (e.g. `taxonomy_term`, `node`, `media`).
    #[must_use]
    pub fn entity(&self) -> &str {
        self.label.get(..self.split).unwrap_or_default()
    }

    /// The bundle (e.g. `person`, `islandora_object`, `document`).
    #[must_use]
    pub fn bundle(&self) -> &str {
        self.label
            .get(self.split + TYPE_SEPARATOR.len()..)
            .unwrap_or_default()
    }

    /// Access the full label.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.label
    }
}

impl AsRef<str> for DrupalType {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for DrupalType {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl TryFrom<String> for DrupalType {
    type Error = DrupalTypeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl TryFrom<&str> for DrupalType {
    type Error = DrupalTypeError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<DrupalType> for String {
    fn from(value: DrupalType) -> Self {
        value.label.into_string()
    }
}
