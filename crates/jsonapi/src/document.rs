//! Typed JSON:API document shapes for projection targets.
//!
//! Callers describe only the attributes and relationships they assert on;
//! everything else in the document is ignored during projection.

use crate::response::cardinality_mismatch;
use drupal_verify_domain::DrupalType;
use drupal_verify_shared::Result;
use serde::{Deserialize, Serialize};

/// A projected document: the normalized `data` sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(
    deserialize = "A: Deserialize<'de> + Default, R: Deserialize<'de> + Default",
    serialize = "A: Serialize, R: Serialize"
))]
pub struct Document<A, R = Relationships> {
    /// Resources in response order.
    pub data: Vec<Resource<A, R>>,
}

impl<A, R> Document<A, R> {
    /// The only resource of the document.
    pub fn single(self) -> Result<Resource<A, R>> {
        let found = self.data.len();
        let mut resources = self.data.into_iter();
        match (resources.next(), resources.next()) {
            (Some(resource), None) => Ok(resource),
            _ => Err(cardinality_mismatch(found)),
        }
    }

    /// Number of resources.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the document has no resources.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// One resource object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(
    deserialize = "A: Deserialize<'de> + Default, R: Deserialize<'de> + Default",
    serialize = "A: Serialize, R: Serialize"
))]
pub struct Resource<A, R = Relationships> {
    /// Drupal type label.
    #[serde(rename = "type")]
    pub kind: DrupalType,
    /// Resource UUID.
    pub id: String,
    /// Attributes, defaulted when absent.
    #[serde(default)]
    pub attributes: A,
    /// Relationships, defaulted when absent.
    #[serde(default)]
    pub relationships: R,
}

impl<A, R> Resource<A, R> {
    /// The `{type, id}` reference to this resource.
    #[must_use]
    pub fn identifier(&self) -> ResourceIdentifier {
        ResourceIdentifier {
            kind: self.kind.clone(),
            id: self.id.clone(),
        }
    }
}

/// Untyped relationships keyed by field name.
pub type Relationships = std::collections::BTreeMap<String, Relationship>;

/// A `{type, id}` reference to another resource.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResourceIdentifier {
    /// Drupal type label of the target.
    #[serde(rename = "type")]
    pub kind: DrupalType,
    /// UUID of the target.
    pub id: String,
}

/// A relationship field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relationship {
    /// Linkage; `None` for an empty to-one relationship.
    #[serde(default)]
    pub data: Option<RelationshipData>,
}

impl Relationship {
    /// Identifiers in document order.
    #[must_use]
    pub fn identifiers(&self) -> Vec<&ResourceIdentifier> {
        match &self.data {
            None => Vec::new(),
            Some(RelationshipData::One(identifier)) => vec![identifier],
            Some(RelationshipData::Many(identifiers)) => identifiers.iter().collect(),
        }
    }
}

/// Relationship linkage: a single identifier or a list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RelationshipData {
    /// To-one linkage.
    One(ResourceIdentifier),
    /// To-many linkage.
    Many(Vec<ResourceIdentifier>),
}
