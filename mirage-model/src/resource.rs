//! Resource objects and relationship linkage.

use crate::identifier::{ResourceId, ResourceIdentifier};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// The attribute map of a resource object. Arbitrary JSON per field; the
/// structure is owned by the remote API, not by Mirage.
pub type Attributes = Map<String, Value>;

/// Declared relationships of a resource object, by relationship name.
pub type Relationships = BTreeMap<String, RelationshipObject>;

/// One record mirrored from a remote collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceObject {
    /// The resource type name.
    #[serde(rename = "type")]
    pub resource_type: String,
    /// The server-assigned id.
    pub id: ResourceId,
    /// Attribute map, absent when the response carried none.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attributes: Option<Attributes>,
    /// Declared relationships, absent when the response carried none.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relationships: Option<Relationships>,
}

impl ResourceObject {
    /// Creates a bare record with no attributes or relationships.
    pub fn new(resource_type: impl Into<String>, id: impl Into<ResourceId>) -> Self {
        Self {
            resource_type: resource_type.into(),
            id: id.into(),
            attributes: None,
            relationships: None,
        }
    }

    /// Sets the attribute map.
    #[must_use]
    pub fn with_attributes(mut self, attributes: Attributes) -> Self {
        self.attributes = Some(attributes);
        self
    }

    /// Sets the relationship map.
    #[must_use]
    pub fn with_relationships(mut self, relationships: Relationships) -> Self {
        self.relationships = Some(relationships);
        self
    }

    /// Adds a single relationship.
    #[must_use]
    pub fn with_relationship(
        mut self,
        name: impl Into<String>,
        relationship: RelationshipObject,
    ) -> Self {
        self.relationships
            .get_or_insert_with(Relationships::new)
            .insert(name.into(), relationship);
        self
    }

    /// Extracts the (type, id) address of this record.
    #[must_use]
    pub fn identifier(&self) -> ResourceIdentifier {
        ResourceIdentifier {
            resource_type: self.resource_type.clone(),
            id: self.id.clone(),
        }
    }

    /// Shallow merge of a later fetch of the same record: top-level keys
    /// present on `other` replace the stored ones wholesale. Attribute maps
    /// are never merged field-by-field.
    pub fn merge_from(&mut self, other: ResourceObject) {
        if other.attributes.is_some() {
            self.attributes = other.attributes;
        }
        if other.relationships.is_some() {
            self.relationships = other.relationships;
        }
    }

    /// Looks up a single attribute value.
    pub fn attribute(&self, name: &str) -> Option<&Value> {
        self.attributes.as_ref().and_then(|attrs| attrs.get(name))
    }

    /// Looks up a declared relationship by name.
    pub fn relationship(&self, name: &str) -> Option<&RelationshipObject> {
        self.relationships.as_ref().and_then(|rels| rels.get(name))
    }
}

/// Linkage payload of one declared relationship.
///
/// Three wire shapes are distinguished: the `data` key absent (relationship
/// not delivered on this response), explicit `null` (to-one confirmed
/// empty), and an identifier or identifier list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RelationshipObject {
    /// Identifier linkage; `None` when the `data` key was absent.
    #[serde(
        default,
        deserialize_with = "deserialize_linkage",
        skip_serializing_if = "Option::is_none"
    )]
    pub data: Option<RelationshipData>,
}

/// Keeps an explicit `"data": null` distinct from an absent `data` key: a
/// plain `Option` would collapse both to `None`. A present `null` is to-one
/// linkage confirmed empty.
fn deserialize_linkage<'de, D>(deserializer: D) -> Result<Option<RelationshipData>, D::Error>
where
    D: Deserializer<'de>,
{
    let linkage = Option::<RelationshipData>::deserialize(deserializer)?;
    Ok(Some(linkage.unwrap_or(RelationshipData::One(None))))
}

impl RelationshipObject {
    /// A to-one relationship pointing at `identifier`.
    pub fn to_one(identifier: ResourceIdentifier) -> Self {
        Self {
            data: Some(RelationshipData::One(Some(identifier))),
        }
    }

    /// A to-one relationship confirmed empty (`data: null` on the wire).
    pub fn empty_to_one() -> Self {
        Self {
            data: Some(RelationshipData::One(None)),
        }
    }

    /// A to-many relationship pointing at `identifiers`, in order.
    pub fn to_many(identifiers: Vec<ResourceIdentifier>) -> Self {
        Self {
            data: Some(RelationshipData::Many(identifiers)),
        }
    }
}

/// Identifier linkage of a relationship: a single (possibly null)
/// identifier, or an ordered list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RelationshipData {
    /// To-one linkage; `None` is an explicit `null` on the wire.
    One(Option<ResourceIdentifier>),
    /// To-many linkage, order-preserving.
    Many(Vec<ResourceIdentifier>),
}

/// Caller-side input to `create`: a record without a server-assigned id.
/// The store injects its own resource type when building the request body.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResourceDraft {
    /// Attribute map for the new record.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attributes: Option<Attributes>,
    /// Relationships to set on the new record.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relationships: Option<Relationships>,
}

impl ResourceDraft {
    /// Creates an empty draft.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the attribute map.
    #[must_use]
    pub fn with_attributes(mut self, attributes: Attributes) -> Self {
        self.attributes = Some(attributes);
        self
    }

    /// Sets the relationship map.
    #[must_use]
    pub fn with_relationships(mut self, relationships: Relationships) -> Self {
        self.relationships = Some(relationships);
        self
    }
}
