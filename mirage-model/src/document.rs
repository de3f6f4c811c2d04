//! Response documents and write envelopes.
//!
//! A [`Document`] is what the transport hands back for every read: primary
//! data (one record or a collection), optionally a flat `included` array of
//! side-loaded related records, server metadata, and pagination cursors.

use crate::identifier::ResourceId;
use crate::resource::{Attributes, Relationships, ResourceDraft, ResourceObject};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A server response payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// The primary data of the response.
    pub data: PrimaryData,
    /// Side-loaded related records, flattened across all inclusion depths.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub included: Vec<ResourceObject>,
    /// Arbitrary server-supplied metadata (e.g. pagination totals).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<Value>,
    /// Pagination cursors, present on paged collection responses.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub links: Option<PageLinks>,
}

impl Document {
    /// A document whose primary data is a single record.
    pub fn one(record: ResourceObject) -> Self {
        Self {
            data: PrimaryData::One(Some(record)),
            included: Vec::new(),
            meta: None,
            links: None,
        }
    }

    /// A document whose primary data is a collection.
    pub fn many(records: Vec<ResourceObject>) -> Self {
        Self {
            data: PrimaryData::Many(records),
            included: Vec::new(),
            meta: None,
            links: None,
        }
    }

    /// Adds side-loaded records.
    #[must_use]
    pub fn with_included(mut self, included: Vec<ResourceObject>) -> Self {
        self.included = included;
        self
    }

    /// Adds server metadata.
    #[must_use]
    pub fn with_meta(mut self, meta: Value) -> Self {
        self.meta = Some(meta);
        self
    }

    /// Adds pagination cursors.
    #[must_use]
    pub fn with_links(mut self, links: PageLinks) -> Self {
        self.links = Some(links);
        self
    }
}

/// Primary data of a response: a single (possibly null) record or a
/// collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PrimaryData {
    /// Single-record shape; `None` is an explicit `null` on the wire.
    One(Option<ResourceObject>),
    /// Collection shape, order-preserving.
    Many(Vec<ResourceObject>),
}

impl PrimaryData {
    /// The primary records as a list, regardless of wire shape.
    pub fn records(&self) -> Vec<&ResourceObject> {
        match self {
            PrimaryData::One(Some(record)) => vec![record],
            PrimaryData::One(None) => Vec::new(),
            PrimaryData::Many(records) => records.iter().collect(),
        }
    }

    /// Owned variant of [`PrimaryData::records`].
    pub fn into_records(self) -> Vec<ResourceObject> {
        match self {
            PrimaryData::One(Some(record)) => vec![record],
            PrimaryData::One(None) => Vec::new(),
            PrimaryData::Many(records) => records,
        }
    }
}

/// Opaque pagination cursors returned by the server. `next`/`prev` are
/// passed back to the transport verbatim.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PageLinks {
    /// Cursor for the following page, absent on the last page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next: Option<String>,
    /// Cursor for the preceding page, absent on the first page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prev: Option<String>,
}

/// Envelope wrapping a write payload, as the server expects it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WriteRequest {
    /// The resource being written.
    pub data: WriteResource,
}

/// Body of a create or update request. `resource_type` is injected by the
/// store from its configured name; callers never supply it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WriteResource {
    /// The resource type name.
    #[serde(rename = "type")]
    pub resource_type: String,
    /// The record id; absent for create.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<ResourceId>,
    /// Attribute map to write.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attributes: Option<Attributes>,
    /// Relationships to write.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relationships: Option<Relationships>,
}

impl WriteRequest {
    /// Builds the envelope for a create, injecting the store's type name.
    pub fn for_create(resource_type: impl Into<String>, draft: ResourceDraft) -> Self {
        Self {
            data: WriteResource {
                resource_type: resource_type.into(),
                id: None,
                attributes: draft.attributes,
                relationships: draft.relationships,
            },
        }
    }

    /// Builds the envelope for an update of an existing record.
    pub fn for_update(resource_type: impl Into<String>, record: &ResourceObject) -> Self {
        Self {
            data: WriteResource {
                resource_type: resource_type.into(),
                id: Some(record.id.clone()),
                attributes: record.attributes.clone(),
                relationships: record.relationships.clone(),
            },
        }
    }
}
