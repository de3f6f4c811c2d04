//! Wire and data model types for Mirage.
//!
//! Defines the types every other Mirage crate depends on:
//! - [`ResourceObject`] — one record of a remote collection (type, id, attributes, relationships)
//! - [`ResourceId`] / [`ResourceIdentifier`] — resource addressing
//! - [`Document`] — a response payload bundling primary data with side-loaded records
//! - [`QueryParams`] — the structural-match key for filtered loads
//!
//! These types are consumed by the cache and sync layers and (as JSON) match
//! the remote API's wire format exactly.

mod document;
mod identifier;
mod params;
mod resource;

pub use document::{Document, PageLinks, PrimaryData, WriteRequest, WriteResource};
pub use identifier::{ResourceId, ResourceIdentifier};
pub use params::QueryParams;
pub use resource::{
    Attributes, RelationshipData, RelationshipObject, Relationships, ResourceDraft, ResourceObject,
};
