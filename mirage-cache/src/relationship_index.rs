//! Relationship bookkeeping, independent of record storage.
//!
//! Edges can be recorded before or after the related records themselves are
//! loaded; resolution happens lazily against the entity cache at read time.

use crate::entity_cache::EntityCache;
use mirage_model::{ResourceId, ResourceIdentifier, ResourceObject};

/// Related ids recorded for one (parent, relationship) pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelatedIds {
    /// To-one linkage; `None` means confirmed empty, which is distinct
    /// from the pair never having been recorded at all.
    One(Option<ResourceId>),
    /// To-many linkage, order-preserving.
    Many(Vec<ResourceId>),
}

/// Records resolved from the entity cache for one recorded pair.
#[derive(Debug, Clone, PartialEq)]
pub enum RelatedRecords {
    /// Resolved to-one record; `None` when the linkage is empty or the
    /// record is no longer cached.
    One(Option<ResourceObject>),
    /// Resolved to-many records, in recorded id order.
    Many(Vec<ResourceObject>),
}

impl RelatedRecords {
    /// The to-many records, or `None` for a to-one pair.
    pub fn as_many(&self) -> Option<&[ResourceObject]> {
        match self {
            RelatedRecords::Many(records) => Some(records),
            RelatedRecords::One(_) => None,
        }
    }

    /// The to-one record, or `None` for a to-many pair.
    pub fn as_one(&self) -> Option<Option<&ResourceObject>> {
        match self {
            RelatedRecords::One(record) => Some(record.as_ref()),
            RelatedRecords::Many(_) => None,
        }
    }
}

#[derive(Debug, Clone)]
struct RelationshipEntry {
    parent: ResourceIdentifier,
    relationship: String,
    related: RelatedIds,
}

/// Auxiliary table mapping (parent identifier, relationship name) to the
/// ids on the far end of the edge.
///
/// Keyed by the pair, not by parent alone: one parent can carry several
/// distinct relationships pointing at the same target type. At most one
/// entry exists per pair; a later write replaces the ids in place, which is
/// how a to-one relationship gets nulled out or a to-many one emptied.
#[derive(Debug, Clone, Default)]
pub struct RelationshipIndex {
    entries: Vec<RelationshipEntry>,
}

impl RelationshipIndex {
    /// Creates an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the related ids for a pair, overwriting any previous entry.
    /// Writing `One(None)` or an empty list is a first-class write: it
    /// marks the relationship as queried-and-empty.
    pub fn store(
        &mut self,
        parent: ResourceIdentifier,
        relationship: impl Into<String>,
        related: RelatedIds,
    ) {
        let relationship = relationship.into();
        match self
            .entries
            .iter_mut()
            .find(|e| e.parent == parent && e.relationship == relationship)
        {
            Some(entry) => entry.related = related,
            None => self.entries.push(RelationshipEntry {
                parent,
                relationship,
                related,
            }),
        }
    }

    /// Drops the entry for a pair, returning it to the never-recorded
    /// state. Absent pairs are a no-op.
    pub fn remove(&mut self, parent: &ResourceIdentifier, relationship: &str) {
        self.entries
            .retain(|e| !(e.parent == *parent && e.relationship == relationship));
    }

    /// The raw ids recorded for a pair; `None` when never recorded.
    pub fn lookup(&self, parent: &ResourceIdentifier, relationship: &str) -> Option<&RelatedIds> {
        self.entries
            .iter()
            .find(|e| e.parent == *parent && e.relationship == relationship)
            .map(|e| &e.related)
    }

    /// Resolves a pair against the entity cache. To-many ids resolve in
    /// recorded order; ids that no longer resolve (deleted or never-loaded
    /// records) are dropped silently rather than raising an error.
    pub fn resolve(
        &self,
        parent: &ResourceIdentifier,
        relationship: &str,
        cache: &EntityCache,
    ) -> Option<RelatedRecords> {
        match self.lookup(parent, relationship)? {
            RelatedIds::One(None) => Some(RelatedRecords::One(None)),
            RelatedIds::One(Some(id)) => Some(RelatedRecords::One(cache.by_id(id).cloned())),
            RelatedIds::Many(ids) => Some(RelatedRecords::Many(
                ids.iter().filter_map(|id| cache.by_id(id).cloned()).collect(),
            )),
        }
    }

    /// Drops every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
