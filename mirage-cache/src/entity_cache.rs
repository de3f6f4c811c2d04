//! Per-type deduplicated record storage.

use mirage_model::{ResourceId, ResourceObject};

/// The deduplicated collection of records of one resource type.
///
/// Insertion order is preserved on first insert; later writes with the same
/// id merge in place rather than re-appending. Lookup is linear; mirrored
/// collections stay small enough that an id index would not pay for itself.
#[derive(Debug, Clone, Default)]
pub struct EntityCache {
    records: Vec<ResourceObject>,
}

impl EntityCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `record`, or shallow-merges it onto the stored record with
    /// the same id. Always succeeds.
    pub fn upsert(&mut self, record: ResourceObject) {
        match self.records.iter_mut().find(|r| r.id == record.id) {
            Some(existing) => existing.merge_from(record),
            None => self.records.push(record),
        }
    }

    /// Upserts each record, in input order.
    pub fn upsert_many(&mut self, records: Vec<ResourceObject>) {
        for record in records {
            self.upsert(record);
        }
    }

    /// Discards current contents and installs `records` as the new backing
    /// sequence. Records the server no longer returns disappear here, which
    /// is what distinguishes a full reload from an accumulating filtered
    /// load.
    pub fn replace_all(&mut self, records: Vec<ResourceObject>) {
        self.records = records;
    }

    /// Removes the record with the given id; absent ids are a no-op.
    pub fn remove(&mut self, id: &ResourceId) {
        self.records.retain(|r| &r.id != id);
    }

    /// Finds a record by id.
    pub fn by_id(&self, id: &ResourceId) -> Option<&ResourceObject> {
        self.records.iter().find(|r| &r.id == id)
    }

    /// All records, in insertion order.
    pub fn all(&self) -> &[ResourceObject] {
        &self.records
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the cache holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Drops every record.
    pub fn clear(&mut self) {
        self.records.clear();
    }
}
