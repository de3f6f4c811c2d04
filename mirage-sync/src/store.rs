//! Per-type store façades.

use crate::error::{SyncError, SyncResult};
use crate::query::query_suffix;
use crate::registry::RegistryInner;
use crate::resolver;
use crate::state::{StoreState, SyncStatus};
use crate::transport::{Transport, TransportError};
use mirage_cache::{RelatedIds, RelatedRecords};
use mirage_model::{
    Document, QueryParams, ResourceDraft, ResourceId, ResourceIdentifier, ResourceObject,
    WriteRequest,
};
use serde_json::Value;
use std::sync::{Arc, RwLock, Weak};
use tracing::{debug, warn};

/// The synchronization façade for one resource type.
///
/// Each instance exclusively owns its type's entity cache, relationship
/// index, filter index, page state and status record. Mutation flows
/// through the asynchronous load/write operations, or through the
/// `store_record`/`store_related` entry points used by cross-type
/// compound-document resolution. The read accessors are synchronous and
/// never touch the network.
///
/// Concurrent calls are neither deduplicated nor sequenced: whichever
/// response arrives last wins the wholesale slots (the full collection on
/// `load_all`, the current page), while parameter-keyed slots are safe
/// under interleaving because each response lands in its own
/// structurally-matched entry. In-flight requests cannot be cancelled; a
/// late response applies itself whenever it arrives.
pub struct ResourceStore {
    resource_type: String,
    transport: Arc<dyn Transport>,
    registry: Weak<RegistryInner>,
    state: RwLock<StoreState>,
}

impl ResourceStore {
    pub(crate) fn new(
        resource_type: String,
        transport: Arc<dyn Transport>,
        registry: Weak<RegistryInner>,
    ) -> Self {
        Self {
            resource_type,
            transport,
            registry,
            state: RwLock::new(StoreState::default()),
        }
    }

    /// The resource-type name this store mirrors.
    pub fn resource_type(&self) -> &str {
        &self.resource_type
    }

    // ── Load operations ──────────────────────────────────────────

    /// Loads the full collection, replacing the cached one so that records
    /// removed server-side disappear locally.
    pub async fn load_all(&self, params: Option<&QueryParams>) -> SyncResult<Vec<ResourceObject>> {
        let path = format!("{}{}", self.resource_type, query_suffix(params));
        debug!(resource_type = %self.resource_type, %path, "load_all");
        self.begin_load();

        match self.transport.get(&path).await {
            Ok(document) => {
                let records: Vec<ResourceObject> =
                    document.data.records().into_iter().cloned().collect();
                {
                    let mut state = self.state.write().unwrap();
                    state.cache.replace_all(records.clone());
                    self.settle(&mut state, document.meta.clone());
                }
                self.apply_compound(&document);
                Ok(records)
            }
            Err(error) => Err(self.fail_load(error)),
        }
    }

    /// Loads a single record by id and upserts it into the cache.
    pub async fn load_by_id(
        &self,
        id: impl Into<ResourceId>,
        params: Option<&QueryParams>,
    ) -> SyncResult<ResourceObject> {
        let id = id.into();
        let path = format!("{}/{}{}", self.resource_type, id, query_suffix(params));
        debug!(resource_type = %self.resource_type, %path, "load_by_id");
        self.begin_load();

        match self.transport.get(&path).await {
            Ok(document) => {
                let Some(record) = document.data.records().first().map(|r| (*r).clone()) else {
                    self.state.write().unwrap().status = SyncStatus::Error;
                    return Err(SyncError::Protocol(format!(
                        "no record in response for {}/{}",
                        self.resource_type, id
                    )));
                };
                {
                    let mut state = self.state.write().unwrap();
                    state.cache.upsert(record.clone());
                    self.settle(&mut state, document.meta.clone());
                }
                self.apply_compound(&document);
                Ok(record)
            }
            Err(error) => Err(self.fail_load(error)),
        }
    }

    /// Loads the records matching a filter, accumulating them into the
    /// cache (unrelated cached records are not evicted) and recording the
    /// matched ids under the full parameter set.
    pub async fn load_where(&self, params: &QueryParams) -> SyncResult<Vec<ResourceObject>> {
        let path = format!("{}{}", self.resource_type, query_suffix(Some(params)));
        debug!(resource_type = %self.resource_type, %path, "load_where");
        self.begin_load();

        match self.transport.get(&path).await {
            Ok(document) => {
                let records = document.data.into_records();
                let matched = records.iter().map(|r| r.id.clone()).collect();

                let mut state = self.state.write().unwrap();
                state.cache.upsert_many(records.clone());
                state.queries.store(params.clone(), matched);
                self.settle(&mut state, document.meta);
                Ok(records)
            }
            Err(error) => Err(self.fail_load(error)),
        }
    }

    /// Loads a page of the collection, replacing the current page and its
    /// cursors wholesale.
    pub async fn load_page(&self, params: &QueryParams) -> SyncResult<Vec<ResourceObject>> {
        let path = format!("{}{}", self.resource_type, query_suffix(Some(params)));
        self.fetch_page(path).await
    }

    /// Loads the page behind the stored `next` cursor.
    pub async fn load_next_page(&self) -> SyncResult<Vec<ResourceObject>> {
        let next = self
            .state
            .read()
            .unwrap()
            .page
            .links()
            .next
            .clone()
            .ok_or(SyncError::MissingPageLink("next"))?;
        self.fetch_page(next).await
    }

    /// Loads the page behind the stored `prev` cursor.
    pub async fn load_previous_page(&self) -> SyncResult<Vec<ResourceObject>> {
        let prev = self
            .state
            .read()
            .unwrap()
            .page
            .links()
            .prev
            .clone()
            .ok_or(SyncError::MissingPageLink("previous"))?;
        self.fetch_page(prev).await
    }

    async fn fetch_page(&self, path: String) -> SyncResult<Vec<ResourceObject>> {
        debug!(resource_type = %self.resource_type, %path, "load_page");
        self.begin_load();

        match self.transport.get(&path).await {
            Ok(document) => {
                let records = document.data.into_records();
                let ids = records.iter().map(|r| r.id.clone()).collect();

                let mut state = self.state.write().unwrap();
                state.cache.upsert_many(records.clone());
                state.page.replace(ids, document.links.unwrap_or_default());
                self.settle(&mut state, document.meta);
                Ok(records)
            }
            Err(error) => Err(self.fail_load(error)),
        }
    }

    /// Loads the records related to `parent` through a relationship. The
    /// relationship name defaults to this store's resource-type name.
    pub async fn load_related(
        &self,
        parent: &ResourceIdentifier,
        relationship: Option<&str>,
        params: Option<&QueryParams>,
    ) -> SyncResult<Vec<ResourceObject>> {
        let relationship = relationship.unwrap_or(&self.resource_type);
        let path = format!(
            "{}/{}/{}{}",
            parent.resource_type,
            parent.id,
            relationship,
            query_suffix(params)
        );
        debug!(resource_type = %self.resource_type, %path, "load_related");
        self.begin_load();

        match self.transport.get(&path).await {
            Ok(document) => {
                let records: Vec<ResourceObject> =
                    document.data.records().into_iter().cloned().collect();
                let ids = records.iter().map(|r| r.id.clone()).collect();
                {
                    let mut state = self.state.write().unwrap();
                    state.cache.upsert_many(records.clone());
                    state
                        .relationships
                        .store(parent.clone(), relationship, RelatedIds::Many(ids));
                    self.settle(&mut state, document.meta.clone());
                }
                self.apply_compound(&document);
                Ok(records)
            }
            Err(error) => Err(self.fail_load(error)),
        }
    }

    // ── Write operations ─────────────────────────────────────────

    /// Creates a record; the server assigns its id. Failures re-raise
    /// without touching the shared load status.
    pub async fn create(&self, draft: ResourceDraft) -> SyncResult<ResourceObject> {
        let body = WriteRequest::for_create(self.resource_type.clone(), draft);
        let document = self.transport.post(&self.resource_type, &body).await?;
        let record = document
            .data
            .into_records()
            .into_iter()
            .next()
            .ok_or_else(|| {
                SyncError::Protocol(format!(
                    "create response for {} carried no record",
                    self.resource_type
                ))
            })?;

        let mut state = self.state.write().unwrap();
        state.cache.upsert(record.clone());
        state.last_created = Some(record.clone());
        Ok(record)
    }

    /// Updates a record client-optimistically: on success the record as
    /// given is cached without waiting for a server echo, and its
    /// relationship entries are re-derived: stale entries the old cached
    /// version carried are removed, then every relationship present on the
    /// new version is stored again, explicit empties included.
    pub async fn update(&self, record: ResourceObject) -> SyncResult<()> {
        let path = format!("{}/{}", self.resource_type, record.id);
        let body = WriteRequest::for_update(self.resource_type.clone(), &record);
        self.transport.patch(&path, &body).await?;

        let previous = {
            let mut state = self.state.write().unwrap();
            let previous = state.cache.by_id(&record.id).cloned();
            state.cache.upsert(record.clone());
            previous
        };

        match self.registry.upgrade() {
            Some(registry) => {
                if let Some(previous) = &previous {
                    resolver::remove_stale_relationships(&registry, previous, &record);
                }
                resolver::record_relationships(&registry, &record, false);
            }
            None => warn!(
                resource_type = %self.resource_type,
                "store registry dropped; skipping relationship reconciliation"
            ),
        }
        Ok(())
    }

    /// Deletes a record server-side, then drops it from the cache.
    /// Deleting a record the cache never held is not an error.
    pub async fn delete(&self, id: impl Into<ResourceId>) -> SyncResult<()> {
        let id = id.into();
        let path = format!("{}/{}", self.resource_type, id);
        self.transport.delete(&path).await?;
        self.state.write().unwrap().cache.remove(&id);
        Ok(())
    }

    // ── Direct mutation (no transport round-trip) ────────────────

    /// Upserts a record directly. This is the entry point compound-document
    /// resolution uses to push side-loaded records of this type in from
    /// another type's load.
    pub fn store_record(&self, record: ResourceObject) {
        self.state.write().unwrap().cache.upsert(record);
    }

    /// Removes a record directly.
    pub fn remove_record(&self, id: &ResourceId) {
        self.state.write().unwrap().cache.remove(id);
    }

    /// Records related ids for a (parent, relationship) pair. The
    /// relationship name defaults to this store's resource-type name.
    pub fn store_related(
        &self,
        parent: ResourceIdentifier,
        relationship: Option<&str>,
        related: RelatedIds,
    ) {
        let relationship = relationship.unwrap_or(&self.resource_type).to_string();
        self.state
            .write()
            .unwrap()
            .relationships
            .store(parent, relationship, related);
    }

    /// Drops the entry for a (parent, relationship) pair, returning it to
    /// the never-recorded state.
    pub fn remove_related(&self, parent: &ResourceIdentifier, relationship: &str) {
        self.state
            .write()
            .unwrap()
            .relationships
            .remove(parent, relationship);
    }

    /// Returns every per-type slot (cache, indexes, page, status, error,
    /// meta, last-created) to its initial empty state.
    pub fn reset_state(&self) {
        self.state.write().unwrap().reset();
    }

    // ── Read accessors ───────────────────────────────────────────

    /// All cached records, in insertion order.
    pub fn all(&self) -> Vec<ResourceObject> {
        self.state.read().unwrap().cache.all().to_vec()
    }

    /// A cached record by id; tolerates numeric callers.
    pub fn by_id(&self, id: impl Into<ResourceId>) -> Option<ResourceObject> {
        let id = id.into();
        self.state.read().unwrap().cache.by_id(&id).cloned()
    }

    /// Records matched by a previously executed filtered load, in matched
    /// order; empty when the parameter set was never loaded.
    pub fn filtered(&self, params: &QueryParams) -> Vec<ResourceObject> {
        let state = self.state.read().unwrap();
        state.queries.resolve(params, &state.cache)
    }

    /// The current page, resolved against the cache.
    pub fn page(&self) -> Vec<ResourceObject> {
        let state = self.state.read().unwrap();
        state.page.resolve(&state.cache)
    }

    /// Whether a following page exists.
    pub fn has_next(&self) -> bool {
        self.state.read().unwrap().page.has_next()
    }

    /// Whether a preceding page exists.
    pub fn has_previous(&self) -> bool {
        self.state.read().unwrap().page.has_previous()
    }

    /// Related records for a (parent, relationship) pair; `None` when the
    /// pair was never recorded, which is distinct from recorded-but-empty.
    /// The relationship name defaults to this store's resource-type name.
    pub fn related(
        &self,
        parent: &ResourceIdentifier,
        relationship: Option<&str>,
    ) -> Option<RelatedRecords> {
        let relationship = relationship.unwrap_or(&self.resource_type);
        let state = self.state.read().unwrap();
        state.relationships.resolve(parent, relationship, &state.cache)
    }

    /// The current load status.
    pub fn status(&self) -> SyncStatus {
        self.state.read().unwrap().status
    }

    /// Whether a load-class operation is in flight.
    pub fn is_loading(&self) -> bool {
        self.status() == SyncStatus::Loading
    }

    /// Whether the most recent load-class operation failed.
    pub fn is_error(&self) -> bool {
        self.status() == SyncStatus::Error
    }

    /// The error that failed the most recent load-class operation.
    pub fn error(&self) -> Option<TransportError> {
        self.state.read().unwrap().error.clone()
    }

    /// Server metadata from the most recent successful load.
    pub fn last_meta(&self) -> Option<Value> {
        self.state.read().unwrap().meta.clone()
    }

    /// The record created by the most recent successful `create`.
    pub fn last_created(&self) -> Option<ResourceObject> {
        self.state.read().unwrap().last_created.clone()
    }

    // ── Internals ────────────────────────────────────────────────

    fn begin_load(&self) {
        self.state.write().unwrap().status = SyncStatus::Loading;
    }

    fn settle(&self, state: &mut StoreState, meta: Option<Value>) {
        state.status = SyncStatus::Success;
        state.error = None;
        state.meta = meta;
    }

    fn fail_load(&self, error: TransportError) -> SyncError {
        let mut state = self.state.write().unwrap();
        state.status = SyncStatus::Error;
        state.error = Some(error.clone());
        SyncError::Transport(error)
    }

    fn apply_compound(&self, document: &Document) {
        match self.registry.upgrade() {
            Some(registry) => resolver::apply_document(&registry, document),
            None => warn!(
                resource_type = %self.resource_type,
                "store registry dropped; skipping compound-document resolution"
            ),
        }
    }
}
