//! Filter and page bookkeeping.

use crate::entity_cache::EntityCache;
use mirage_model::{PageLinks, QueryParams, ResourceId, ResourceObject};

#[derive(Debug, Clone)]
struct QueryEntry {
    params: QueryParams,
    matched_ids: Vec<ResourceId>,
}

/// Records which ids each filter/options combination matched, without
/// duplicating record storage.
///
/// Entries follow the same find-or-append-by-structural-match discipline as
/// the relationship index, keyed by the full parameter set: filter fields
/// and options together.
#[derive(Debug, Clone, Default)]
pub struct QueryIndex {
    entries: Vec<QueryEntry>,
}

impl QueryIndex {
    /// Creates an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the ids matched by a parameter set, overwriting on
    /// structural match.
    pub fn store(&mut self, params: QueryParams, matched_ids: Vec<ResourceId>) {
        match self.entries.iter_mut().find(|e| e.params.matches(&params)) {
            Some(entry) => entry.matched_ids = matched_ids,
            None => self.entries.push(QueryEntry { params, matched_ids }),
        }
    }

    /// The ids recorded for a parameter set; `None` when never queried.
    pub fn matched(&self, params: &QueryParams) -> Option<&[ResourceId]> {
        self.entries
            .iter()
            .find(|e| e.params.matches(params))
            .map(|e| e.matched_ids.as_slice())
    }

    /// Resolves a parameter set against the entity cache, in matched-id
    /// order. Never-queried parameters resolve to an empty list, so callers
    /// need not distinguish "never queried" from "queried, zero matches".
    pub fn resolve(&self, params: &QueryParams, cache: &EntityCache) -> Vec<ResourceObject> {
        self.matched(params)
            .map(|ids| ids.iter().filter_map(|id| cache.by_id(id).cloned()).collect())
            .unwrap_or_default()
    }

    /// Drops every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

/// The single current page of a paged collection, plus its cursors.
///
/// Overwritten wholesale on every successful page load; there is exactly
/// one "current page" per resource type.
#[derive(Debug, Clone, Default)]
pub struct PageState {
    ids: Vec<ResourceId>,
    links: PageLinks,
}

impl PageState {
    /// Creates an empty page.
    pub fn new() -> Self {
        Self::default()
    }

    /// Installs a freshly loaded page and its cursors.
    pub fn replace(&mut self, ids: Vec<ResourceId>, links: PageLinks) {
        self.ids = ids;
        self.links = links;
    }

    /// The stored cursors.
    pub fn links(&self) -> &PageLinks {
        &self.links
    }

    /// Whether a following page exists.
    pub fn has_next(&self) -> bool {
        self.links.next.is_some()
    }

    /// Whether a preceding page exists.
    pub fn has_previous(&self) -> bool {
        self.links.prev.is_some()
    }

    /// Resolves the current page against the entity cache, dropping ids
    /// that no longer resolve.
    pub fn resolve(&self, cache: &EntityCache) -> Vec<ResourceObject> {
        self.ids
            .iter()
            .filter_map(|id| cache.by_id(id).cloned())
            .collect()
    }

    /// Forgets the page and its cursors.
    pub fn clear(&mut self) {
        self.ids.clear();
        self.links = PageLinks::default();
    }
}
