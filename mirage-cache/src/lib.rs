//! Normalized in-memory cache for Mirage.
//!
//! One set of these structures exists per mirrored resource type, owned by
//! that type's store façade:
//! - [`EntityCache`] — the deduplicated record collection, keyed by id
//! - [`RelationshipIndex`] — (parent identifier, relationship name) → related ids
//! - [`QueryIndex`] — filter/options → matched ids
//! - [`PageState`] — the current page and its cursors
//!
//! The indexes never duplicate record storage: they hold ids and resolve
//! them against the entity cache at read time, silently dropping ids that
//! no longer resolve.

mod entity_cache;
mod query_index;
mod relationship_index;

pub use entity_cache::EntityCache;
pub use query_index::{PageState, QueryIndex};
pub use relationship_index::{RelatedIds, RelatedRecords, RelationshipIndex};
