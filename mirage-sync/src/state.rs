//! Per-type store state.

use crate::transport::TransportError;
use mirage_cache::{EntityCache, PageState, QueryIndex, RelationshipIndex};
use mirage_model::ResourceObject;
use serde_json::Value;

/// Lifecycle of a resource type's most recent load-class operation.
///
/// The machine is re-enterable indefinitely: every load transitions back
/// through `Loading` before settling on `Success` or `Error`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SyncStatus {
    /// Nothing loaded yet.
    #[default]
    Initial,
    /// A load-class operation is in flight.
    Loading,
    /// The most recent load-class operation failed.
    Error,
    /// The most recent load-class operation succeeded.
    Success,
}

/// Everything one store façade owns for its resource type.
#[derive(Debug, Default)]
pub(crate) struct StoreState {
    pub cache: EntityCache,
    pub relationships: RelationshipIndex,
    pub queries: QueryIndex,
    pub page: PageState,
    pub status: SyncStatus,
    pub error: Option<TransportError>,
    pub meta: Option<Value>,
    pub last_created: Option<ResourceObject>,
}

impl StoreState {
    /// Returns every slot to its initial empty state.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
