//! Synchronization layer for Mirage.
//!
//! Mirrors a remote relational resource graph into per-type in-memory
//! caches, keeping them queryable through synchronous accessors while all
//! mutation flows through asynchronous transport calls.
//!
//! # Architecture
//!
//! - **Transport**: abstracts the HTTP collaborator behind get/post/patch/
//!   delete on path strings; a reqwest implementation and a queue-backed
//!   mock are bundled
//! - **Registry**: explicit cross-type wiring; one store façade per
//!   resource type, constructed once at startup
//! - **Resolver**: distributes compound documents (primary data plus
//!   side-loaded records) into every implicated type's store
//! - **Store**: the per-type façade owning the entity cache, relationship
//!   index, filter index, page state and status record
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use mirage_sync::{HttpConfig, HttpTransport, StoreRegistry};
//!
//! let transport = Arc::new(HttpTransport::new(HttpConfig {
//!     base_url: "https://api.example.com/v1".to_string(),
//!     ..Default::default()
//! }));
//!
//! let registry = StoreRegistry::new();
//! let restaurants = registry.register("restaurants", transport.clone());
//! let dishes = registry.register("dishes", transport);
//!
//! assert!(!restaurants.is_loading());
//! assert!(dishes.all().is_empty());
//! ```

mod error;
mod http;
pub mod query;
mod registry;
mod resolver;
mod state;
mod store;
pub mod transport;

pub use error::{SyncError, SyncResult};
pub use http::{HttpConfig, HttpTransport};
pub use mirage_cache::{RelatedIds, RelatedRecords};
pub use registry::StoreRegistry;
pub use state::SyncStatus;
pub use store::ResourceStore;
pub use transport::{Transport, TransportError};
