//! Compound-document resolution.
//!
//! Distributes a response's side-loaded records into their own types'
//! stores and records every declared relationship edge into the related
//! type's index. The `included` array arrives flattened across inclusion
//! depths, so scanning {included ∪ primary} covers multi-level inclusion
//! without explicit recursion.

use crate::registry::RegistryInner;
use mirage_cache::RelatedIds;
use mirage_model::{Document, RelationshipData, RelationshipObject, ResourceObject};
use tracing::{debug, warn};

/// Applies a response document to every implicated store.
pub(crate) fn apply_document(registry: &RegistryInner, document: &Document) {
    for record in &document.included {
        match registry.resolve_type(&record.resource_type) {
            Some(store) => store.store_record(record.clone()),
            None => warn!(
                resource_type = %record.resource_type,
                "dropping included record of unregistered type"
            ),
        }
    }

    let mut scanned: Vec<&ResourceObject> = document.included.iter().collect();
    scanned.extend(document.data.records());
    for record in scanned {
        record_relationships(registry, record, true);
    }
}

/// Records the relationship edges a record declares into the related
/// types' indexes.
///
/// With `skip_empty` set (compound resolution), relationships whose
/// linkage is an empty list are ignored: a side-loaded response must not
/// erase anything. An explicit write during `update` passes `false` and
/// stores empties as first-class entries. Explicit to-one `null` is always
/// recorded, so a later read sees "known absent" rather than "never
/// loaded".
pub(crate) fn record_relationships(
    registry: &RegistryInner,
    record: &ResourceObject,
    skip_empty: bool,
) {
    let Some(relationships) = &record.relationships else {
        return;
    };
    let parent = record.identifier();

    for (name, relationship) in relationships {
        // An absent `data` key means the relationship was not delivered on
        // this response; that is a no-op, not an erasure.
        let Some(data) = &relationship.data else {
            continue;
        };

        let related = match data {
            RelationshipData::Many(identifiers) if identifiers.is_empty() && skip_empty => {
                continue;
            }
            RelationshipData::Many(identifiers) => {
                RelatedIds::Many(identifiers.iter().map(|i| i.id.clone()).collect())
            }
            RelationshipData::One(Some(identifier)) => {
                RelatedIds::One(Some(identifier.id.clone()))
            }
            RelationshipData::One(None) => RelatedIds::One(None),
        };

        match target_store(registry, relationship, name) {
            Some(store) => {
                debug!(parent = %parent, relationship = %name, "recording relationship edge");
                store.store_related(parent.clone(), Some(name.as_str()), related);
            }
            None => warn!(
                relationship = %name,
                "no store registered for relationship target"
            ),
        }
    }
}

/// Removes stale entries for relationships the old version of a record
/// declared that its new version no longer carries unchanged.
pub(crate) fn remove_stale_relationships(
    registry: &RegistryInner,
    old: &ResourceObject,
    new: &ResourceObject,
) {
    let Some(old_relationships) = &old.relationships else {
        return;
    };
    let parent = old.identifier();
    let new_relationships = new.relationships.as_ref();

    for (name, old_relationship) in old_relationships {
        let unchanged = new_relationships
            .and_then(|rels| rels.get(name))
            .is_some_and(|new_relationship| new_relationship == old_relationship);
        if unchanged {
            continue;
        }
        if let Some(store) = target_store(registry, old_relationship, name) {
            store.remove_related(&parent, name);
        }
    }
}

/// The store owning a relationship's target type. The type comes from the
/// linkage payload itself, since the relationship name may differ from the
/// type (`author` pointing at `people`). Null and empty linkage carry no
/// type, leaving the normalized relationship name as the only clue.
fn target_store(
    registry: &RegistryInner,
    relationship: &RelationshipObject,
    name: &str,
) -> Option<std::sync::Arc<crate::store::ResourceStore>> {
    let declared_type = match &relationship.data {
        Some(RelationshipData::One(Some(identifier))) => Some(&identifier.resource_type),
        Some(RelationshipData::Many(identifiers)) => {
            identifiers.first().map(|i| &i.resource_type)
        }
        _ => None,
    };
    match declared_type {
        Some(type_name) => registry.resolve_type(type_name),
        None => registry.resolve_type(name),
    }
}
