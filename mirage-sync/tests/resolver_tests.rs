use mirage_model::{
    Document, RelationshipObject, ResourceIdentifier, ResourceObject,
};
use mirage_sync::transport::mock::MockTransport;
use mirage_sync::{RelatedIds, RelatedRecords, ResourceStore, StoreRegistry};
use serde_json::json;
use std::sync::Arc;

struct Stores {
    transport: Arc<MockTransport>,
    // Stores hold only weak registry references; keep it alive here.
    _registry: StoreRegistry,
    restaurants: Arc<ResourceStore>,
    dishes: Arc<ResourceStore>,
    comments: Arc<ResourceStore>,
}

fn setup() -> Stores {
    let transport = Arc::new(MockTransport::new());
    let registry = StoreRegistry::new();
    Stores {
        restaurants: registry.register("restaurants", transport.clone()),
        dishes: registry.register("dishes", transport.clone()),
        comments: registry.register("comments", transport.clone()),
        transport,
        _registry: registry,
    }
}

fn restaurant(id: &str, dish_ids: &[&str]) -> ResourceObject {
    ResourceObject::new("restaurants", id).with_relationship(
        "dishes",
        RelationshipObject::to_many(
            dish_ids
                .iter()
                .map(|d| ResourceIdentifier::new("dishes", *d))
                .collect(),
        ),
    )
}

fn dish(id: &str) -> ResourceObject {
    ResourceObject::new("dishes", id)
}

// ── Compound documents ──────────────────────────────────────────

#[tokio::test]
async fn two_level_inclusion_populates_every_store() {
    let stores = setup();

    // Two restaurants; the first one's dishes and one dish's comment are
    // side-loaded in a single flattened `included` array.
    stores.transport.queue_document(
        Document::many(vec![restaurant("1", &["10", "11"]), restaurant("2", &["12"])])
            .with_included(vec![
                dish("10").with_relationship(
                    "comments",
                    RelationshipObject::to_many(vec![ResourceIdentifier::new("comments", "90")]),
                ),
                dish("11"),
                dish("12"),
                ResourceObject::new("comments", "90")
                    .with_attributes(json!({"text": "great"}).as_object().unwrap().clone()),
            ]),
    );

    stores.restaurants.load_all(None).await.unwrap();

    assert_eq!(stores.restaurants.all().len(), 2);
    assert_eq!(stores.dishes.all().len(), 3);
    assert_eq!(stores.comments.all().len(), 1);

    // Each restaurant sees only its own dishes.
    let first = stores
        .dishes
        .related(&ResourceIdentifier::new("restaurants", "1"), Some("dishes"))
        .unwrap();
    let ids: Vec<_> = first.as_many().unwrap().iter().map(|r| r.id.clone()).collect();
    assert_eq!(ids, ["10", "11"]);

    // Second-level inclusion: the dish's comment edge was recorded too.
    let dish_comments = stores
        .comments
        .related(&ResourceIdentifier::new("dishes", "10"), Some("comments"))
        .unwrap();
    assert_eq!(dish_comments.as_many().unwrap().len(), 1);
}

#[tokio::test]
async fn included_of_own_type_accumulates_into_own_store() {
    let stores = setup();
    stores.transport.queue_document(
        Document::one(dish("1")).with_included(vec![dish("2")]),
    );

    stores.dishes.load_by_id("1", None).await.unwrap();

    assert_eq!(stores.dishes.all().len(), 2);
}

#[tokio::test]
async fn unregistered_included_type_is_dropped_silently() {
    let stores = setup();
    stores.transport.queue_document(
        Document::one(dish("1")).with_included(vec![ResourceObject::new("franchises", "5")]),
    );

    stores.dishes.load_by_id("1", None).await.unwrap();

    assert_eq!(stores.dishes.all().len(), 1);
}

// ── Linkage edge cases ──────────────────────────────────────────

#[tokio::test]
async fn explicit_null_to_one_is_recorded_as_known_absent() {
    let stores = setup();
    // Relationship name is singular; the registry resolves it to the
    // `restaurants` store since null linkage carries no type of its own.
    let orphan = ResourceObject::new("dishes", "1")
        .with_relationship("restaurant", RelationshipObject::empty_to_one());
    stores.transport.queue_document(Document::one(orphan));

    stores.dishes.load_by_id("1", None).await.unwrap();

    let related = stores
        .restaurants
        .related(&ResourceIdentifier::new("dishes", "1"), Some("restaurant"));
    assert_eq!(related, Some(RelatedRecords::One(None)));
}

#[tokio::test]
async fn empty_to_many_is_skipped_during_resolution() {
    let stores = setup();
    let lonely = ResourceObject::new("dishes", "1")
        .with_relationship("comments", RelationshipObject::to_many(vec![]));
    stores.transport.queue_document(Document::one(lonely));

    stores.dishes.load_by_id("1", None).await.unwrap();

    // Not an erasure: the pair stays in the never-recorded state.
    assert!(stores
        .comments
        .related(&ResourceIdentifier::new("dishes", "1"), Some("comments"))
        .is_none());
}

#[tokio::test]
async fn absent_data_key_is_a_noop() {
    let stores = setup();
    let vague = ResourceObject::new("dishes", "1")
        .with_relationship("comments", RelationshipObject::default());
    stores.transport.queue_document(Document::one(vague));

    stores.dishes.load_by_id("1", None).await.unwrap();

    assert!(stores
        .comments
        .related(&ResourceIdentifier::new("dishes", "1"), Some("comments"))
        .is_none());
}

#[tokio::test]
async fn relationship_name_may_differ_from_target_type() {
    let transport = Arc::new(MockTransport::new());
    let registry = StoreRegistry::new();
    let posts = registry.register("posts", transport.clone());
    let people = registry.register("people", transport.clone());

    // Named `author`, pointing at type `people`: the target type comes from
    // the linkage payload, not from the name.
    let post = ResourceObject::new("posts", "1").with_relationship(
        "author",
        RelationshipObject::to_one(ResourceIdentifier::new("people", "9")),
    );
    transport.queue_document(
        Document::one(post).with_included(vec![ResourceObject::new("people", "9")]),
    );

    posts.load_by_id("1", None).await.unwrap();

    let author = people
        .related(&ResourceIdentifier::new("posts", "1"), Some("author"))
        .unwrap();
    assert_eq!(author.as_one().unwrap().unwrap().id, "9");
}

#[tokio::test]
async fn relationship_overwrite_on_reload() {
    let stores = setup();
    stores
        .transport
        .queue_document(Document::one(restaurant("1", &["10"])).with_included(vec![dish("10")]));
    stores.restaurants.load_by_id("1", None).await.unwrap();

    stores
        .transport
        .queue_document(Document::one(restaurant("1", &["11"])).with_included(vec![dish("11")]));
    stores.restaurants.load_by_id("1", None).await.unwrap();

    let related = stores
        .dishes
        .related(&ResourceIdentifier::new("restaurants", "1"), Some("dishes"))
        .unwrap();
    let ids: Vec<_> = related.as_many().unwrap().iter().map(|r| r.id.clone()).collect();
    assert_eq!(ids, ["11"]);
}

#[tokio::test]
async fn dangling_related_id_is_filtered_after_delete() {
    let stores = setup();
    stores.transport.queue_document(
        Document::one(restaurant("1", &["10", "11"])).with_included(vec![dish("10"), dish("11")]),
    );
    stores.restaurants.load_by_id("1", None).await.unwrap();

    stores.transport.queue_document(Document::many(vec![]));
    stores.dishes.delete("10").await.unwrap();

    let related = stores
        .dishes
        .related(&ResourceIdentifier::new("restaurants", "1"), Some("dishes"))
        .unwrap();
    let ids: Vec<_> = related.as_many().unwrap().iter().map(|r| r.id.clone()).collect();
    assert_eq!(ids, ["11"]);
}

// ── store_related defaults ──────────────────────────────────────

#[tokio::test]
async fn store_related_defaults_name_to_own_type() {
    let stores = setup();
    let parent = ResourceIdentifier::new("restaurants", "1");
    stores.dishes.store_record(dish("10"));
    stores
        .dishes
        .store_related(parent.clone(), None, RelatedIds::Many(vec!["10".into()]));

    let related = stores.dishes.related(&parent, Some("dishes")).unwrap();
    assert_eq!(related.as_many().unwrap().len(), 1);
}
