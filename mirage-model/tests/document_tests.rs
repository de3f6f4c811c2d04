use mirage_model::{
    Document, PageLinks, PrimaryData, ResourceDraft, ResourceObject, WriteRequest,
};
use pretty_assertions::assert_eq;
use serde_json::json;

// ── Primary data shapes ─────────────────────────────────────────

#[test]
fn single_record_document() {
    let doc: Document = serde_json::from_value(json!({
        "data": {"type": "widgets", "id": "1"}
    }))
    .unwrap();

    let records = doc.data.records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].id, "1");
    assert!(doc.included.is_empty());
}

#[test]
fn collection_document() {
    let doc: Document = serde_json::from_value(json!({
        "data": [{"type": "widgets", "id": "1"}, {"type": "widgets", "id": "2"}]
    }))
    .unwrap();

    assert_eq!(doc.data.records().len(), 2);
}

#[test]
fn null_primary_data() {
    let doc: Document = serde_json::from_value(json!({"data": null})).unwrap();
    assert_eq!(doc.data, PrimaryData::One(None));
    assert!(doc.data.records().is_empty());
}

#[test]
fn into_records_preserves_order() {
    let doc = Document::many(vec![
        ResourceObject::new("widgets", "2"),
        ResourceObject::new("widgets", "1"),
    ]);
    let ids: Vec<_> = doc.data.into_records().into_iter().map(|r| r.id).collect();
    assert_eq!(ids, ["2", "1"]);
}

// ── Included, meta, links ───────────────────────────────────────

#[test]
fn compound_document_parses_included() {
    let doc: Document = serde_json::from_value(json!({
        "data": {"type": "restaurants", "id": "1"},
        "included": [
            {"type": "dishes", "id": "4"},
            {"type": "comments", "id": "9"}
        ]
    }))
    .unwrap();

    assert_eq!(doc.included.len(), 2);
    assert_eq!(doc.included[0].resource_type, "dishes");
    assert_eq!(doc.included[1].resource_type, "comments");
}

#[test]
fn meta_is_passed_through_opaque() {
    let doc: Document = serde_json::from_value(json!({
        "data": [],
        "meta": {"page-count": 12, "server": {"region": "eu"}}
    }))
    .unwrap();
    assert_eq!(doc.meta, Some(json!({"page-count": 12, "server": {"region": "eu"}})));
}

#[test]
fn page_links_parse_and_tolerate_extras() {
    let doc: Document = serde_json::from_value(json!({
        "data": [],
        "links": {
            "next": "/widgets?page[offset]=10",
            "prev": null,
            "self": "/widgets"
        }
    }))
    .unwrap();

    let links = doc.links.unwrap();
    assert_eq!(links.next.as_deref(), Some("/widgets?page[offset]=10"));
    assert_eq!(links.prev, None);
}

#[test]
fn document_builders_roundtrip() {
    let doc = Document::many(vec![ResourceObject::new("widgets", "1")])
        .with_included(vec![ResourceObject::new("parts", "3")])
        .with_meta(json!({"total": 1}))
        .with_links(PageLinks {
            next: Some("/widgets?page=2".into()),
            prev: None,
        });

    let value = serde_json::to_value(&doc).unwrap();
    let parsed: Document = serde_json::from_value(value).unwrap();
    assert_eq!(parsed, doc);
}

// ── Write envelopes ─────────────────────────────────────────────

#[test]
fn create_envelope_injects_type_and_omits_id() {
    let draft = ResourceDraft::new()
        .with_attributes(json!({"title": "New"}).as_object().unwrap().clone());
    let request = WriteRequest::for_create("widgets", draft);

    assert_eq!(
        serde_json::to_value(&request).unwrap(),
        json!({"data": {"type": "widgets", "attributes": {"title": "New"}}})
    );
}

#[test]
fn update_envelope_carries_id() {
    let record = ResourceObject::new("widgets", "5")
        .with_attributes(json!({"title": "Edited"}).as_object().unwrap().clone());
    let request = WriteRequest::for_update("widgets", &record);

    assert_eq!(
        serde_json::to_value(&request).unwrap(),
        json!({"data": {"type": "widgets", "id": "5", "attributes": {"title": "Edited"}}})
    );
}
