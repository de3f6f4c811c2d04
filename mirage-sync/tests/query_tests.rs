use mirage_model::QueryParams;
use mirage_sync::query::query_suffix;

// ── Shape ───────────────────────────────────────────────────────

#[test]
fn no_params_is_empty() {
    assert_eq!(query_suffix(None), "");
}

#[test]
fn empty_params_is_empty() {
    assert_eq!(query_suffix(Some(&QueryParams::new())), "");
}

#[test]
fn filter_fields_use_bracket_form() {
    let params = QueryParams::new().filter("state", "NY");
    assert_eq!(query_suffix(Some(&params)), "?filter[state]=NY");
}

#[test]
fn options_are_plain_pairs() {
    let params = QueryParams::new().option("sort", "name");
    assert_eq!(query_suffix(Some(&params)), "?sort=name");
}

#[test]
fn filters_precede_options() {
    let params = QueryParams::new().option("sort", "name").filter("state", "NY");
    assert_eq!(query_suffix(Some(&params)), "?filter[state]=NY&sort=name");
}

// ── Stability ───────────────────────────────────────────────────

#[test]
fn field_order_is_sorted_not_insertion_order() {
    let a = QueryParams::new().filter("b", "2").filter("a", "1");
    let b = QueryParams::new().filter("a", "1").filter("b", "2");

    assert_eq!(query_suffix(Some(&a)), "?filter[a]=1&filter[b]=2");
    assert_eq!(query_suffix(Some(&a)), query_suffix(Some(&b)));
}

#[test]
fn repeated_calls_are_identical() {
    let params = QueryParams::new()
        .filter("state", "NY")
        .option("sort", "name")
        .include("dishes");
    assert_eq!(query_suffix(Some(&params)), query_suffix(Some(&params)));
}

// ── Encoding ────────────────────────────────────────────────────

#[test]
fn values_are_url_encoded() {
    let params = QueryParams::new().filter("city", "New York");
    assert_eq!(query_suffix(Some(&params)), "?filter[city]=New%20York");
}

#[test]
fn include_path_passes_through_verbatim() {
    let params = QueryParams::new().include("dishes.comments,chef");
    assert_eq!(query_suffix(Some(&params)), "?include=dishes.comments,chef");
}

#[test]
fn non_string_values_keep_json_rendering() {
    let params = QueryParams::new().filter("servings", 4).option("draft", false);
    assert_eq!(query_suffix(Some(&params)), "?filter[servings]=4&draft=false");
}

#[test]
fn string_values_drop_their_quotes() {
    let params = QueryParams::new().option("sort", "name");
    // "name", not "\"name\"".
    assert_eq!(query_suffix(Some(&params)), "?sort=name");
}
