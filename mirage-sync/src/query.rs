//! Query-string construction.
//!
//! Field order is stable because parameter maps iterate sorted, so repeated
//! identical calls produce identical URLs, and identical structural-match
//! keys in the filter index.

use mirage_model::QueryParams;
use serde_json::Value;

/// Builds the query-string suffix for a load, leading `?` included.
/// Empty or absent params produce an empty string.
pub fn query_suffix(params: Option<&QueryParams>) -> String {
    let Some(params) = params else {
        return String::new();
    };
    if params.is_empty() {
        return String::new();
    }

    let mut segments = Vec::new();
    for (field, value) in &params.filter {
        segments.push(format!(
            "filter[{}]={}",
            urlencoding::encode(field),
            urlencoding::encode(&scalar(value))
        ));
    }
    for (key, value) in &params.options {
        if key == "include" {
            // Relationship path lists pass through verbatim per the wire
            // convention: commas and dots are separators, not data.
            segments.push(format!("include={}", scalar(value)));
        } else {
            segments.push(format!(
                "{}={}",
                urlencoding::encode(key),
                urlencoding::encode(&scalar(value))
            ));
        }
    }

    format!("?{}", segments.join("&"))
}

/// Scalar form of a parameter value: strings drop their JSON quotes,
/// everything else keeps its JSON rendering.
fn scalar(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
