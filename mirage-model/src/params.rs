//! Query parameters for filtered and paged loads.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Filter criteria plus passthrough options for a load operation.
///
/// This is the structural-match key used by the cache's filter index: two
/// parameter sets match when every filter field and every option field is
/// equal. Distinct option sets are distinct keys even when the filter
/// portion is identical, since options can change which fields or records
/// the server returns. `BTreeMap` keeps equality order-insensitive and
/// gives query strings a stable field order, so repeated identical calls
/// produce identical keys.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryParams {
    /// Filter fields, sent as `filter[field]=value`.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub filter: BTreeMap<String, Value>,
    /// Passthrough options, sent as `key=value`.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub options: BTreeMap<String, Value>,
}

impl QueryParams {
    /// Creates an empty parameter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a filter field.
    #[must_use]
    pub fn filter(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.filter.insert(field.into(), value.into());
        self
    }

    /// Adds a passthrough option.
    #[must_use]
    pub fn option(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.options.insert(key.into(), value.into());
        self
    }

    /// Sets the `include` option: a comma/dot-separated relationship path
    /// list, passed through to the server verbatim.
    #[must_use]
    pub fn include(self, path: &str) -> Self {
        self.option("include", path)
    }

    /// Whether no fields are set at all.
    pub fn is_empty(&self) -> bool {
        self.filter.is_empty() && self.options.is_empty()
    }

    /// Structural match against another parameter set.
    pub fn matches(&self, other: &QueryParams) -> bool {
        self == other
    }
}
