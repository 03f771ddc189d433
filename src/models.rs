use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use utoipa::{IntoParams, ToSchema};

use crate::filtering::pagination::PageMeta;

/// Decoded key/value view of a request's query string.
///
/// List endpoints receive every parameter as text. Nothing in this crate
/// mutates the bag; the filtering functions only ever read the keys they
/// were told about.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParameterBag(HashMap<String, String>);

impl ParameterBag {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode a raw `a=1&b=two` query string (without the leading `?`).
    ///
    /// Repeated keys keep the last value, the same as axum's
    /// `Query<HashMap<String, String>>` extractor.
    #[must_use]
    pub fn from_query_string(query: &str) -> Self {
        Self(
            url::form_urlencoded::parse(query.as_bytes())
                .into_owned()
                .collect(),
        )
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

}

impl From<HashMap<String, String>> for ParameterBag {
    fn from(params: HashMap<String, String>) -> Self {
        Self(params)
    }
}

impl<K, V> FromIterator<(K, V)> for ParameterBag
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }
}

/// Query parameters understood by every list endpoint.
///
/// Handlers read these through a [`ParameterBag`] so that malformed values
/// degrade to defaults instead of failing extraction; this struct exists to
/// document the parameters in the `OpenAPI` output.
///
/// # Filtering
/// The `filters` parameter is a JSON-encoded array of descriptors:
/// ```json
/// [{"field": "name", "operator": "like", "value": "jo"}, {"field": "score", "operator": "gte", "value": 10}]
/// ```
/// Supported operators are `eq` (default), `like`, `gte` and `lte`. Fields that
/// the endpoint does not expose are ignored.
///
/// # Pagination
/// `page` is 1-based. `pageSize` defaults to 20 and is capped by the endpoint
/// (100 unless configured otherwise).
///
/// # Sorting
/// `sortField` names one of the endpoint's sortable fields, `sortOrder` is
/// `asc` or `desc`.
#[derive(Debug, Deserialize, IntoParams, ToSchema, Default)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ListQuery {
    /// Page number, starting at 1.
    #[param(example = 1)]
    pub page: Option<u64>,
    /// Number of rows per page.
    #[param(example = 20)]
    pub page_size: Option<u64>,
    /// Free-text search across the endpoint's searchable columns.
    #[param(example = "acme")]
    pub search: Option<String>,
    /// Logical name of the field to sort by.
    #[param(example = "name")]
    pub sort_field: Option<String>,
    /// `asc` or `desc`.
    #[param(example = "asc")]
    pub sort_order: Option<String>,
    /// JSON-encoded array of filter descriptors.
    #[param(example = r#"[{"field":"name","operator":"like","value":"jo"}]"#)]
    pub filters: Option<String>,
}

/// Envelope returned by list endpoints.
#[derive(Debug, Serialize, ToSchema)]
pub struct ListResponse<T> {
    pub success: bool,
    pub data: Vec<T>,
    pub meta: PageMeta,
}

impl<T> ListResponse<T> {
    #[must_use]
    pub fn new(data: Vec<T>, meta: PageMeta) -> Self {
        Self {
            success: true,
            data,
            meta,
        }
    }
}
