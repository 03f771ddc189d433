use serde::Deserialize;
use serde_json::Value as JsonValue;
use std::collections::HashMap;
use std::fmt;

use super::search::contains_pattern;
use crate::models::ParameterBag;

/// Name of the query parameter carrying the JSON filter array.
pub const FILTERS_PARAM: &str = "filters";

/// Comparison operators accepted in filter descriptors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilterOperator {
    /// Equality (=)
    #[default]
    Eq,
    /// Substring match (LIKE, wildcards escaped)
    Like,
    /// Greater than or equal (>=)
    Gte,
    /// Less than or equal (<=)
    Lte,
}

impl FilterOperator {
    /// Parse an operator name; anything unrecognised is treated as `eq`.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        match raw {
            "like" => Self::Like,
            "gte" => Self::Gte,
            "lte" => Self::Lte,
            _ => Self::Eq,
        }
    }

    #[must_use]
    pub const fn sql(self) -> &'static str {
        match self {
            Self::Eq => "=",
            Self::Like => "LIKE",
            Self::Gte => ">=",
            Self::Lte => "<=",
        }
    }
}

/// A bind value produced by filtering.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterValue {
    Text(String),
    Integer(i64),
    Float(f64),
}

impl FilterValue {
    /// Accepts non-empty strings and numbers. Everything else (null, empty
    /// string, booleans, arrays, objects) is not a usable filter value.
    fn from_json(value: &JsonValue) -> Option<Self> {
        match value {
            JsonValue::String(text) if !text.is_empty() => Some(Self::Text(text.clone())),
            JsonValue::Number(number) => number
                .as_i64()
                .map(Self::Integer)
                .or_else(|| number.as_f64().map(Self::Float)),
            _ => None,
        }
    }
}

impl fmt::Display for FilterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Integer(int) => write!(f, "{int}"),
            Self::Float(float) => write!(f, "{float}"),
        }
    }
}

impl From<String> for FilterValue {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<FilterValue> for sea_orm::Value {
    fn from(value: FilterValue) -> Self {
        match value {
            FilterValue::Text(text) => text.into(),
            FilterValue::Integer(int) => int.into(),
            FilterValue::Float(float) => float.into(),
        }
    }
}

/// Where a filterable field lives in SQL.
///
/// The column is a `&'static str`: it can only come from the program text,
/// never from a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterField {
    pub column: &'static str,
    /// Operator used when a descriptor names none.
    pub operator: Option<FilterOperator>,
}

impl FilterField {
    #[must_use]
    pub const fn new(column: &'static str) -> Self {
        Self {
            column,
            operator: None,
        }
    }

    #[must_use]
    pub const fn operator(mut self, operator: FilterOperator) -> Self {
        self.operator = Some(operator);
        self
    }
}

/// Allow-list of fields a `filters` descriptor may target.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterConfig {
    fields: HashMap<String, FilterField>,
}

impl FilterConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `name` as filterable, mapped to `field`.
    #[must_use]
    pub fn field(mut self, name: impl Into<String>, field: FilterField) -> Self {
        self.fields.insert(name.into(), field);
        self
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&FilterField> {
        self.fields.get(name)
    }
}

/// One element of the `filters` array as sent by clients.
#[derive(Debug, Deserialize)]
struct FilterDescriptor {
    field: String,
    #[serde(default)]
    operator: Option<JsonValue>,
    #[serde(default)]
    value: JsonValue,
}

impl FilterDescriptor {
    /// Operator named by the descriptor itself. Missing, null and `""` defer
    /// to the field's configured operator.
    fn operator(&self) -> Option<FilterOperator> {
        match &self.operator {
            None | Some(JsonValue::Null) => None,
            Some(JsonValue::String(name)) if name.is_empty() => None,
            Some(JsonValue::String(name)) => Some(FilterOperator::parse(name)),
            Some(_) => Some(FilterOperator::Eq),
        }
    }
}

/// Clauses built from the `filters` parameter, AND-ed by the caller.
///
/// `params[i]` binds the single placeholder of `clauses[i]`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedFilters {
    pub clauses: Vec<String>,
    pub params: Vec<FilterValue>,
}

impl ParsedFilters {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    fn push(&mut self, column: &str, operator: FilterOperator, value: FilterValue) {
        let bound = match operator {
            FilterOperator::Like => FilterValue::Text(contains_pattern(&value.to_string())),
            FilterOperator::Eq | FilterOperator::Gte | FilterOperator::Lte => value,
        };
        self.clauses.push(format!("{column} {} ?", operator.sql()));
        self.params.push(bound);
    }
}

fn parse_filter_json(raw: &str) -> Vec<JsonValue> {
    match serde_json::from_str(raw) {
        Ok(JsonValue::Array(entries)) => entries,
        Ok(_) => {
            tracing::debug!("Ignoring filters parameter that is not a JSON array");
            Vec::new()
        }
        Err(e) => {
            tracing::debug!(error = %e, "Ignoring invalid JSON in filters parameter");
            Vec::new()
        }
    }
}

/// Translate the JSON `filters` parameter into parameterized clauses.
///
/// Malformed JSON, malformed descriptors and fields missing from `config`
/// are dropped without error. Output order follows the input array.
#[must_use]
pub fn parse_filters(params: &ParameterBag, config: &FilterConfig) -> ParsedFilters {
    let mut parsed = ParsedFilters::default();
    let Some(raw) = params.get(FILTERS_PARAM) else {
        return parsed;
    };

    for entry in parse_filter_json(raw) {
        let Ok(descriptor) = serde_json::from_value::<FilterDescriptor>(entry) else {
            tracing::debug!("Dropping malformed filter descriptor");
            continue;
        };
        let Some(value) = FilterValue::from_json(&descriptor.value) else {
            continue;
        };
        let Some(field) = config.get(&descriptor.field) else {
            tracing::debug!(field = %descriptor.field, "Dropping filter on unlisted field");
            continue;
        };

        let operator = descriptor
            .operator()
            .or(field.operator)
            .unwrap_or_default();
        parsed.push(field.column, operator, value);
    }

    parsed
}
