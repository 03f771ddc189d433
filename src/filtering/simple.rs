use std::collections::HashMap;

use super::conditions::FilterValue;
use crate::models::ParameterBag;

/// SQL type an equality filter value is bound as.
///
/// Query values arrive as text; PostgreSQL refuses to compare a text
/// parameter with an integer column, so numeric keys are bound as numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValueKind {
    #[default]
    Text,
    Integer,
    Float,
}

impl ValueKind {
    /// Convert a trimmed query value, `None` if it is not of this kind.
    #[must_use]
    pub fn bind(self, raw: &str) -> Option<FilterValue> {
        match self {
            Self::Text => Some(FilterValue::Text(raw.to_owned())),
            Self::Integer => raw.parse().ok().map(FilterValue::Integer),
            Self::Float => raw
                .parse::<f64>()
                .ok()
                .filter(|float| float.is_finite())
                .map(FilterValue::Float),
        }
    }
}

/// An allow-listed `?key=value` filter compared with `column = ?`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EqualityFilter {
    pub key: &'static str,
    pub column: &'static str,
    pub kind: ValueKind,
}

impl EqualityFilter {
    #[must_use]
    pub const fn text(key: &'static str, column: &'static str) -> Self {
        Self {
            key,
            column,
            kind: ValueKind::Text,
        }
    }

    #[must_use]
    pub const fn integer(key: &'static str, column: &'static str) -> Self {
        Self {
            key,
            column,
            kind: ValueKind::Integer,
        }
    }

    #[must_use]
    pub const fn float(key: &'static str, column: &'static str) -> Self {
        Self {
            key,
            column,
            kind: ValueKind::Float,
        }
    }
}

/// Pull allow-listed equality filters (`?domain_id=3`) out of the parameters.
///
/// Only the keys in `allowed_keys` are read. Values are trimmed and blank
/// values are left out of the result.
#[must_use]
pub fn extract_filters(params: &ParameterBag, allowed_keys: &[&str]) -> HashMap<String, String> {
    allowed_keys
        .iter()
        .filter_map(|&key| {
            let value = params.get(key)?.trim();
            (!value.is_empty()).then(|| (key.to_owned(), value.to_owned()))
        })
        .collect()
}
