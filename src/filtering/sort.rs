use crate::models::ParameterBag;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    /// Case-insensitive `asc` / `desc`; anything else is `None`.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        if raw.eq_ignore_ascii_case("asc") {
            Some(Self::Asc)
        } else if raw.eq_ignore_ascii_case("desc") {
            Some(Self::Desc)
        } else {
            None
        }
    }

    #[must_use]
    pub const fn as_sql(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

/// Sortable fields of an endpoint and its fallback ordering.
#[derive(Debug, Clone, Copy)]
pub struct SortOptions<'a> {
    /// `(logical name, column)` pairs a client may sort by.
    pub allowed_fields: &'a [(&'a str, &'static str)],
    /// Logical name used when the request names no usable field.
    pub default_field: &'static str,
    pub default_order: SortOrder,
}

impl<'a> SortOptions<'a> {
    #[must_use]
    pub const fn new(
        allowed_fields: &'a [(&'a str, &'static str)],
        default_field: &'static str,
    ) -> Self {
        Self {
            allowed_fields,
            default_field,
            default_order: SortOrder::Desc,
        }
    }

    #[must_use]
    pub const fn default_order(mut self, order: SortOrder) -> Self {
        self.default_order = order;
        self
    }
}

/// Resolved `ORDER BY` target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortSpec {
    pub column: &'static str,
    pub order: SortOrder,
    /// `"<column> <ASC|DESC>"`
    pub order_by: String,
}

/// Find column by logical name
fn find_column(name: &str, columns: &[(&str, &'static str)]) -> Option<&'static str> {
    columns
        .iter()
        .find(|&&(field, _)| field == name)
        .map(|&(_, column)| column)
}

/// Resolve `sortField` / `sortOrder` against the endpoint's sortable fields.
///
/// The returned column is always taken from `options`, never from the
/// request: ORDER BY cannot be bound, so an unknown field falls back to the
/// default instead. If `default_field` is itself missing from the allow-list
/// it is used as written.
#[must_use]
pub fn resolve_sort(params: &ParameterBag, options: &SortOptions<'_>) -> SortSpec {
    let requested = params.get("sortField");
    let column = requested
        .and_then(|field| find_column(field, options.allowed_fields))
        .unwrap_or_else(|| {
            if let Some(field) = requested {
                tracing::debug!(field = %field, "Unknown sort field, using default");
            }
            find_column(options.default_field, options.allowed_fields)
                .unwrap_or(options.default_field)
        });

    let order = params
        .get("sortOrder")
        .and_then(SortOrder::parse)
        .unwrap_or(options.default_order);

    SortSpec {
        column,
        order,
        order_by: format!("{column} {}", order.as_sql()),
    }
}
