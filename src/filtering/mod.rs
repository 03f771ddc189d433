//! # Query Parameter Translation
//!
//! Turns the untrusted query string of a list endpoint into SQL fragments with
//! positional `?` placeholders and a matching list of bind values. Nothing here
//! performs I/O or keeps state; every function is total and degrades malformed
//! input to a safe default instead of failing the request.
//!
//! ## Main Components
//!
//! - **[`resolve_pagination`]**: `page`, `pageSize` and `search`
//! - **[`extract_filters`]**: allow-listed equality filters such as `domain_id=3`
//! - **[`build_search_clause`]**: OR-chained `LIKE` search with escaped wildcards
//! - **[`parse_filters`]**: the JSON `filters` array (`eq`, `like`, `gte`, `lte`)
//! - **[`resolve_sort`]**: `sortField` / `sortOrder` mapped through an allow-list
//!
//! ## Query Parameter Examples
//!
//! ```rust,ignore
//! // Second page of 50, newest first
//! GET /clients?page=2&pageSize=50&sortField=created&sortOrder=desc
//!
//! // Free-text search over the endpoint's search columns
//! GET /participants?search=martin
//!
//! // Equality filter on an allow-listed key
//! GET /templates?domain_id=4
//!
//! // Structured filters (URL-encoded JSON)
//! GET /payments?filters=[{"field":"amount","operator":"gte","value":100}]
//! ```
//!
//! ## Trust Boundary
//!
//! Column references only ever come from caller configuration
//! ([`FilterConfig`], [`SortOptions`], search column lists). Client text is
//! either bound as a parameter or used as a lookup key into those allow-lists.
//!
//! ```rust
//! use backoffice_query::filtering::{
//!     FilterConfig, FilterField, FilterOperator, parse_filters,
//! };
//! use backoffice_query::models::ParameterBag;
//!
//! let config = FilterConfig::new()
//!     .field("name", FilterField::new("p.name").operator(FilterOperator::Like));
//! let params = ParameterBag::from_query_string(
//!     "filters=%5B%7B%22field%22%3A%22name%22%2C%22value%22%3A%22jo%22%7D%5D",
//! );
//!
//! let parsed = parse_filters(&params, &config);
//! assert_eq!(parsed.clauses, vec!["p.name LIKE ?".to_string()]);
//! ```

pub mod conditions;
pub mod pagination;
pub mod search;
pub mod simple;
pub mod sort;

// Re-export commonly used items
pub use conditions::{
    FILTERS_PARAM, FilterConfig, FilterField, FilterOperator, FilterValue, ParsedFilters,
    parse_filters,
};
pub use pagination::{PageMeta, Pagination, PaginationOptions, resolve_pagination};
pub use search::{SearchClause, build_search_clause, escape_like_wildcards};
pub use simple::{EqualityFilter, ValueKind, extract_filters};
pub use sort::{SortOptions, SortOrder, SortSpec, resolve_sort};
