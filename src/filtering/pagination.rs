use serde::Serialize;
use utoipa::ToSchema;

use crate::models::ParameterBag;

pub const DEFAULT_PAGE_SIZE: u64 = 20;
pub const MAX_PAGE_SIZE: u64 = 100;

/// Per-endpoint pagination bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationOptions {
    /// Page size used when `pageSize` is absent or unusable.
    pub default_page_size: u64,
    /// Ceiling applied to every page size, requested or default.
    pub max_page_size: u64,
}

impl Default for PaginationOptions {
    fn default() -> Self {
        Self {
            default_page_size: DEFAULT_PAGE_SIZE,
            max_page_size: MAX_PAGE_SIZE,
        }
    }
}

/// Resolved pagination window for one request.
///
/// Always satisfies `page >= 1`, `1 <= page_size <= max_page_size` and
/// `offset == (page - 1) * page_size`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pagination {
    pub page: u64,
    pub page_size: u64,
    pub offset: u64,
    /// Trimmed search term, `None` when absent or blank.
    pub search: Option<String>,
}

/// Parse a page or page-size value, flooring fractional input.
///
/// Returns `None` for anything that does not floor to a positive integer.
fn parse_positive(raw: Option<&str>) -> Option<u64> {
    let value: f64 = raw?.trim().parse().ok()?;
    if !value.is_finite() || value < 1.0 {
        return None;
    }
    // Float to int `as` casts saturate, so huge values land on u64::MAX
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    Some(value.floor() as u64)
}

/// Resolve `page`, `pageSize` and `search` from the request parameters.
///
/// Never fails: unusable values fall back to page 1 and the default page
/// size, and oversized page sizes are capped at `options.max_page_size`.
#[must_use]
pub fn resolve_pagination(params: &ParameterBag, options: PaginationOptions) -> Pagination {
    let max_page_size = options.max_page_size.max(1);

    let page = parse_positive(params.get("page")).unwrap_or(1);
    let requested = parse_positive(params.get("pageSize"))
        .unwrap_or_else(|| options.default_page_size.max(1));

    if requested > max_page_size {
        tracing::debug!(requested, max_page_size, "Capping requested page size");
    }
    let page_size = requested.min(max_page_size);
    let offset = (page - 1).saturating_mul(page_size);

    let search = params
        .get("search")
        .map(str::trim)
        .filter(|term| !term.is_empty())
        .map(str::to_owned);

    Pagination {
        page,
        page_size,
        offset,
        search,
    }
}

/// Pagination block of the list response envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    pub page: u64,
    pub page_size: u64,
    pub total: u64,
    pub total_pages: u64,
    pub has_next_page: bool,
}

impl PageMeta {
    #[must_use]
    pub fn new(pagination: &Pagination, total: u64) -> Self {
        let page_size = pagination.page_size.max(1);
        Self {
            page: pagination.page,
            page_size,
            total,
            total_pages: total.div_ceil(page_size),
            has_next_page: pagination.page.saturating_mul(page_size) < total,
        }
    }
}
