use async_trait::async_trait;
use sea_orm::{ConnectionTrait, DatabaseConnection, DbErr, FromQueryResult};
use serde::Serialize;

use crate::filtering::{
    EqualityFilter, FilterConfig, PaginationOptions, SortOptions, SortOrder, build_search_clause,
    extract_filters, parse_filters, resolve_pagination, resolve_sort,
};
use crate::models::ParameterBag;
use crate::statement::{ListPlan, WhereClause};

/// A listable backoffice resource: its SQL and the allow-lists that decide
/// which request parameters may shape the query.
///
/// Every column returned by the allow-list hooks is trusted program text.
#[async_trait]
pub trait ListResource: Sized + Send + Sync {
    type Row: FromQueryResult + Serialize + Send + Sync + 'static;

    const RESOURCE_NAME_PLURAL: &'static str;
    /// `SELECT .. FROM .. [JOIN ..]` without `WHERE`, `ORDER BY` or `LIMIT`.
    const SELECT_SQL: &'static str;
    /// `SELECT COUNT(*) FROM ..` over the same tables as `SELECT_SQL`.
    const COUNT_SQL: &'static str;

    #[must_use]
    fn pagination_options() -> PaginationOptions {
        PaginationOptions::default()
    }

    /// Query keys filtered by plain equality, e.g.
    /// `EqualityFilter::integer("domain_id", "t.domain_id")`.
    #[must_use]
    fn simple_filters() -> Vec<EqualityFilter> {
        Vec::new()
    }

    #[must_use]
    fn search_columns() -> Vec<&'static str> {
        Vec::new()
    }

    #[must_use]
    fn filter_config() -> FilterConfig {
        FilterConfig::new()
    }

    #[must_use]
    fn sortable_columns() -> Vec<(&'static str, &'static str)>;

    #[must_use]
    fn default_sort_field() -> &'static str;

    #[must_use]
    fn default_sort_order() -> SortOrder {
        SortOrder::Desc
    }

    async fn fetch_page(db: &DatabaseConnection, plan: &ListPlan) -> Result<Vec<Self::Row>, DbErr> {
        let stmt = plan.select_statement(db.get_database_backend(), Self::SELECT_SQL);
        Self::Row::find_by_statement(stmt).all(db).await
    }

    async fn total_count(db: &DatabaseConnection, plan: &ListPlan) -> Result<u64, DbErr> {
        let stmt = plan.count_statement(db.get_database_backend(), Self::COUNT_SQL);
        let total: i64 = match db.query_one(stmt).await? {
            Some(row) => row.try_get_by_index(0)?,
            None => 0,
        };
        Ok(u64::try_from(total).unwrap_or(0))
    }
}

/// Run the whole translation for one request.
///
/// `WHERE` fragments are emitted as equality filters, then search, then the
/// `filters` array; bind values follow the same order.
#[must_use]
pub fn build_list_plan<T: ListResource>(params: &ParameterBag) -> ListPlan {
    let pagination = resolve_pagination(params, T::pagination_options());

    let simple = T::simple_filters();
    let keys: Vec<&str> = simple.iter().map(|filter| filter.key).collect();
    let equality = extract_filters(params, &keys);
    let search = build_search_clause(&T::search_columns(), pagination.search.as_deref());
    let advanced = parse_filters(params, &T::filter_config());

    let sortable = T::sortable_columns();
    let sort_options = SortOptions::new(&sortable, T::default_sort_field())
        .default_order(T::default_sort_order());
    let sort = resolve_sort(params, &sort_options);

    let mut filter = WhereClause::new();
    filter.push_simple_filters(&equality, &simple);
    filter.push_search(search);
    filter.push_filters(advanced);

    ListPlan {
        pagination,
        sort,
        filter,
    }
}
