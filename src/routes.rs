use axum::{
    Json, Router,
    extract::{Query, State, rejection::QueryRejection},
    routing::get,
};
use sea_orm::DatabaseConnection;
use std::collections::HashMap;

use crate::errors::ApiError;
use crate::filtering::PageMeta;
use crate::models::{ListResponse, ParameterBag};
use crate::resource::{ListResource, build_list_plan};

/// List one page of `T`, shaped by the request's query parameters.
///
/// The connection comes from router state, so each application (and each
/// test) decides which pool the handler runs against.
///
/// # Errors
/// - `400` if the query string cannot be decoded.
/// - `500` if either statement fails; details are logged, not returned.
pub async fn list_handler<T>(
    query: Result<Query<HashMap<String, String>>, QueryRejection>,
    State(db): State<DatabaseConnection>,
) -> Result<Json<ListResponse<T::Row>>, ApiError>
where
    T: ListResource,
{
    let Query(params) = query.map_err(|rejection| ApiError::bad_request(rejection.body_text()))?;
    let plan = build_list_plan::<T>(&ParameterBag::from(params));

    let rows = T::fetch_page(&db, &plan).await?;
    let total = T::total_count(&db, &plan).await?;

    tracing::debug!(
        resource = T::RESOURCE_NAME_PLURAL,
        page = plan.pagination.page,
        page_size = plan.pagination.page_size,
        total,
        "Listed resources"
    );

    Ok(Json(ListResponse::new(rows, PageMeta::new(&plan.pagination, total))))
}

/// Router serving `list_handler::<T>` at `path`.
pub fn list_router<T>(path: &str) -> Router<DatabaseConnection>
where
    T: ListResource + 'static,
{
    Router::new().route(path, get(list_handler::<T>))
}
