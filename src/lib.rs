pub mod errors;
pub mod filtering;
pub mod models;
pub mod resource;
pub mod routes;
pub mod statement;

pub use errors::ApiError;
pub use models::{ListQuery, ListResponse, ParameterBag};
pub use resource::{ListResource, build_list_plan};
pub use routes::{list_handler, list_router};
pub use statement::{ListPlan, WhereClause};
