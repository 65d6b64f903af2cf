//! # crudquery
//!
//! Query-string driven filtering, sorting and pagination for list endpoints
//! built on Axum and Sea-ORM.
//!
//! A request such as
//!
//! ```text
//! GET /workers?filter[status]=active,pending&filter[salary][gte]=100&sort=-createdAt,name&page=2&pageSize=10
//! ```
//!
//! is bound into [`QueryParameters`], compiled against per-resource allow-lists
//! ([`FieldMap`] for filters, a column slice for sorting) and executed as a
//! count plus a windowed fetch, producing a [`Page`] envelope.
//!
//! Unknown filter fields, unknown sort fields and malformed pagination degrade
//! silently to defaults. A filter value that cannot be converted to its field's
//! declared [`FieldKind`] is rejected with `400 Bad Request`.

pub mod binding;
pub mod config;
pub mod core;
pub mod errors;
pub mod fields;
pub mod filtering;
pub mod models;

pub use config::QueryLimits;
pub use crate::core::{ListResource, list_handler};
pub use errors::ApiError;
pub use fields::{FieldKind, FieldMap};
pub use filtering::{
    FilterClause, FilterError, FilterOperator, Page, SortField, apply_filters, apply_sorting,
    build_search_condition, paginate, parse_filters, parse_sort,
};
pub use models::{ListParams, QueryParameters};
