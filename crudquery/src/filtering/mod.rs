//! # Filtering, Sorting & Pagination
//!
//! Translation of query-string parameters into Sea-ORM conditions, orderings
//! and page windows.
//!
//! ## Query Parameter Examples
//!
//! ```rust,ignore
//! // Equality, several values OR-ed together
//! GET /workers?filter[status]=active,pending
//!
//! // Comparisons, combined with AND
//! GET /workers?filter[salary][gte]=100&filter[salary][lte]=200
//!
//! // Case-insensitive string matching; % and _ match literally
//! GET /workers?filter[name][contains]=50%
//!
//! // Null checks
//! GET /workers?filter[deletedAt][isnull]=true
//!
//! // Compound sort, descending first key
//! GET /workers?sort=-createdAt,name
//!
//! // Free-text search over the resource's searchable columns
//! GET /workers?q=smith
//!
//! // Pagination (pageSize, per_page or limit; clamped to [1, 100])
//! GET /workers?page=2&pageSize=10
//! ```
//!
//! ## Main Components
//!
//! - [`parse_filters`]: `filter[...]` keys to [`FilterClause`] values
//! - [`apply_filters`]: clauses to a `Condition`, checked against a [`FieldMap`](crate::FieldMap)
//! - [`build_search_condition`]: free-text `OR` over searchable columns
//! - [`parse_sort`] / [`apply_sorting`]: `sort` value to `ORDER BY`
//! - [`paginate`]: count plus windowed fetch into a [`Page`]

pub mod conditions;
pub mod pagination;
pub mod parser;
pub mod search;
pub mod sort;

pub use conditions::{FilterError, apply_filters};
pub use pagination::{Page, paginate};
pub use parser::{FilterClause, FilterOperator, parse_filters};
pub use search::build_search_condition;
pub use sort::{SortField, apply_sorting, parse_sort};
