use serde::Deserialize;
use utoipa::IntoParams;

use crate::config::{DEFAULT_PAGE, DEFAULT_PAGE_SIZE};
use crate::filtering::{FilterClause, SortField};

/// Everything a list request asked for, bound from its query string.
///
/// Built by [`QueryParameters::bind`] (or the axum extractor). Binding never
/// fails: every malformed piece falls back to its default, so `page` is
/// always at least 1 and `page_size` always within the configured limits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryParameters {
    /// 1-based page number
    pub page: u64,
    /// Rows per page, already clamped
    pub page_size: u64,
    /// The `sort` value as received
    pub sort_raw: Option<String>,
    /// Parsed sort keys in precedence order
    pub sort: Vec<SortField>,
    pub filters: Vec<FilterClause>,
    /// Raw `fields` selection, passed through untouched
    pub fields: Option<String>,
    /// Raw `include` selection, passed through untouched
    pub include: Option<String>,
    /// Free-text search from `search` or `q`
    pub search: Option<String>,
}

impl Default for QueryParameters {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            page_size: DEFAULT_PAGE_SIZE,
            sort_raw: None,
            sort: Vec::new(),
            filters: Vec::new(),
            fields: None,
            include: None,
            search: None,
        }
    }
}

impl QueryParameters {
    /// Rows to skip before the requested page.
    #[must_use]
    pub fn skip(&self) -> u64 {
        self.page.saturating_sub(1).saturating_mul(self.page_size)
    }

    /// `fields` split on commas, trimmed, empties removed.
    #[must_use]
    pub fn fields_list(&self) -> Vec<&str> {
        split_list(self.fields.as_deref())
    }

    /// `include` split on commas, trimmed, empties removed.
    #[must_use]
    pub fn include_list(&self) -> Vec<&str> {
        split_list(self.include.as_deref())
    }
}

fn split_list(raw: Option<&str>) -> Vec<&str> {
    raw.map(|raw| {
        raw.split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect()
    })
    .unwrap_or_default()
}

/// Query parameters accepted by every list endpoint.
///
/// Documentation only: requests are bound with [`QueryParameters`], which
/// also understands the repeated `filter[<field>]` / `filter[<field>][<op>]`
/// keys that a derived `IntoParams` cannot describe.
///
/// # Filtering
/// - `filter[status]=active,pending`: equality, values OR-ed
/// - `filter[salary][gte]=100`: operators `eq`, `gt`, `gte`, `lt`, `lte`,
///   `contains`, `startswith`, `endswith`, `isnull` (case-insensitive)
/// - Clauses on different fields are AND-ed. Unknown fields are ignored.
///
/// # Pagination
/// `page` (default 1) and `pageSize` (default 20, at most 100). `per_page`
/// and `limit` are accepted when `pageSize` is absent.
///
/// # Sorting
/// `sort=-createdAt,name`: `-` descending, `+` or nothing ascending.
#[derive(Debug, Deserialize, IntoParams, Default)]
#[into_params(parameter_in = Query)]
pub struct ListParams {
    /// Page number (1-based).
    #[param(example = 1)]
    pub page: Option<i64>,
    /// Number of items per page, clamped to [1, 100].
    #[serde(rename = "pageSize")]
    #[param(example = 20)]
    pub page_size: Option<i64>,
    /// Alias of `pageSize`, used only when `pageSize` is absent.
    #[param(example = 20)]
    pub per_page: Option<i64>,
    /// Alias of `pageSize`, used only when `pageSize` and `per_page` are absent.
    #[param(example = 20)]
    pub limit: Option<i64>,
    /// Comma-separated sort keys; prefix `-` for descending.
    #[param(example = "-createdAt,name")]
    pub sort: Option<String>,
    /// Free-text search across the resource's searchable fields.
    #[param(example = "smith")]
    pub search: Option<String>,
    /// Alias of `search`.
    #[param(example = "smith")]
    pub q: Option<String>,
    /// Comma-separated field selection, passed through to the response layer.
    #[param(example = "id,name")]
    pub fields: Option<String>,
    /// Comma-separated relations to include, passed through to the response layer.
    #[param(example = "manager")]
    pub include: Option<String>,
}
