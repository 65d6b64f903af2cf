use async_trait::async_trait;
use sea_orm::{DatabaseConnection, EntityTrait, Order, QueryFilter, Select};

use crate::config::MAX_PAGE_SIZE;
use crate::errors::ApiError;
use crate::fields::FieldMap;
use crate::filtering::{Page, apply_filters, apply_sorting, build_search_condition, paginate};
use crate::models::QueryParameters;

type ColumnOf<R> = <<R as ListResource>::EntityType as EntityTrait>::Column;

/// A listable API resource backed by one Sea-ORM entity.
///
/// The implementor is the response DTO; rows are converted with
/// `From<Model>`. Everything a client may filter, sort or search on has to be
/// listed here explicitly.
///
/// ```rust,ignore
/// #[async_trait]
/// impl ListResource for Worker {
///     type EntityType = worker::Entity;
///     const RESOURCE_NAME_PLURAL: &'static str = "workers";
///
///     fn filterable_fields() -> FieldMap<worker::Entity> {
///         FieldMap::new()
///             .insert("status", worker::Column::Status, FieldKind::Enum(STATUSES))
///             .insert("salary", worker::Column::Salary, FieldKind::I64)
///     }
///
///     fn sortable_columns() -> Vec<(&'static str, worker::Column)> {
///         vec![("name", worker::Column::Name), ("createdAt", worker::Column::CreatedAt)]
///     }
///
///     fn default_sort() -> (worker::Column, Order) {
///         (worker::Column::CreatedAt, Order::Desc)
///     }
/// }
/// ```
#[async_trait]
pub trait ListResource: Sized + Send + Sync
where
    Self::EntityType: EntityTrait + Sync,
    <Self::EntityType as EntityTrait>::Model: Sync,
    Self: From<<Self::EntityType as EntityTrait>::Model>,
{
    type EntityType: EntityTrait + Sync;

    const RESOURCE_NAME_PLURAL: &'static str;
    /// Per-resource page size ceiling; never above the global one.
    const MAX_PAGE_SIZE: u64 = MAX_PAGE_SIZE;

    /// Fields accepted in `filter[...]`.
    fn filterable_fields() -> FieldMap<Self::EntityType>;

    /// Fields accepted in `sort`, by public name.
    fn sortable_columns() -> Vec<(&'static str, ColumnOf<Self>)>;

    /// Ordering used when no requested sort field is sortable.
    fn default_sort() -> (ColumnOf<Self>, Order);

    /// Columns matched by `search` / `q`. Default is empty - no search.
    #[must_use]
    fn searchable_columns() -> Vec<(&'static str, ColumnOf<Self>)> {
        vec![]
    }

    /// Starting query for every listing; scope it here (tenant, soft delete).
    #[must_use]
    fn base_query() -> Select<Self::EntityType> {
        Self::EntityType::find()
    }

    /// One-line summary of the accepted filter, sort and search keys, for an
    /// OpenAPI operation description.
    #[must_use]
    fn query_description() -> String {
        let filters = Self::filterable_fields();
        let names_of = |columns: Vec<(&'static str, ColumnOf<Self>)>| {
            columns.into_iter().map(|(name, _)| name).collect::<Vec<_>>()
        };
        let sortable = names_of(Self::sortable_columns());
        let searchable = names_of(Self::searchable_columns());

        let mut description = format!(
            "Filterable: {}. Sortable: {}.",
            filters.names().join(", "),
            sortable.join(", ")
        );
        if !searchable.is_empty() {
            description.push_str(&format!(" Searchable: {}.", searchable.join(", ")));
        }
        description
    }

    /// Run a bound request: filters and search, then sort, then one page.
    ///
    /// # Errors
    ///
    /// [`ApiError::BadRequest`] when a filter value does not fit its field,
    /// [`ApiError::Database`] when either query fails.
    async fn list(
        db: &DatabaseConnection,
        params: &QueryParameters,
    ) -> Result<Page<Self>, ApiError> {
        let mut condition = apply_filters(&params.filters, &Self::filterable_fields())?;
        if let Some(search) = params.search.as_deref() {
            if let Some(search_condition) =
                build_search_condition(search, &Self::searchable_columns())
            {
                condition = condition.add(search_condition);
            }
        }

        let mut select = Self::base_query();
        if !condition.is_empty() {
            select = select.filter(condition);
        }
        let select = apply_sorting(
            select,
            &params.sort,
            &Self::sortable_columns(),
            Self::default_sort(),
        );

        let page_size = params
            .page_size
            .min(Self::MAX_PAGE_SIZE.min(MAX_PAGE_SIZE))
            .max(1);
        let page = paginate(select, db, params.page, page_size).await?;

        Ok(page.map(Self::from))
    }
}
