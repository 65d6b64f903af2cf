use sea_orm::{EntityTrait, QueryOrder, Select, sea_query::Order};

/// One requested sort key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortField {
    pub field: String,
    pub descending: bool,
}

impl SortField {
    #[must_use]
    pub fn order(&self) -> Order {
        if self.descending { Order::Desc } else { Order::Asc }
    }
}

/// Parse a `sort` value such as `-createdAt,name,+id`.
///
/// A leading `-` means descending, `+` or no prefix ascending. Tokens are
/// trimmed, empty tokens dropped, and the order of the survivors is the sort
/// precedence.
#[must_use]
pub fn parse_sort(sort: Option<&str>) -> Vec<SortField> {
    let Some(sort) = sort else {
        return Vec::new();
    };

    sort.split(',')
        .filter_map(|token| {
            let token = token.trim();
            let (name, descending) = if let Some(name) = token.strip_prefix('-') {
                (name, true)
            } else if let Some(name) = token.strip_prefix('+') {
                (name, false)
            } else {
                (token, false)
            };
            let name = name.trim();
            (!name.is_empty()).then(|| SortField {
                field: name.to_string(),
                descending,
            })
        })
        .collect()
}

/// Find column by name
fn find_column<C: Copy>(column_name: &str, columns: &[(&str, C)]) -> Option<C> {
    columns
        .iter()
        .find(|&&(col_name, _)| col_name == column_name)
        .map(|&(_, col)| col)
}

/// Apply the requested ordering to `select`.
///
/// Every requested field present in `sortable_columns` is applied in request
/// order, so later fields break ties of earlier ones. Unknown fields are
/// skipped. When no requested field is sortable, `default_order` is used.
#[must_use]
pub fn apply_sorting<E>(
    select: Select<E>,
    sort: &[SortField],
    sortable_columns: &[(&str, E::Column)],
    default_order: (E::Column, Order),
) -> Select<E>
where
    E: EntityTrait,
{
    let mut select = select;
    let mut applied = 0usize;

    for sort_field in sort {
        if let Some(column) = find_column(&sort_field.field, sortable_columns) {
            select = select.order_by(column, sort_field.order());
            applied += 1;
        } else {
            tracing::debug!(field = %sort_field.field, "Ignoring unknown sort field");
        }
    }

    if applied == 0 {
        let (column, order) = default_order;
        select = select.order_by(column, order);
    }
    select
}
