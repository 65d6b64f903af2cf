use sea_orm::{ColumnTrait, Condition, EntityTrait, Value, sea_query::SimpleExpr};
use thiserror::Error;

use super::parser::{FilterClause, FilterOperator};
use super::search::{LikeMatch, build_like_condition};
use crate::fields::{Field, FieldKind, FieldMap};

/// A filter clause on a known field that cannot be compiled.
///
/// Unknown fields never produce this error; they are dropped.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FilterError {
    #[error("Invalid value '{value}' for filter '{field}': expected {expected}")]
    InvalidValue {
        field: String,
        value: String,
        expected: FieldKind,
    },

    #[error("Operator '{operator}' is not supported for filter '{field}' of type {kind}")]
    UnsupportedOperator {
        field: String,
        operator: FilterOperator,
        kind: FieldKind,
    },
}

impl FilterError {
    /// Public name of the offending filter field.
    #[must_use]
    pub fn field(&self) -> &str {
        match self {
            Self::InvalidValue { field, .. } | Self::UnsupportedOperator { field, .. } => field,
        }
    }
}

fn coerce<E: EntityTrait>(
    clause: &FilterClause,
    field: &Field<E>,
    raw: &str,
) -> Result<Value, FilterError> {
    field.kind.coerce(raw).ok_or_else(|| {
        tracing::debug!(field = %clause.field, value = raw, kind = %field.kind, "Filter value failed type conversion");
        FilterError::InvalidValue {
            field: clause.field.clone(),
            value: raw.to_string(),
            expected: field.kind,
        }
    })
}

/// Compile one clause against its resolved field.
fn build_clause_condition<E: EntityTrait>(
    clause: &FilterClause,
    field: &Field<E>,
) -> Result<Option<Condition>, FilterError> {
    let column = field.column;

    // Only the first value is meaningful for everything except equality.
    let expr: SimpleExpr = match (clause.operator, clause.values.first()) {
        (FilterOperator::IsNull, _) => {
            if clause.is_null_requested() {
                column.is_null()
            } else {
                column.is_not_null()
            }
        }
        (_, None) => return Ok(None),
        (FilterOperator::Eq, Some(_)) => {
            let mut any = Condition::any();
            for raw in &clause.values {
                any = any.add(column.eq(coerce(clause, field, raw)?));
            }
            return Ok(Some(any));
        }
        (FilterOperator::Gt, Some(first)) => column.gt(coerce(clause, field, first)?),
        (FilterOperator::Gte, Some(first)) => column.gte(coerce(clause, field, first)?),
        (FilterOperator::Lt, Some(first)) => column.lt(coerce(clause, field, first)?),
        (FilterOperator::Lte, Some(first)) => column.lte(coerce(clause, field, first)?),
        (
            operator @ (FilterOperator::Contains
            | FilterOperator::StartsWith
            | FilterOperator::EndsWith),
            Some(first),
        ) => {
            if !field.kind.is_textual() {
                return Err(FilterError::UnsupportedOperator {
                    field: clause.field.clone(),
                    operator,
                    kind: field.kind,
                });
            }
            let mode = match operator {
                FilterOperator::StartsWith => LikeMatch::StartsWith,
                FilterOperator::EndsWith => LikeMatch::EndsWith,
                _ => LikeMatch::Contains,
            };
            build_like_condition(column, first, mode)
        }
    };

    Ok(Some(Condition::all().add(expr)))
}

/// Compile parsed filter clauses into a single `Condition`.
///
/// Clauses are AND-ed together; the values of one equality clause are OR-ed.
/// A clause whose field is not in `fields` is dropped, so an empty or fully
/// unknown filter list yields an empty condition. Callers skip empty
/// conditions (see [`Condition::is_empty`]) so the query matches every row.
///
/// # Errors
///
/// Returns [`FilterError`] when a value of a known field cannot be converted
/// to the field's [`FieldKind`], or when a string operator targets a
/// non-string field.
pub fn apply_filters<E: EntityTrait>(
    filters: &[FilterClause],
    fields: &FieldMap<E>,
) -> Result<Condition, FilterError> {
    let mut condition = Condition::all();

    for clause in filters {
        let Some(field) = fields.get(&clause.field) else {
            tracing::debug!(field = %clause.field, "Dropping filter on unknown field");
            continue;
        };

        if let Some(clause_condition) = build_clause_condition(clause, field)? {
            condition = condition.add(clause_condition);
        }
    }

    Ok(condition)
}
