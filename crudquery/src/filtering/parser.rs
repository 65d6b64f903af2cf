//! Bracket-notation filter keys to [`FilterClause`] values.
//!
//! Recognized keys are `filter[<field>]` (implicit `eq`) and
//! `filter[<field>][<operator>]`. Every other key, and every malformed filter
//! key, is skipped without error.

use std::fmt;

// Basic safety limits
const MAX_FIELD_NAME_LENGTH: usize = 100;
const MAX_FIELD_VALUE_LENGTH: usize = 10_000;

/// Comparison operators accepted in `filter[<field>][<operator>]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterOperator {
    /// Equality; several values mean any of them (IN)
    Eq,
    /// Greater than (>)
    Gt,
    /// Greater than or equal (>=)
    Gte,
    /// Less than (<)
    Lt,
    /// Less than or equal (<=)
    Lte,
    /// Case-insensitive substring match
    Contains,
    /// Case-insensitive prefix match
    StartsWith,
    /// Case-insensitive suffix match
    EndsWith,
    /// `true` or `1` selects NULL rows. Any other value, including no value
    /// at all, selects NOT NULL rows.
    IsNull,
}

impl FilterOperator {
    /// Parse an operator token, ignoring ASCII case.
    #[must_use]
    pub fn from_token(token: &str) -> Option<Self> {
        [
            Self::Eq,
            Self::Gt,
            Self::Gte,
            Self::Lt,
            Self::Lte,
            Self::Contains,
            Self::StartsWith,
            Self::EndsWith,
            Self::IsNull,
        ]
        .into_iter()
        .find(|op| op.token().eq_ignore_ascii_case(token))
    }

    /// Wire token for this operator.
    #[must_use]
    pub const fn token(self) -> &'static str {
        match self {
            Self::Eq => "eq",
            Self::Gt => "gt",
            Self::Gte => "gte",
            Self::Lt => "lt",
            Self::Lte => "lte",
            Self::Contains => "contains",
            Self::StartsWith => "startswith",
            Self::EndsWith => "endswith",
            Self::IsNull => "isnull",
        }
    }
}

impl fmt::Display for FilterOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// One parsed filter: a public field name, an operator and its raw values.
///
/// `values` is never empty except for [`FilterOperator::IsNull`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterClause {
    pub field: String,
    pub operator: FilterOperator,
    pub values: Vec<String>,
}

impl FilterClause {
    /// Boolean carried by an `isnull` clause; absent or unrecognized means `false`.
    #[must_use]
    pub fn is_null_requested(&self) -> bool {
        self.values
            .first()
            .is_some_and(|v| v.eq_ignore_ascii_case("true") || v == "1")
    }
}

/// Basic field name validation
fn is_valid_field_name(field_name: &str) -> bool {
    !field_name.is_empty()
        && field_name.len() <= MAX_FIELD_NAME_LENGTH
        && !field_name.starts_with('_')
        && !field_name.contains("..")
}

/// Split `filter[<field>]` / `filter[<field>][<op>]` into its parts.
fn parse_filter_key(key: &str) -> Option<(&str, FilterOperator)> {
    let rest = key.strip_prefix("filter[")?;
    let close = rest.find(']')?;
    let field = &rest[..close];
    let tail = &rest[close + 1..];

    let operator = if tail.is_empty() {
        FilterOperator::Eq
    } else {
        let token = tail.strip_prefix('[')?.strip_suffix(']')?;
        if token.contains('[') || token.contains(']') {
            return None;
        }
        FilterOperator::from_token(token)?
    };

    if field.contains('[') || !is_valid_field_name(field) {
        return None;
    }
    Some((field, operator))
}

/// Parse every `filter[...]` key of a decoded query string.
///
/// Values for the same field and operator are gathered into one clause in the
/// order received, never deduplicated. Equality values are additionally split
/// on commas, so `filter[status]=active,pending` and
/// `filter[status]=active&filter[status]=pending` are the same clause.
pub fn parse_filters<K, V>(pairs: &[(K, V)]) -> Vec<FilterClause>
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    let mut clauses: Vec<FilterClause> = Vec::new();

    for (key, value) in pairs {
        let key = key.as_ref();
        if !key.starts_with("filter[") {
            continue;
        }
        let Some((field, operator)) = parse_filter_key(key) else {
            tracing::debug!(key, "Skipping malformed filter key");
            continue;
        };

        let index = if let Some(index) = clauses
            .iter()
            .position(|c| c.field == field && c.operator == operator)
        {
            index
        } else {
            clauses.push(FilterClause {
                field: field.to_string(),
                operator,
                values: Vec::new(),
            });
            clauses.len() - 1
        };

        let value = value.as_ref();
        if value.len() > MAX_FIELD_VALUE_LENGTH {
            tracing::debug!(field, "Skipping oversized filter value");
            continue;
        }

        let values = &mut clauses[index].values;
        if operator == FilterOperator::Eq {
            values.extend(
                value
                    .split(',')
                    .filter(|part| !part.is_empty())
                    .map(str::to_string),
            );
        } else if !value.is_empty() {
            values.push(value.to_string());
        }
    }

    clauses.retain(|c| c.operator == FilterOperator::IsNull || !c.values.is_empty());
    clauses
}
