use sea_orm::{
    ColumnTrait, Condition,
    sea_query::{BinOper, Expr, Func, SimpleExpr},
};

// Basic safety limits
const MAX_SEARCH_QUERY_LENGTH: usize = 10_000;

/// Escape character declared on every generated `LIKE`.
///
/// `!` has no meaning inside a string literal on any supported backend, so the
/// rendered `ESCAPE '!'` clause is identical everywhere.
pub(crate) const LIKE_ESCAPE: char = '!';

/// Escape LIKE wildcards so client text only ever matches literally.
/// Escapes: the escape character itself, % (match any) and _ (match single char)
pub(crate) fn escape_like_wildcards(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        if ch == LIKE_ESCAPE || ch == '%' || ch == '_' {
            out.push(LIKE_ESCAPE);
        }
        out.push(ch);
    }
    out
}

/// Where the literal text must occur in the column value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LikeMatch {
    Contains,
    StartsWith,
    EndsWith,
}

impl LikeMatch {
    fn pattern(self, value: &str) -> String {
        let escaped = escape_like_wildcards(value);
        match self {
            Self::Contains => format!("%{escaped}%"),
            Self::StartsWith => format!("{escaped}%"),
            Self::EndsWith => format!("%{escaped}"),
        }
    }
}

/// Build `UPPER(column) LIKE UPPER(pattern) ESCAPE '!'`.
///
/// Both sides are folded by the database, so the match is as
/// case-insensitive as its `UPPER()` and never disagrees with it. The value
/// is always bound as a parameter.
pub(crate) fn build_like_condition<C: ColumnTrait>(
    column: C,
    value: &str,
    mode: LikeMatch,
) -> SimpleExpr {
    let pattern = SimpleExpr::Binary(
        Box::new(Func::upper(Expr::val(mode.pattern(value))).into()),
        BinOper::Escape,
        Box::new(SimpleExpr::Constant(LIKE_ESCAPE.into())),
    );
    Expr::expr(Func::upper(Expr::col((column.entity_name(), column))))
        .binary(BinOper::Like, pattern)
}

/// Build the free-text search predicate: a case-insensitive `contains` match
/// of `query` against any of `searchable_columns`.
///
/// Returns `None` for a blank query or when the resource has nothing
/// searchable.
#[must_use]
pub fn build_search_condition<C: ColumnTrait>(
    query: &str,
    searchable_columns: &[(&str, C)],
) -> Option<Condition> {
    let query = query.trim();
    if query.is_empty() || searchable_columns.is_empty() {
        return None;
    }

    let sanitized: String = query.chars().take(MAX_SEARCH_QUERY_LENGTH).collect();
    let condition = searchable_columns
        .iter()
        .fold(Condition::any(), |condition, (_, column)| {
            condition.add(build_like_condition(*column, &sanitized, LikeMatch::Contains))
        });
    Some(condition)
}
