//! Query-string binding for [`QueryParameters`].
//!
//! Binding is best effort and never fails. Pagination values that do not
//! parse fall back to their defaults and are then clamped; `filter[...]` and
//! `sort` are delegated to their parsers.

use std::convert::Infallible;

use axum::{extract::FromRequestParts, http::request::Parts};
use url::form_urlencoded;

use crate::config::{DEFAULT_PAGE, QueryLimits};
use crate::filtering::{parse_filters, parse_sort};
use crate::models::QueryParameters;

/// Accepted page-size keys, highest priority first.
const PAGE_SIZE_KEYS: [&str; 3] = ["pageSize", "per_page", "limit"];
/// Accepted search keys, highest priority first.
const SEARCH_KEYS: [&str; 2] = ["search", "q"];

fn first_value<'a, K, V>(pairs: &'a [(K, V)], key: &str) -> Option<&'a str>
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    pairs
        .iter()
        .find(|(k, _)| k.as_ref() == key)
        .map(|(_, v)| v.as_ref())
}

fn parse_int(raw: &str) -> Option<i64> {
    raw.trim().parse().ok()
}

impl QueryParameters {
    /// Bind decoded query-string pairs with the default [`QueryLimits`].
    #[must_use]
    pub fn bind<K, V>(pairs: &[(K, V)]) -> Self
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        Self::bind_with_limits(pairs, &QueryLimits::default())
    }

    /// Bind decoded query-string pairs.
    ///
    /// - `page`: first value, default 1, at least 1
    /// - page size: the first of `pageSize`, `per_page`, `limit` that is
    ///   *present* decides; an unparsable value means the default. Always
    ///   clamped to `[1, limits.max_page_size]`.
    /// - search: first non-empty of `search`, then `q`
    #[must_use]
    pub fn bind_with_limits<K, V>(pairs: &[(K, V)], limits: &QueryLimits) -> Self
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let page = first_value(pairs, "page")
            .and_then(|raw| {
                let parsed = parse_int(raw);
                if parsed.is_none() {
                    tracing::debug!(value = raw, "Unparsable page, using default");
                }
                parsed
            })
            .map_or(DEFAULT_PAGE, QueryLimits::clamp_page);

        let page_size = PAGE_SIZE_KEYS
            .iter()
            .find_map(|key| first_value(pairs, key))
            .and_then(|raw| {
                let parsed = parse_int(raw);
                if parsed.is_none() {
                    tracing::debug!(value = raw, "Unparsable page size, using default");
                }
                parsed
            })
            .map_or(limits.default_page_size, |n| limits.clamp_page_size(n));

        let search = SEARCH_KEYS.iter().find_map(|key| {
            first_value(pairs, key)
                .filter(|v| !v.trim().is_empty())
                .map(str::to_string)
        });

        let sort_raw = first_value(pairs, "sort").map(str::to_string);
        let sort = parse_sort(sort_raw.as_deref());

        Self {
            page,
            page_size,
            sort,
            sort_raw,
            filters: parse_filters(pairs),
            fields: first_value(pairs, "fields").map(str::to_string),
            include: first_value(pairs, "include").map(str::to_string),
            search,
        }
    }

    /// Decode a raw (percent-encoded) query string and bind it.
    #[must_use]
    pub fn from_query_str(query: &str) -> Self {
        let pairs: Vec<(String, String)> = form_urlencoded::parse(query.as_bytes())
            .into_owned()
            .collect();
        Self::bind(&pairs)
    }
}

/// Extract [`QueryParameters`] from the request URI. Never rejects.
impl<S> FromRequestParts<S> for QueryParameters
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self::from_query_str(parts.uri.query().unwrap_or_default()))
    }
}
