use axum::http::header::HeaderMap;
use sea_orm::{ConnectionTrait, DbErr, EntityTrait, PaginatorTrait, QuerySelect, Select};
use serde::Serialize;

/// One page of a filtered, sorted listing.
///
/// `total_count` is the size of the whole filtered set, independent of
/// `page`; a page past the end has no items but keeps the real count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total_count: u64,
    pub page: u64,
    pub page_size: u64,
    pub total_pages: u64,
    pub has_next_page: bool,
    pub has_previous_page: bool,
}

impl<T> Page<T> {
    /// Build a page and derive the navigation fields from the three counters.
    #[must_use]
    pub fn new(items: Vec<T>, total_count: u64, page: u64, page_size: u64) -> Self {
        let total_pages = if page_size == 0 {
            0
        } else {
            total_count.div_ceil(page_size)
        };
        Self {
            items,
            total_count,
            page,
            page_size,
            total_pages,
            has_next_page: page < total_pages,
            has_previous_page: page > 1,
        }
    }

    /// Convert every item, keeping the counters.
    #[must_use]
    pub fn map<U, F>(self, f: F) -> Page<U>
    where
        F: FnMut(T) -> U,
    {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total_count: self.total_count,
            page: self.page,
            page_size: self.page_size,
            total_pages: self.total_pages,
            has_next_page: self.has_next_page,
            has_previous_page: self.has_previous_page,
        }
    }

    /// Number of rows skipped before this page.
    #[must_use]
    pub fn offset(&self) -> u64 {
        self.page.saturating_sub(1).saturating_mul(self.page_size)
    }

    /// `Content-Range` header describing the rows of this page.
    ///
    /// Formatted as `<resource> <first>-<last>/<total>`. An empty page reports
    /// `<resource> */<total>`.
    #[must_use]
    pub fn content_range(&self, resource_name: &str) -> HeaderMap {
        let safe_name = sanitize_resource_name(resource_name);
        let offset = self.offset();
        let content_range = if self.items.is_empty() {
            format!("{safe_name} */{}", self.total_count)
        } else {
            let last = offset + self.items.len() as u64 - 1;
            format!("{safe_name} {offset}-{last}/{}", self.total_count)
        };

        let mut headers = HeaderMap::new();
        if let Ok(value) = content_range.parse() {
            headers.insert("Content-Range", value);
        }
        headers
    }
}

/// Strip everything that is not printable ASCII so the name is header-safe.
fn sanitize_resource_name(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_ascii() && !c.is_ascii_control())
        .collect()
}

const MAX_BOUND_ROWS: u64 = i64::MAX.unsigned_abs();

/// Count the filtered set, then fetch one window of it.
///
/// `page` is clamped to at least 1 and `page_size` to at least 1 here as
/// well, so a hand-built call cannot produce a negative offset or an empty
/// window. A window starting at or past `total_count` is answered from the
/// count alone, so any `page` up to `u64::MAX` yields an empty page. Dropping
/// the returned future cancels the query in flight.
///
/// # Errors
///
/// Propagates the [`DbErr`] of either query.
pub async fn paginate<E, C>(
    select: Select<E>,
    db: &C,
    page: u64,
    page_size: u64,
) -> Result<Page<E::Model>, DbErr>
where
    E: EntityTrait,
    E::Model: Send + Sync + 'static,
    C: ConnectionTrait,
{
    let page = page.max(1);
    let page_size = page_size.max(1);

    let total_count = select.clone().count(db).await?;
    let offset = (page - 1).saturating_mul(page_size);
    if offset >= total_count {
        tracing::debug!(total_count, page, page_size, "Page starts past the last row");
        return Ok(Page::new(Vec::new(), total_count, page, page_size));
    }

    // Drivers bind LIMIT as a signed 64-bit integer.
    let limit = page_size.min(MAX_BOUND_ROWS);
    let items = select.offset(offset).limit(limit).all(db).await?;
    tracing::debug!(total_count, page, page_size, returned = items.len(), "Fetched page");

    Ok(Page::new(items, total_count, page, page_size))
}
