//! Pagination limits applied while binding query parameters.

/// Page used when `page` is absent or unparsable.
pub const DEFAULT_PAGE: u64 = 1;
/// Page size used when no page-size key is present or its value is unparsable.
pub const DEFAULT_PAGE_SIZE: u64 = 20;
/// Hard ceiling for the page size, whatever the client asks for.
pub const MAX_PAGE_SIZE: u64 = 100;

/// Bounds for page size binding.
///
/// The defaults reproduce the public wire contract (`20` per page, at most
/// `100`). A service may bind with tighter limits through
/// [`QueryParameters::bind_with_limits`](crate::QueryParameters::bind_with_limits).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryLimits {
    pub default_page_size: u64,
    pub max_page_size: u64,
}

impl Default for QueryLimits {
    fn default() -> Self {
        Self {
            default_page_size: DEFAULT_PAGE_SIZE,
            max_page_size: MAX_PAGE_SIZE,
        }
    }
}

impl QueryLimits {
    /// Build limits, keeping `max_page_size` within `[1, MAX_PAGE_SIZE]` and the
    /// default within `[1, max_page_size]`.
    #[must_use]
    pub fn new(default_page_size: u64, max_page_size: u64) -> Self {
        let max_page_size = max_page_size.clamp(1, MAX_PAGE_SIZE);
        Self {
            default_page_size: default_page_size.clamp(1, max_page_size),
            max_page_size,
        }
    }

    /// Clamp a client supplied page size into `[1, max_page_size]`.
    #[must_use]
    pub fn clamp_page_size(&self, page_size: i64) -> u64 {
        let max = i64::try_from(self.max_page_size).unwrap_or(i64::MAX);
        // Non-negative after the clamp, so the conversion cannot fail.
        u64::try_from(page_size.clamp(1, max)).unwrap_or(1)
    }

    /// Clamp a client supplied page number to at least `1`.
    #[must_use]
    pub fn clamp_page(page: i64) -> u64 {
        u64::try_from(page.max(1)).unwrap_or(DEFAULT_PAGE)
    }
}
