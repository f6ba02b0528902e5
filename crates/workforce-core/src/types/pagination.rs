//! Pagination types for list endpoints.

use serde::{Deserialize, Serialize};

/// Default page size.
pub const DEFAULT_PAGE_SIZE: u64 = 10;
/// Maximum page size.
pub const MAX_PAGE_SIZE: u64 = 100;

/// Request parameters for paginated queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    /// Page number (1-based).
    #[serde(default = "default_page")]
    pub page: u64,
    /// Number of items per page.
    #[serde(default = "default_page_size")]
    pub limit: u64,
}

impl PageRequest {
    /// Create a page request, clamping out-of-range values.
    pub fn new(page: u64, limit: u64) -> Self {
        Self {
            page: page.max(1),
            limit: limit.clamp(1, MAX_PAGE_SIZE),
        }
    }

    /// Build from optional query values, falling back to defaults.
    pub fn from_optional(page: Option<u64>, limit: Option<u64>) -> Self {
        Self::new(
            page.unwrap_or_else(default_page),
            limit.unwrap_or(DEFAULT_PAGE_SIZE),
        )
    }

    /// Calculate the SQL `OFFSET` value. Saturates for absurd page numbers.
    pub fn offset(&self) -> u64 {
        self.page.saturating_sub(1).saturating_mul(self.limit)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            limit: DEFAULT_PAGE_SIZE,
        }
    }
}

/// Page metadata returned alongside a slice of items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    /// Total number of matching items across all pages.
    pub total: u64,
    /// Total number of pages (0 when nothing matched).
    pub total_pages: u64,
    /// Current page number (1-based).
    pub page: u64,
    /// Number of items per page.
    pub limit: u64,
    /// Whether a later page exists.
    pub has_next_page: bool,
    /// Whether an earlier page exists.
    pub has_previous_page: bool,
}

impl PageMeta {
    /// Compute metadata for `request` given the total match count.
    pub fn new(request: &PageRequest, total: u64) -> Self {
        let total_pages = total.div_ceil(request.limit.max(1));
        Self {
            total,
            total_pages,
            page: request.page,
            limit: request.limit,
            has_next_page: request.page < total_pages,
            has_previous_page: request.page > 1,
        }
    }
}

/// Paginated response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageResponse<T> {
    /// The items on this page.
    pub items: Vec<T>,
    /// Position of this page within the full result.
    pub pagination: PageMeta,
}

impl<T> PageResponse<T> {
    /// Create a new paginated response.
    pub fn new(items: Vec<T>, request: &PageRequest, total: u64) -> Self {
        Self {
            items,
            pagination: PageMeta::new(request, total),
        }
    }

    /// Slice an already-ordered, already-filtered collection.
    pub fn from_full(all: Vec<T>, request: &PageRequest) -> Self {
        let total = all.len() as u64;
        let items = all
            .into_iter()
            .skip(usize::try_from(request.offset()).unwrap_or(usize::MAX))
            .take(usize::try_from(request.limit).unwrap_or(usize::MAX))
            .collect();
        Self::new(items, request, total)
    }

    /// Transform every item, keeping the page metadata.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> PageResponse<U> {
        PageResponse {
            items: self.items.into_iter().map(f).collect(),
            pagination: self.pagination,
        }
    }
}

fn default_page() -> u64 {
    1
}

fn default_page_size() -> u64 {
    DEFAULT_PAGE_SIZE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamps_limit_and_page() {
        let req = PageRequest::new(0, 500);
        assert_eq!(req.page, 1);
        assert_eq!(req.limit, MAX_PAGE_SIZE);
        assert_eq!(PageRequest::from_optional(None, None), PageRequest::default());
    }

    #[test]
    fn test_twenty_five_items_in_pages_of_ten() {
        let all: Vec<u32> = (0..25).collect();

        let first = PageResponse::from_full(all.clone(), &PageRequest::new(1, 10));
        assert_eq!(first.items.len(), 10);
        assert_eq!(first.pagination.total_pages, 3);
        assert!(first.pagination.has_next_page);
        assert!(!first.pagination.has_previous_page);

        let third = PageResponse::from_full(all, &PageRequest::new(3, 10));
        assert_eq!(third.items, vec![20, 21, 22, 23, 24]);
        assert!(!third.pagination.has_next_page);
        assert!(third.pagination.has_previous_page);
    }

    #[test]
    fn test_huge_page_number_yields_empty_page() {
        let req = PageRequest::from_optional(Some(u64::MAX), Some(10));
        assert_eq!(req.offset(), u64::MAX);
        let page = PageResponse::from_full(vec![1, 2, 3], &req);
        assert!(page.items.is_empty());
        assert_eq!(page.pagination.total, 3);
        assert!(!page.pagination.has_next_page);

        let req = PageRequest::new(u64::MAX / 100 + 2, 100);
        assert!(PageResponse::from_full(vec![1, 2, 3], &req).items.is_empty());
    }

    #[test]
    fn test_empty_result() {
        let page = PageResponse::<u8>::from_full(Vec::new(), &PageRequest::default());
        assert_eq!(page.pagination.total, 0);
        assert_eq!(page.pagination.total_pages, 0);
        assert!(!page.pagination.has_next_page);
    }

    #[test]
    fn test_meta_is_camel_case() {
        let meta = PageMeta::new(&PageRequest::default(), 3);
        let json = serde_json::to_value(meta).expect("serialize");
        assert_eq!(json["hasNextPage"], false);
        assert_eq!(json["totalPages"], 1);
    }
}
