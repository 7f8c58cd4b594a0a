//! Pagination types for list endpoints.

use serde::{Deserialize, Serialize};

/// Hard cap on the page window, whatever the caller asks for.
const MAX_PER_PAGE: u32 = 100;

/// Request parameters for paginated queries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageRequest {
    /// Page number (1-indexed).
    #[serde(default = "default_page")]
    pub page: u32,
    /// Number of items per page.
    #[serde(default = "default_per_page")]
    pub per_page: u32,
}

fn default_page() -> u32 {
    1
}

fn default_per_page() -> u32 {
    10
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: default_page(),
            per_page: default_per_page(),
        }
    }
}

impl PageRequest {
    /// Effective page size after clamping to `1..=MAX_PER_PAGE`.
    #[must_use]
    pub fn size(&self) -> u32 {
        self.per_page.clamp(1, MAX_PER_PAGE)
    }

    /// Calculates the offset for database queries.
    #[must_use]
    pub fn offset(&self) -> u64 {
        u64::from(self.page.saturating_sub(1)) * u64::from(self.size())
    }

    /// Returns the limit for database queries.
    #[must_use]
    pub fn limit(&self) -> u64 {
        u64::from(self.size())
    }
}

/// Response wrapper for paginated data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageResponse<T> {
    /// The items in the current page.
    pub data: Vec<T>,
    /// Pagination metadata.
    pub meta: PageMeta,
}

/// Pagination metadata.
///
/// `total` always reflects the full (non-deleted) population, independent
/// of the page window.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageMeta {
    /// Current page number.
    pub page: u32,
    /// Items per page.
    pub per_page: u32,
    /// Total number of items across all pages.
    pub total: u64,
    /// Total number of pages.
    pub total_pages: u64,
}

impl<T> PageResponse<T> {
    /// Creates a new paginated response.
    #[must_use]
    pub fn new(data: Vec<T>, request: &PageRequest, total: u64) -> Self {
        let per_page = request.size();
        let total_pages = if total == 0 {
            1
        } else {
            total.div_ceil(u64::from(per_page))
        };

        Self {
            data,
            meta: PageMeta {
                page: request.page,
                per_page,
                total,
                total_pages,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(1, 10, 0)]
    #[case(2, 10, 10)]
    #[case(3, 7, 14)]
    fn test_offset(#[case] page: u32, #[case] per_page: u32, #[case] expected: u64) {
        let request = PageRequest { page, per_page };
        assert_eq!(request.offset(), expected);
    }

    #[test]
    fn test_page_zero_clamps_to_first_window() {
        let request = PageRequest {
            page: 0,
            per_page: 10,
        };
        assert_eq!(request.offset(), 0);
    }

    #[test]
    fn test_per_page_is_clamped() {
        let request = PageRequest {
            page: 1,
            per_page: 10_000,
        };
        assert_eq!(request.limit(), u64::from(MAX_PER_PAGE));

        let request = PageRequest {
            page: 1,
            per_page: 0,
        };
        assert_eq!(request.limit(), 1);
    }

    #[test]
    fn test_total_survives_page_window() {
        // 15 records, window of 10: both pages report the same total.
        let page1 = PageResponse::new(
            vec![(); 10],
            &PageRequest {
                page: 1,
                per_page: 10,
            },
            15,
        );
        let page2 = PageResponse::new(
            vec![(); 5],
            &PageRequest {
                page: 2,
                per_page: 10,
            },
            15,
        );

        assert_eq!(page1.data.len(), 10);
        assert_eq!(page2.data.len(), 5);
        assert_eq!(page1.meta.total, 15);
        assert_eq!(page2.meta.total, 15);
        assert_eq!(page1.meta.total_pages, 2);
    }

    #[test]
    fn test_empty_population_has_one_page() {
        let response = PageResponse::<()>::new(vec![], &PageRequest::default(), 0);
        assert_eq!(response.meta.total_pages, 1);
        assert_eq!(response.meta.total, 0);
    }
}
