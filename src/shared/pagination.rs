//! Page requests and page metadata shared by every list endpoint.

use serde::{Deserialize, Serialize};

const DEFAULT_LIMIT: u64 = 10;
const MAX_LIMIT: u64 = 100;

/// Query string accepted by list endpoints: `?page=2&limit=20&search=loft`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<u64>,
    pub limit: Option<u64>,
    pub search: Option<String>,
}

impl PageQuery {
    /// One-based page number, at least 1
    pub fn page(&self) -> u64 {
        self.page.unwrap_or(1).max(1)
    }

    /// Page size, clamped to `1..=100`
    pub fn limit(&self) -> u64 {
        self.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT)
    }

    /// Rows to skip; saturates instead of overflowing on huge page numbers
    pub fn offset(&self) -> u64 {
        (self.page() - 1).saturating_mul(self.limit())
    }

    /// [`offset`](Self::offset) as a signed SQL bind value
    pub fn sql_offset(&self) -> i64 {
        i64::try_from(self.offset()).unwrap_or(i64::MAX)
    }

    /// Trimmed search term, `None` when blank
    pub fn search(&self) -> Option<&str> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|term| !term.is_empty())
    }
}

/// Page metadata
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub current_page: u64,
    pub total_pages: u64,
    pub total_count: u64,
    pub limit: u64,
    pub has_next_page: bool,
    pub has_prev_page: bool,
    pub next_page: Option<u64>,
    pub prev_page: Option<u64>,
}

impl Pagination {
    pub fn new(current_page: u64, limit: u64, total_count: u64) -> Self {
        let limit = limit.max(1);
        let total_pages = total_count.div_ceil(limit);
        let has_next_page = current_page < total_pages;
        let has_prev_page = current_page > 1;
        Self {
            current_page,
            total_pages,
            total_count,
            limit,
            has_next_page,
            has_prev_page,
            next_page: has_next_page.then(|| current_page + 1),
            prev_page: has_prev_page.then(|| current_page - 1),
        }
    }
}

/// One page of results
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub pagination: Pagination,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, query: &PageQuery, total_count: u64) -> Self {
        Self {
            items,
            pagination: Pagination::new(query.page(), query.limit(), total_count),
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            pagination: self.pagination,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_defaults_and_clamping() {
        let query = PageQuery::default();
        assert_eq!(query.page(), 1);
        assert_eq!(query.limit(), 10);
        assert_eq!(query.offset(), 0);

        let query = PageQuery {
            page: Some(0),
            limit: Some(1000),
            search: Some("   ".into()),
        };
        assert_eq!(query.page(), 1);
        assert_eq!(query.limit(), 100);
        assert_eq!(query.search(), None);
    }

    #[test]
    fn test_middle_page() {
        let pagination = Pagination::new(2, 10, 25);
        assert_eq!(pagination.total_pages, 3);
        assert!(pagination.has_next_page);
        assert!(pagination.has_prev_page);
        assert_eq!(pagination.next_page, Some(3));
        assert_eq!(pagination.prev_page, Some(1));
    }

    #[test]
    fn test_empty_result() {
        let pagination = Pagination::new(1, 10, 0);
        assert_eq!(pagination.total_pages, 0);
        assert!(!pagination.has_next_page);
        assert!(!pagination.has_prev_page);
        assert_eq!(pagination.next_page, None);
    }

    #[test]
    fn test_offset() {
        let query = PageQuery {
            page: Some(3),
            limit: Some(20),
            search: None,
        };
        assert_eq!(query.offset(), 40);
        assert_eq!(query.sql_offset(), 40);
    }

    #[test]
    fn test_huge_page_saturates() {
        let query = PageQuery {
            page: Some(u64::MAX),
            limit: Some(10),
            search: None,
        };
        assert_eq!(query.offset(), u64::MAX);
        assert_eq!(query.sql_offset(), i64::MAX);

        let pagination = Pagination::new(query.page(), query.limit(), 3);
        assert!(!pagination.has_next_page);
        assert_eq!(pagination.next_page, None);
        assert_eq!(pagination.prev_page, Some(u64::MAX - 1));
    }

    #[test]
    fn test_map_keeps_pagination() {
        let query = PageQuery::default();
        let page = Page::new(vec![1, 2], &query, 2).map(|n| n * 10);
        assert_eq!(page.items, vec![10, 20]);
        assert_eq!(page.pagination.total_count, 2);
    }
}
