//! Page/limit slicing, kept separate from filtering so the two compose.

use serde::{Deserialize, Serialize};

use crate::constants::{FIRST_PAGE, MAX_PAGE_LIMIT};
use crate::{ClinicError, ClinicResult};

/// A validated page request. Pages are 1-based; page 0 is read as page 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: usize,
    limit: usize,
}

impl PageRequest {
    /// # Errors
    ///
    /// Returns `ClinicError::InvalidInput` if `limit` is zero or above [`MAX_PAGE_LIMIT`].
    pub fn new(page: usize, limit: usize) -> ClinicResult<Self> {
        if limit == 0 || limit > MAX_PAGE_LIMIT {
            return Err(ClinicError::InvalidInput(format!(
                "limit must be between 1 and {MAX_PAGE_LIMIT}"
            )));
        }
        Ok(Self {
            page: page.max(FIRST_PAGE),
            limit,
        })
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn limit(&self) -> usize {
        self.limit
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct Pagination {
    pub total: usize,
    pub page: usize,
    pub limit: usize,
    pub pages: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub data: Vec<T>,
    pub pagination: Pagination,
}

impl<T> Page<T> {
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            data: self.data.into_iter().map(f).collect(),
            pagination: self.pagination,
        }
    }
}

/// Returns the requested slice of `items` plus totals.
///
/// A page past the end yields empty `data` with correct totals.
pub fn paginate<T>(items: Vec<T>, request: PageRequest) -> Page<T> {
    let total = items.len();
    let pages = total.div_ceil(request.limit);
    let start = (request.page - 1).saturating_mul(request.limit);

    let data = items
        .into_iter()
        .skip(start)
        .take(request.limit)
        .collect();

    Page {
        data,
        pagination: Pagination {
            total,
            page: request.page,
            limit: request.limit,
            pages,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_and_last_page() {
        let items: Vec<u32> = (1..=25).collect();

        let first = paginate(items.clone(), PageRequest::new(1, 10).unwrap());
        assert_eq!(first.data, (1..=10).collect::<Vec<_>>());
        assert_eq!(
            first.pagination,
            Pagination {
                total: 25,
                page: 1,
                limit: 10,
                pages: 3
            }
        );

        let last = paginate(items, PageRequest::new(3, 10).unwrap());
        assert_eq!(last.data, vec![21, 22, 23, 24, 25]);
    }

    #[test]
    fn test_page_past_end_is_empty_with_totals() {
        let page = paginate(vec![1, 2, 3], PageRequest::new(5, 2).unwrap());
        assert!(page.data.is_empty());
        assert_eq!(page.pagination.total, 3);
        assert_eq!(page.pagination.pages, 2);
    }

    #[test]
    fn test_page_zero_reads_as_first() {
        let request = PageRequest::new(0, 2).unwrap();
        assert_eq!(request.page(), 1);
        assert_eq!(paginate(vec!['a', 'b', 'c'], request).data, vec!['a', 'b']);
    }

    #[test]
    fn test_empty_collection_has_zero_pages() {
        let page = paginate(Vec::<u8>::new(), PageRequest::new(1, 10).unwrap());
        assert!(page.data.is_empty());
        assert_eq!(page.pagination.pages, 0);
    }

    #[test]
    fn test_limit_bounds() {
        assert!(PageRequest::new(1, 0).is_err());
        assert!(PageRequest::new(1, MAX_PAGE_LIMIT + 1).is_err());
    }
}
