//! Page-number pagination primitives shared by registry endpoints.
//!
//! The registry filters its working set client-side and slices the filtered
//! sequence by page number, so the envelope here carries explicit page
//! numbers rather than opaque cursors. Page counts use ceiling division and
//! out-of-range requests clamp to the last populated page.

use serde::{Deserialize, Serialize};

/// Errors raised when a page request fails validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PageRequestError {
    /// Page numbers are one-based; zero is never a valid page.
    #[error("page number must be at least 1")]
    ZeroPage,
    /// A page must hold at least one item.
    #[error("page size must be at least 1")]
    ZeroPageSize,
}

/// Validated request for one page of a sequence.
///
/// ## Invariants
/// - `page` is one-based and non-zero.
/// - `page_size` is non-zero.
///
/// # Examples
/// ```
/// use pagination::PageRequest;
///
/// let request = PageRequest::new(3, 12).unwrap();
/// assert_eq!(request.page(), 3);
/// assert_eq!(request.page_size(), 12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
    page_size: u32,
}

impl PageRequest {
    /// Validate and construct a page request.
    ///
    /// # Errors
    ///
    /// Returns [`PageRequestError`] when `page` or `page_size` is zero.
    pub const fn new(page: u32, page_size: u32) -> Result<Self, PageRequestError> {
        if page == 0 {
            return Err(PageRequestError::ZeroPage);
        }
        if page_size == 0 {
            return Err(PageRequestError::ZeroPageSize);
        }
        Ok(Self { page, page_size })
    }

    /// Construct a request for the first page.
    ///
    /// # Errors
    ///
    /// Returns [`PageRequestError::ZeroPageSize`] when `page_size` is zero.
    pub const fn first(page_size: u32) -> Result<Self, PageRequestError> {
        Self::new(1, page_size)
    }

    /// One-based page number.
    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    /// Maximum number of items on the page.
    #[must_use]
    pub const fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Return a copy of this request targeting a different page.
    ///
    /// # Errors
    ///
    /// Returns [`PageRequestError::ZeroPage`] when `page` is zero.
    pub const fn with_page(&self, page: u32) -> Result<Self, PageRequestError> {
        Self::new(page, self.page_size)
    }
}

/// One page of items together with its envelope metadata.
///
/// `page_count` is `ceil(total / page_size)`; an empty sequence has zero
/// pages but still reports page 1 so consumers always render a position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    /// Items on this page, in sequence order.
    pub items: Vec<T>,
    /// One-based page number actually served (after clamping).
    pub page: u32,
    /// Requested page size.
    pub page_size: u32,
    /// Total number of items across all pages.
    pub total: u64,
    /// Total number of pages.
    pub page_count: u32,
}

impl<T: Clone> Page<T> {
    /// Slice one page out of an in-memory sequence.
    ///
    /// Requests beyond the final page clamp to the last populated page
    /// rather than serving an empty tail.
    ///
    /// # Examples
    /// ```
    /// use pagination::{Page, PageRequest};
    ///
    /// let items: Vec<u32> = (1..=25).collect();
    /// let page = Page::slice(&items, PageRequest::new(3, 12).unwrap());
    /// assert_eq!(page.items, vec![25]);
    /// assert_eq!(page.page_count, 3);
    /// ```
    #[must_use]
    pub fn slice(items: &[T], request: PageRequest) -> Self {
        let page_size = request.page_size();
        let size = page_size as usize;
        let page_count = u32::try_from(items.len().div_ceil(size)).unwrap_or(u32::MAX);
        let page = request.page().min(page_count.max(1));
        let offset = (page as usize - 1).saturating_mul(size);
        Self {
            items: items.iter().skip(offset).take(size).cloned().collect(),
            page,
            page_size,
            total: items.len() as u64,
            page_count,
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    fn numbers(count: u32) -> Vec<u32> {
        (1..=count).collect()
    }

    #[rstest]
    #[case(0, 12, PageRequestError::ZeroPage)]
    #[case(1, 0, PageRequestError::ZeroPageSize)]
    fn rejects_degenerate_requests(
        #[case] page: u32,
        #[case] page_size: u32,
        #[case] expected: PageRequestError,
    ) {
        let err = PageRequest::new(page, page_size).expect_err("degenerate request must fail");
        assert_eq!(err, expected);
    }

    #[rstest]
    #[case(1, vec![1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12])]
    #[case(2, vec![13, 14, 15, 16, 17, 18, 19, 20, 21, 22, 23, 24])]
    #[case(3, vec![25])]
    fn slices_twenty_five_items_into_three_pages(#[case] page: u32, #[case] expected: Vec<u32>) {
        let request = PageRequest::new(page, 12).expect("valid request");
        let sliced = Page::slice(&numbers(25), request);
        assert_eq!(sliced.items, expected);
        assert_eq!(sliced.page, page);
        assert_eq!(sliced.page_count, 3);
        assert_eq!(sliced.total, 25);
    }

    #[rstest]
    fn clamps_out_of_range_page_to_last_page() {
        let request = PageRequest::new(9, 12).expect("valid request");
        let sliced = Page::slice(&numbers(25), request);
        assert_eq!(sliced.page, 3);
        assert_eq!(sliced.items, vec![25]);
    }

    #[rstest]
    fn empty_sequence_reports_page_one_of_zero() {
        let request = PageRequest::first(12).expect("valid request");
        let sliced = Page::slice(&Vec::<u32>::new(), request);
        assert!(sliced.items.is_empty());
        assert_eq!(sliced.page, 1);
        assert_eq!(sliced.page_count, 0);
        assert_eq!(sliced.total, 0);
    }

    #[rstest]
    fn exact_multiple_has_no_trailing_page() {
        let request = PageRequest::new(2, 12).expect("valid request");
        let sliced = Page::slice(&numbers(24), request);
        assert_eq!(sliced.page_count, 2);
        assert_eq!(sliced.items.len(), 12);
    }

    #[rstest]
    fn envelope_serialises_camel_case() {
        let page = Page::slice(&numbers(3), PageRequest::first(2).expect("valid request"));
        let value = serde_json::to_value(&page).expect("serialise page");
        assert!(value.get("pageCount").is_some());
        assert!(value.get("pageSize").is_some());
        assert!(value.get("page_count").is_none());
    }
}
