//! Page slicing and the pagination cursor.

use serde::Serialize;

/// Default number of programs per page
pub const DEFAULT_PAGE_SIZE: usize = 12;

/// Slice out a 1-indexed page of `page_size` items.
///
/// Pages past the end, page 0 and a page size of 0 all yield an empty
/// slice.
///
/// ```
/// use dagskra_core::programs::paginate;
///
/// let items: Vec<u32> = (0..25).collect();
/// assert_eq!(paginate(&items, 3, 10), &[20, 21, 22, 23, 24]);
/// ```
pub fn paginate<T>(items: &[T], page: usize, page_size: usize) -> &[T] {
    if page == 0 || page_size == 0 {
        return &[];
    }

    let start = (page - 1).saturating_mul(page_size).min(items.len());
    let end = page.saturating_mul(page_size).min(items.len());
    &items[start..end]
}

/// Number of pages needed for `total` items
pub fn total_pages(total: usize, page_size: usize) -> usize {
    if page_size == 0 {
        0
    } else {
        total.div_ceil(page_size)
    }
}

/// Pagination cursor over a result list that may change between renders.
///
/// Whenever the observed item count changes the cursor jumps back to the
/// first page, so a narrowing filter never leaves it on a page that no
/// longer exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Paginator {
    current_page: usize,
    items_per_page: usize,
    total_items: usize,
}

impl Paginator {
    pub fn new(items_per_page: usize) -> Self {
        Self {
            current_page: 1,
            items_per_page: items_per_page.max(1),
            total_items: 0,
        }
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn items_per_page(&self) -> usize {
        self.items_per_page
    }

    pub fn total_items(&self) -> usize {
        self.total_items
    }

    pub fn total_pages(&self) -> usize {
        total_pages(self.total_items, self.items_per_page)
    }

    /// Record the current item count, resetting to page 1 if it changed
    pub fn observe_total(&mut self, total_items: usize) {
        if total_items != self.total_items {
            self.total_items = total_items;
            self.current_page = 1;
        }
    }

    pub fn set_page(&mut self, page: usize) {
        self.current_page = page.max(1);
    }

    /// Observe `items` and return the slice for the current page
    pub fn page_of<'a, T>(&mut self, items: &'a [T]) -> &'a [T] {
        self.observe_total(items.len());
        paginate(items, self.current_page, self.items_per_page)
    }
}

impl Default for Paginator {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}
