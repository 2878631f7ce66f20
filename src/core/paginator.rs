use serde::{Deserialize, Serialize};

/// Number of pages needed for `len` items; 0 when there is nothing to show
#[inline]
pub fn total_pages(len: usize, page_size: usize) -> usize {
    len.div_ceil(page_size.max(1))
}

/// Items on page `page_index`, or an empty slice when out of range
#[inline]
pub fn paginate<T>(items: &[T], page_size: usize, page_index: usize) -> &[T] {
    let page_size = page_size.max(1);
    let Some(start) = page_index.checked_mul(page_size) else {
        return &[];
    };
    if start >= items.len() {
        return &[];
    }
    let end = start.saturating_add(page_size).min(items.len());

    &items[start..end]
}

/// Page cursor with cyclic navigation
///
/// The index always stays inside `0..total_pages`, or at 0 when there are no
/// pages at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paginator {
    page_size: usize,
    index: usize,
    total_pages: usize,
}

impl Paginator {
    pub fn new(page_size: usize) -> Self {
        Self {
            page_size: page_size.max(1),
            index: 0,
            total_pages: 0,
        }
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn total_pages(&self) -> usize {
        self.total_pages
    }

    /// Recompute the page count for a new item count, clamping the index
    pub fn resize(&mut self, item_count: usize) {
        self.total_pages = total_pages(item_count, self.page_size);
        self.index = self.index.min(self.total_pages.saturating_sub(1));
    }

    pub fn reset(&mut self) {
        self.index = 0;
    }

    /// Jump to a page, clamped to the last one
    pub fn set_page(&mut self, index: usize) {
        self.index = index.min(self.total_pages.saturating_sub(1));
    }

    /// Advance one page, wrapping from the last page back to the first
    pub fn next_page(&mut self) {
        if self.total_pages > 0 {
            self.index = (self.index + 1) % self.total_pages;
        }
    }

    /// Go back one page, wrapping from the first page to the last
    pub fn prev_page(&mut self) {
        if self.total_pages > 0 {
            self.index = (self.index + self.total_pages - 1) % self.total_pages;
        }
    }

    /// Slice of `items` for the current page
    pub fn page<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        paginate(items, self.page_size, self.index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_pages() {
        assert_eq!(total_pages(0, 6), 0);
        assert_eq!(total_pages(1, 6), 1);
        assert_eq!(total_pages(6, 6), 1);
        assert_eq!(total_pages(7, 6), 2);
        assert_eq!(total_pages(5, 0), 5);
    }

    #[test]
    fn test_paginate_bounds() {
        let items: Vec<u32> = (0..7).collect();

        assert_eq!(paginate(&items, 3, 0), &[0, 1, 2]);
        assert_eq!(paginate(&items, 3, 2), &[6]);
        assert!(paginate(&items, 3, 3).is_empty());
        assert!(paginate(&items, 3, usize::MAX).is_empty());
        assert!(paginate::<u32>(&[], 3, 0).is_empty());
    }

    #[test]
    fn test_cyclic_navigation() {
        let mut paginator = Paginator::new(2);
        paginator.resize(5);

        assert_eq!(paginator.total_pages(), 3);
        paginator.prev_page();
        assert_eq!(paginator.index(), 2);
        paginator.next_page();
        assert_eq!(paginator.index(), 0);
    }

    #[test]
    fn test_no_pages_is_inert() {
        let mut paginator = Paginator::new(4);
        paginator.resize(0);
        paginator.next_page();
        paginator.prev_page();
        paginator.set_page(3);

        assert_eq!(paginator.index(), 0);
        assert!(paginator.page::<u32>(&[]).is_empty());
    }

    #[test]
    fn test_resize_clamps_index() {
        let mut paginator = Paginator::new(2);
        paginator.resize(10);
        paginator.set_page(4);
        assert_eq!(paginator.index(), 4);

        paginator.resize(3);
        assert_eq!(paginator.index(), 1);
    }
}
