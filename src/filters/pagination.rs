//! Slice-based pagination

use serde::Serialize;

/// Medicines shown per page
pub const MEDICINE_PAGE_SIZE: usize = 6;

/// Number of pages for `total` items. An empty collection is one empty page.
pub fn page_count(total: usize, page_size: usize) -> usize {
    if total == 0 || page_size == 0 {
        return 1;
    }
    total.div_ceil(page_size)
}

/// Clamp a 1-based page number into `[1, page_count]`
pub fn clamp_page(page: usize, total: usize, page_size: usize) -> usize {
    page.clamp(1, page_count(total, page_size))
}

/// One page of a collection
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// 1-based page number after clamping
    pub number: usize,
    pub total_pages: usize,
    pub total_items: usize,
}

impl<T> Page<T> {
    pub fn has_next(&self) -> bool {
        self.number < self.total_pages
    }

    pub fn has_prev(&self) -> bool {
        self.number > 1
    }
}

/// Slice out page `page` (1-based, clamped)
pub fn paginate<T: Clone>(items: &[T], page: usize, page_size: usize) -> Page<T> {
    let number = clamp_page(page, items.len(), page_size);
    let start = ((number - 1) * page_size).min(items.len());
    let end = (start + page_size).min(items.len());

    Page {
        items: items[start..end].to_vec(),
        number,
        total_pages: page_count(items.len(), page_size),
        total_items: items.len(),
    }
}

/// Current page of a view that resets when its collection is replaced
#[derive(Debug, Clone)]
pub struct Pager {
    page: usize,
    page_size: usize,
    collection_version: u64,
}

impl Pager {
    pub fn new(page_size: usize) -> Self {
        Self {
            page: 1,
            page_size,
            collection_version: 0,
        }
    }

    pub fn page(&self) -> usize {
        self.page
    }

    /// Reset to page 1 if the collection version changed
    pub fn observe(&mut self, version: u64) {
        if version != self.collection_version {
            self.collection_version = version;
            self.page = 1;
        }
    }

    pub fn next(&mut self, total: usize) {
        self.page = clamp_page(self.page + 1, total, self.page_size);
    }

    pub fn prev(&mut self, total: usize) {
        self.page = clamp_page(self.page.saturating_sub(1), total, self.page_size);
    }

    pub fn goto(&mut self, page: usize, total: usize) {
        self.page = clamp_page(page, total, self.page_size);
    }
}

impl Default for Pager {
    fn default() -> Self {
        Self::new(MEDICINE_PAGE_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_count() {
        assert_eq!(page_count(0, 6), 1);
        assert_eq!(page_count(1, 6), 1);
        assert_eq!(page_count(6, 6), 1);
        assert_eq!(page_count(7, 6), 2);
        assert_eq!(page_count(20, 6), 4);
    }

    #[test]
    fn test_last_page_size() {
        for n in 1..=40usize {
            let items: Vec<usize> = (0..n).collect();
            let pages = page_count(n, MEDICINE_PAGE_SIZE);
            let last = paginate(&items, pages, MEDICINE_PAGE_SIZE);
            assert_eq!(last.items.len(), n - MEDICINE_PAGE_SIZE * (pages - 1));
            assert_eq!(last.number, pages);
        }
    }

    #[test]
    fn test_beyond_last_clamps() {
        let items: Vec<usize> = (0..20).collect();
        let page = paginate(&items, 99, MEDICINE_PAGE_SIZE);
        assert_eq!(page.number, 4);
        assert_eq!(page.items, vec![18, 19]);
        assert!(!page.has_next());
        assert!(page.has_prev());

        let first = paginate(&items, 0, MEDICINE_PAGE_SIZE);
        assert_eq!(first.number, 1);
        assert_eq!(first.items, vec![0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_empty_collection() {
        let page = paginate::<u8>(&[], 3, MEDICINE_PAGE_SIZE);
        assert_eq!(page.number, 1);
        assert!(page.items.is_empty());
        assert_eq!(page.total_pages, 1);
        assert!(!page.has_next());
        assert!(!page.has_prev());
    }

    #[test]
    fn test_pager_navigation_and_reset() {
        let mut pager = Pager::default();
        pager.observe(1);
        pager.next(20);
        pager.next(20);
        assert_eq!(pager.page(), 3);
        pager.next(20);
        pager.next(20);
        assert_eq!(pager.page(), 4);
        pager.prev(20);
        assert_eq!(pager.page(), 3);

        pager.observe(1);
        assert_eq!(pager.page(), 3);
        pager.observe(2);
        assert_eq!(pager.page(), 1);

        pager.prev(20);
        assert_eq!(pager.page(), 1);
        pager.goto(10, 7);
        assert_eq!(pager.page(), 2);
    }
}
