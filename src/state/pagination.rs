use serde::{Deserialize, Serialize};
use std::ops::Range;

/// The persisted slice of pagination state: page and page size, never the
/// total (the total is always derived from the live filtered count).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageRequest {
    pub page: usize,
    pub page_size: usize,
}

/// Page, page size and the filtered-row total, kept mutually consistent.
///
/// `page` is 1-based and always within `[1, page_count()]`; `recompute` is
/// the sole writer of `total` and reclamps after every filter change or
/// dataset refresh. A clamp never loses rows, it only shifts the window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationState {
    page: usize,
    page_size: usize,
    total: usize,
}

impl PaginationState {
    pub fn new(page_size: usize) -> Self {
        Self {
            page: 1,
            page_size: page_size.max(1),
            total: 0,
        }
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn total(&self) -> usize {
        self.total
    }

    /// Number of pages for the current total, never below 1 so an empty
    /// filtered view still renders as page 1 of 1.
    pub fn page_count(&self) -> usize {
        self.total.div_ceil(self.page_size).max(1)
    }

    pub fn set_page(&mut self, page: usize) {
        self.page = page.clamp(1, self.page_count());
    }

    /// Change the page size (floored at 1) and reclamp the page.
    pub fn set_page_size(&mut self, page_size: usize) {
        self.page_size = page_size.max(1);
        self.page = self.page.clamp(1, self.page_count());
    }

    /// Recompute `total` from the filtered row count and reclamp the page.
    /// Called after every filter change; a shrinking dataset clamps down to
    /// the last valid page rather than leaving an empty window.
    pub fn recompute(&mut self, filtered_count: usize) {
        self.total = filtered_count;
        self.page = self.page.clamp(1, self.page_count());
    }

    /// The index window into the filtered view for the current page.
    pub fn window(&self) -> Range<usize> {
        let start = (self.page - 1) * self.page_size;
        let end = (start + self.page_size).min(self.total);
        start..end.max(start)
    }

    /// The persisted slice of this state.
    pub fn request(&self) -> PageRequest {
        PageRequest {
            page: self.page,
            page_size: self.page_size,
        }
    }

    /// Restore from a persisted slice; the page is clamped once `recompute`
    /// runs with the live filtered count.
    pub fn restore(&mut self, request: PageRequest) {
        self.page_size = request.page_size.max(1);
        self.page = request.page.max(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recompute_clamps_to_last_valid_page() {
        let mut pagination = PaginationState::new(10);
        pagination.recompute(50);
        pagination.set_page(5);
        assert_eq!(pagination.page(), 5);

        pagination.recompute(12);
        assert_eq!(pagination.page(), 2);
        assert_eq!(pagination.window(), 10..12);
    }

    #[test]
    fn zero_total_resets_to_page_one() {
        let mut pagination = PaginationState::new(10);
        pagination.recompute(30);
        pagination.set_page(3);
        pagination.recompute(0);
        assert_eq!(pagination.page(), 1);
        assert_eq!(pagination.window(), 0..0);
    }

    #[test]
    fn page_size_floor_is_one() {
        let mut pagination = PaginationState::new(0);
        assert_eq!(pagination.page_size(), 1);
        pagination.set_page_size(0);
        assert_eq!(pagination.page_size(), 1);
    }

    #[test]
    fn growing_page_size_pulls_page_back() {
        let mut pagination = PaginationState::new(10);
        pagination.recompute(35);
        pagination.set_page(4);
        pagination.set_page_size(20);
        assert_eq!(pagination.page(), 2);
        assert_eq!(pagination.window(), 20..35);
    }

    #[test]
    fn set_page_out_of_range_is_clamped() {
        let mut pagination = PaginationState::new(10);
        pagination.recompute(25);
        pagination.set_page(99);
        assert_eq!(pagination.page(), 3);
        pagination.set_page(0);
        assert_eq!(pagination.page(), 1);
    }
}
