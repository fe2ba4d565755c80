use tracing::debug;

use crate::models::Page;

pub const DEFAULT_PAGE_SIZE: u32 = 12;

/// Pagination state for one listing view
///
/// Owns the requested page/size and the last accepted page of data.
/// Filter and sort changes must go through [`Paginator::reset`] before
/// the next fetch — a page number from a previous filter context is
/// never reused.
#[derive(Debug, Clone)]
pub struct Paginator<T> {
    current_page: u32,
    page_size: u32,
    last: Option<Page<T>>,
}

impl<T> Default for Paginator<T> {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl<T> Paginator<T> {
    pub fn new(page_size: u32) -> Self {
        Self {
            current_page: 1,
            page_size: page_size.max(1),
            last: None,
        }
    }

    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn last(&self) -> Option<&Page<T>> {
        self.last.as_ref()
    }

    pub fn set_page(&mut self, page: u32) {
        self.current_page = page.max(1);
    }

    /// Page-size changes always return to page 1
    pub fn set_page_size(&mut self, size: u32) {
        self.page_size = size.max(1);
        self.current_page = 1;
    }

    /// Back to page 1, dropping the cached page from the old context
    pub fn reset(&mut self) {
        self.current_page = 1;
        self.last = None;
    }

    /// Accept a freshly normalized page, clamping the requested page into
    /// the new `[1, total_pages]` window. Returns `true` when the clamp
    /// moved the requested page (a filter just shrank the result set) so
    /// the caller knows to re-fetch at the corrected page.
    pub fn on_new_data(&mut self, page: Page<T>) -> bool {
        let max_page = page.total_pages.max(1);
        let corrected = self.current_page > max_page;
        if corrected {
            debug!(
                requested = self.current_page,
                corrected = max_page,
                "requested page beyond result set, clamping"
            );
            self.current_page = max_page;
        }
        self.last = Some(page);
        corrected
    }
}
