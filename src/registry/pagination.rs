//! Paged list results

use crate::model::RecordRef;

/// One page of records together with the total record count
#[derive(Debug)]
pub struct Page {
    /// Records on this page
    pub items: Vec<RecordRef>,
    /// Number of records across all pages
    pub total: usize,
    /// One-based page number
    pub page: usize,
    /// Page size the page was fetched with
    pub per_page: usize,
}

impl Page {
    /// Number of pages, at least one
    #[must_use]
    pub const fn total_pages(&self) -> usize {
        if self.total == 0 || self.per_page == 0 {
            1
        } else {
            self.total.div_ceil(self.per_page)
        }
    }

    #[must_use]
    pub const fn has_next(&self) -> bool {
        self.page < self.total_pages()
    }

    #[must_use]
    pub const fn has_previous(&self) -> bool {
        self.page > 1
    }
}
