//! Derived result view of a discovery session

use crate::catalog::Drill;
use std::collections::BTreeSet;

/// Everything a presentation surface needs to render the current results
///
/// Derived from the catalog and the committed selection; never edited
/// directly. `page` is always within `1..=total_pages` and `total_pages` is
/// at least 1, even with no results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultView {
    pub filtered_drills: Vec<Drill>,
    pub disabled_tags: BTreeSet<String>,
    pub total_pages: usize,
    pub page: usize,
    pub page_items: Vec<Drill>,
}

impl Default for ResultView {
    fn default() -> Self {
        Self {
            filtered_drills: Vec::new(),
            disabled_tags: BTreeSet::new(),
            total_pages: 1,
            page: 1,
            page_items: Vec::new(),
        }
    }
}

impl ResultView {
    /// Paginate `filtered_drills`, clamping `page` into range
    #[must_use]
    pub fn new(
        filtered_drills: Vec<Drill>,
        disabled_tags: BTreeSet<String>,
        page: usize,
        page_size: usize,
    ) -> Self {
        let mut view = Self {
            total_pages: total_pages(filtered_drills.len(), page_size),
            filtered_drills,
            disabled_tags,
            page: 1,
            page_items: Vec::new(),
        };
        view.set_page(page, page_size);
        view
    }

    /// Clamp `page` into `1..=total_pages`
    #[must_use]
    pub fn clamp_page(&self, page: usize) -> usize {
        page.clamp(1, self.total_pages)
    }

    /// Move to `page` (clamped), recomputing only `page_items`
    ///
    /// Returns the page actually shown.
    pub fn set_page(&mut self, page: usize, page_size: usize) -> usize {
        let page_size = page_size.max(1);
        self.page = self.clamp_page(page);
        self.page_items = self
            .filtered_drills
            .iter()
            .skip((self.page - 1) * page_size)
            .take(page_size)
            .cloned()
            .collect();
        self.page
    }

    #[must_use]
    pub fn result_count(&self) -> usize {
        self.filtered_drills.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.filtered_drills.is_empty()
    }

    #[must_use]
    pub fn is_disabled(&self, tag: &str) -> bool {
        self.disabled_tags.contains(tag)
    }

    #[must_use]
    pub const fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    #[must_use]
    pub const fn has_previous(&self) -> bool {
        self.page > 1
    }
}

/// Pages needed for `count` results; at least one
#[must_use]
pub fn total_pages(count: usize, page_size: usize) -> usize {
    count.div_ceil(page_size.max(1)).max(1)
}
