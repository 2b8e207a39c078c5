//! Page navigation state for page-at-a-time lists.
//!
//! Unlike the incremental loader, these lists replace their contents on
//! every page change (the recipient table, the template library). The pager
//! also computes the windowed page-number strip shown under such lists.

use outreach_client::Page;

/// Maximum number of page buttons shown before gaps are inserted.
const MAX_VISIBLE_PAGES: u32 = 5;

/// One entry in the rendered page-number strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageToken {
    /// A clickable page number.
    Page(u32),
    /// An ellipsis between non-adjacent page numbers.
    Gap,
}

/// Navigation state for a page-at-a-time list.
#[derive(Debug, Clone, Copy)]
pub struct Pager {
    current: u32,
    total_pages: u32,
    total_items: u64,
    per_page: u32,
}

impl Pager {
    /// Creates a pager positioned on page 1 of an empty collection.
    #[must_use]
    pub const fn new(per_page: u32) -> Self {
        Self {
            current: 1,
            total_pages: 1,
            total_items: 0,
            per_page,
        }
    }

    /// Current page (1-based).
    #[must_use]
    pub const fn current(&self) -> u32 {
        self.current
    }

    /// Total number of pages.
    #[must_use]
    pub const fn total_pages(&self) -> u32 {
        self.total_pages
    }

    /// Total number of items across all pages.
    #[must_use]
    pub const fn total_items(&self) -> u64 {
        self.total_items
    }

    /// Items per page.
    #[must_use]
    pub const fn per_page(&self) -> u32 {
        self.per_page
    }

    /// Adopts the totals reported by a freshly fetched page.
    pub fn sync<T>(&mut self, page: &Page<T>) {
        self.current = page.number;
        self.total_pages = page.total_pages.max(1);
        self.total_items = page.total_items;
    }

    /// Moves to the given page, clamped to the valid range.
    pub const fn go_to(&mut self, page: u32) {
        self.current = if page < 1 {
            1
        } else if page > self.total_pages {
            self.total_pages
        } else {
            page
        };
    }

    /// Returns true if a previous page exists.
    #[must_use]
    pub const fn has_prev(&self) -> bool {
        self.current > 1
    }

    /// Returns true if a following page exists.
    #[must_use]
    pub const fn has_next(&self) -> bool {
        self.current < self.total_pages
    }

    /// The page a "previous" action should request.
    #[must_use]
    pub const fn prev(&self) -> u32 {
        if self.current > 1 { self.current - 1 } else { 1 }
    }

    /// The page a "next" action should request.
    #[must_use]
    pub const fn next(&self) -> u32 {
        if self.current < self.total_pages {
            self.current + 1
        } else {
            self.total_pages
        }
    }

    /// 1-based item range shown on the current page ("Showing X to Y of Z").
    ///
    /// `None` when the collection is empty and the strip should be hidden.
    #[must_use]
    pub const fn item_range(&self) -> Option<(u64, u64)> {
        if self.total_items == 0 {
            return None;
        }
        let start = (self.current as u64 - 1) * self.per_page as u64 + 1;
        let end_candidate = self.current as u64 * self.per_page as u64;
        let end = if end_candidate < self.total_items {
            end_candidate
        } else {
            self.total_items
        };
        Some((start, end))
    }

    /// The windowed page-number strip: at most five numbers, with gaps
    /// standing in for the elided stretches.
    #[must_use]
    pub fn page_tokens(&self) -> Vec<PageToken> {
        let total = self.total_pages;
        let current = self.current;
        let mut tokens = Vec::new();

        if total <= MAX_VISIBLE_PAGES {
            tokens.extend((1..=total).map(PageToken::Page));
        } else if current <= 3 {
            tokens.extend((1..=4).map(PageToken::Page));
            tokens.push(PageToken::Gap);
            tokens.push(PageToken::Page(total));
        } else if current >= total - 2 {
            tokens.push(PageToken::Page(1));
            tokens.push(PageToken::Gap);
            tokens.extend((total - 3..=total).map(PageToken::Page));
        } else {
            tokens.push(PageToken::Page(1));
            tokens.push(PageToken::Gap);
            tokens.extend((current - 1..=current + 1).map(PageToken::Page));
            tokens.push(PageToken::Gap);
            tokens.push(PageToken::Page(total));
        }

        tokens
    }
}
