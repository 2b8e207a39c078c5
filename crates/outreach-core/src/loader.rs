//! Incremental list loading for scrollable selection lists.
//!
//! Accumulates pages fetched through a [`PageFetcher`] into one growing
//! list. Loading is append-only for the session: nothing is ever evicted,
//! so selections made against earlier pages stay valid.

use outreach_client::{Page, PageFetcher};
use tracing::debug;

/// Page size used when browsing the recipient directory incrementally.
pub const RECIPIENT_PAGE_SIZE: u32 = 20;

/// How many not-yet-visible items may remain before the next page is
/// requested. Keeps fetch frequency to roughly once per screenful.
pub const NEAR_END_THRESHOLD: usize = 5;

/// Stateful accumulator driving a [`PageFetcher`] with "load next page"
/// semantics.
///
/// At most one fetch may be in flight per loader. A load triggered while
/// another is in flight is silently dropped — not queued, not an error —
/// which mirrors how scroll-proximity triggers behave in the UI.
#[derive(Debug)]
pub struct IncrementalLoader<T> {
    items: Vec<T>,
    next_page: u32,
    has_more: bool,
    in_flight: bool,
    page_size: u32,
}

impl<T> IncrementalLoader<T> {
    /// Creates an empty loader with the given page size.
    #[must_use]
    pub const fn new(page_size: u32) -> Self {
        Self {
            items: Vec::new(),
            next_page: 1,
            has_more: true,
            in_flight: false,
            page_size,
        }
    }

    /// All items loaded so far, in page order.
    #[must_use]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Consumes the loader, returning the accumulated items.
    #[must_use]
    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    /// Returns true if no items have been loaded yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns true while a fetch is in flight.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.in_flight
    }

    /// Returns true if more pages remain on the server.
    #[must_use]
    pub const fn has_more(&self) -> bool {
        self.has_more
    }

    /// The page the next load will request (1-based).
    #[must_use]
    pub const fn next_page(&self) -> u32 {
        self.next_page
    }

    /// The page size passed to the fetcher.
    #[must_use]
    pub const fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Clears everything back to the initial state.
    ///
    /// Called when the consuming view is (re)opened with nothing loaded,
    /// or when the effective filters changed and accumulation must restart.
    pub fn reset(&mut self) {
        self.items.clear();
        self.next_page = 1;
        self.has_more = true;
        self.in_flight = false;
    }

    /// Decides whether a scroll position close to the end of the loaded
    /// list should trigger another load.
    ///
    /// `remaining` is the number of loaded items below the viewport.
    #[must_use]
    pub const fn should_load_more(&self, remaining: usize) -> bool {
        remaining <= NEAR_END_THRESHOLD && self.has_more && !self.in_flight
    }

    /// Starts a load, returning the page number to fetch.
    ///
    /// Returns `None` — and changes nothing — when a fetch is already in
    /// flight or no pages remain. The caller must follow up with
    /// [`complete`](Self::complete) or [`fail`](Self::fail).
    pub fn begin(&mut self) -> Option<u32> {
        if self.in_flight || !self.has_more {
            return None;
        }
        self.in_flight = true;
        Some(self.next_page)
    }

    /// Applies a successfully fetched page.
    pub fn complete(&mut self, page: Page<T>) {
        debug!(
            page = page.number,
            total_pages = page.total_pages,
            received = page.len(),
            "page loaded"
        );
        self.has_more = page.number < page.total_pages;
        self.next_page = page.number + 1;
        self.items.extend(page.items);
        self.in_flight = false;
    }

    /// Records a failed fetch.
    ///
    /// `next_page` is left unchanged so the same page can be retried; the
    /// accumulated items are untouched.
    pub fn fail(&mut self) {
        self.in_flight = false;
    }

    /// Fetches and appends the next page.
    ///
    /// Returns `Ok(true)` when a page was fetched, `Ok(false)` when the
    /// call was dropped because a load was in flight or no pages remain.
    ///
    /// # Errors
    ///
    /// Returns the fetch error untouched; the loader stays retryable.
    pub async fn load_next<F>(&mut self, fetcher: &F) -> outreach_client::Result<bool>
    where
        F: PageFetcher<T>,
    {
        let Some(page) = self.begin() else {
            return Ok(false);
        };

        match fetcher.fetch_page(page, self.page_size).await {
            Ok(fetched) => {
                self.complete(fetched);
                Ok(true)
            }
            Err(err) => {
                self.fail();
                Err(err)
            }
        }
    }
}
