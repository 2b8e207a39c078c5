//! Integration tests for the recipient browsing and targeting flow:
//! incremental loading, filtering and manual selection working together the
//! way the selection modal drives them.

#![allow(clippy::unwrap_used)]

use std::cell::Cell;
use std::time::{Duration, Instant};

use chrono::{TimeZone, Utc};
use outreach_client::{Page, PageFetcher, Recipient, Result, TimeFrame};
use outreach_core::{
    Composer, FilterState, FilterTracker, IncrementalLoader, Pager, SelectionSet, TargetMode,
};

fn recipient(n: u32) -> Recipient {
    Recipient {
        id: format!("r{n:02}"),
        name: format!("Person {n}"),
        email: format!("person{n}@example.com"),
        phone: None,
        group_name: None,
        message: None,
        created_at: Utc.with_ymd_and_hms(2026, 8, 1, 12, 0, 0).single().unwrap(),
        email_sent: false,
    }
}

/// Serves a fixed directory one page at a time, counting requests.
struct DirectoryStub {
    recipients: Vec<Recipient>,
    calls: Cell<u32>,
}

impl DirectoryStub {
    fn with_count(count: u32) -> Self {
        Self {
            recipients: (1..=count).map(recipient).collect(),
            calls: Cell::new(0),
        }
    }
}

impl PageFetcher<Recipient> for DirectoryStub {
    async fn fetch_page(&self, page: u32, limit: u32) -> Result<Page<Recipient>> {
        self.calls.set(self.calls.get() + 1);
        let size = limit as usize;
        let start = (page as usize - 1) * size;
        let items = self
            .recipients
            .iter()
            .skip(start)
            .take(size)
            .cloned()
            .collect();
        Ok(Page {
            items,
            number: page,
            total_pages: u32::try_from(self.recipients.len().div_ceil(size)).unwrap(),
            total_items: self.recipients.len() as u64,
        })
    }
}

#[tokio::test]
async fn selection_survives_incremental_loading() {
    let directory = DirectoryStub::with_count(45);
    let mut loader: IncrementalLoader<Recipient> = IncrementalLoader::new(20);
    let mut selection = SelectionSet::new();

    // Modal opens with nothing loaded: first page comes in.
    loader.load_next(&directory).await.unwrap();
    assert_eq!(loader.items().len(), 20);

    // Pick someone from page 1, then scroll until everything is loaded.
    selection.toggle("r03");
    while loader.has_more() {
        loader.load_next(&directory).await.unwrap();
    }

    assert_eq!(loader.items().len(), 45);
    assert!(selection.contains("r03"));
    assert_eq!(directory.calls.get(), 3);
}

#[tokio::test]
async fn select_all_visible_only_covers_loaded_pages() {
    let directory = DirectoryStub::with_count(45);
    let mut loader: IncrementalLoader<Recipient> = IncrementalLoader::new(20);
    let mut selection = SelectionSet::new();

    loader.load_next(&directory).await.unwrap();
    selection.select_all(loader.items().iter().map(|r| r.id.clone()));

    assert_eq!(selection.len(), 20);
    assert!(!selection.contains("r45"));

    // Loading more pages does not grow the selection by itself.
    loader.load_next(&directory).await.unwrap();
    assert_eq!(selection.len(), 20);
}

#[tokio::test]
async fn proximity_trigger_never_double_fetches() {
    let directory = DirectoryStub::with_count(45);
    let mut loader: IncrementalLoader<Recipient> = IncrementalLoader::new(20);

    // Two near-end scroll events land before anyone awaits the fetch.
    let first = loader.begin();
    let second = loader.begin();
    assert_eq!(first, Some(1));
    assert_eq!(second, None);

    let page = directory.fetch_page(1, 20).await.unwrap();
    loader.complete(page);
    assert_eq!(directory.calls.get(), 1);
    assert!(loader.should_load_more(3));
}

#[test]
fn filter_change_resets_table_to_page_one() {
    let mut filter = FilterState::new();
    let mut tracker = FilterTracker::new();
    let mut pager = Pager::new(10);

    // Initial fetch on page 1; user then navigates to page 3.
    assert!(!tracker.observe(&filter.snapshot()));
    pager.sync(&Page::<Recipient> {
        items: Vec::new(),
        number: 3,
        total_pages: 5,
        total_items: 48,
    });
    assert_eq!(pager.current(), 3);

    // Typing settles a new search term: back to page 1.
    let start = Instant::now();
    filter.set_search_input("person", start);
    assert!(filter.poll_settle(start + Duration::from_millis(500)));
    if tracker.observe(&filter.snapshot()) {
        pager.go_to(1);
    }
    assert_eq!(pager.current(), 1);

    // A re-poll with the same tuple stays put.
    pager.go_to(2);
    assert!(!tracker.observe(&filter.snapshot()));
    assert_eq!(pager.current(), 2);
}

#[test]
fn composed_send_requires_selection_in_selected_mode() {
    let mut composer = Composer::new();
    composer.draft.subject = "News".to_string();
    composer.draft.html = "<p>hello</p>".to_string();
    composer.draft.target_mode = TargetMode::Selected;

    let mut selection = SelectionSet::new();
    assert!(composer.request_send(&selection).is_err());

    selection.toggle("r01");
    selection.toggle("r02");
    let pending = composer.request_send(&selection).unwrap();
    assert_eq!(
        pending.prompt(),
        "Are you sure you want to send this email to 2 selected person(s)?"
    );
}

#[test]
fn quick_range_and_dates_stay_exclusive_through_a_session() {
    let mut filter = FilterState::new();

    filter.toggle_time_frame(TimeFrame::ThisWeek);
    filter.set_from_date("2026-08-01".parse().ok());
    filter.set_to_date("2026-08-15".parse().ok());
    assert_eq!(filter.time_frame(), None);

    filter.toggle_time_frame(TimeFrame::ThisMonth);
    assert!(filter.from_date().is_none());
    assert!(filter.to_date().is_none());

    let query = filter.query();
    assert_eq!(query.time_frame, Some(TimeFrame::ThisMonth));
    assert!(query.from_date.is_none());
}
