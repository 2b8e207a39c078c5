//! Search and date filtering for the recipient directory.
//!
//! Keystrokes update the raw search text immediately; the settled text the
//! fetches actually use only updates after the input has been quiet for
//! [`SETTLE_PERIOD`]. Explicit from/to dates and the named quick ranges are
//! mutually exclusive at all times.

use std::time::{Duration, Instant};

use chrono::NaiveDate;
use outreach_client::{RecipientQuery, TimeFrame};
use tracing::debug;

/// Quiet period after the last keystroke before a search term is final.
pub const SETTLE_PERIOD: Duration = Duration::from_millis(500);

/// A cancellable one-shot timer, driven by caller-supplied instants.
///
/// Arming while armed restarts the countdown, so only the last keystroke in
/// a burst produces a fire. Keeping the clock external makes the timing
/// fully deterministic under test.
#[derive(Debug, Clone, Copy)]
pub struct DebounceTimer {
    quiet: Duration,
    deadline: Option<Instant>,
}

impl DebounceTimer {
    /// Creates an unarmed timer with the given quiet period.
    #[must_use]
    pub const fn new(quiet: Duration) -> Self {
        Self {
            quiet,
            deadline: None,
        }
    }

    /// Arms (or re-arms) the timer to fire one quiet period after `now`.
    pub fn arm(&mut self, now: Instant) {
        self.deadline = Some(now + self.quiet);
    }

    /// Disarms the timer without firing.
    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    /// Returns true if the timer is counting down.
    #[must_use]
    pub const fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    /// The instant the timer will fire, if armed.
    #[must_use]
    pub const fn fires_at(&self) -> Option<Instant> {
        self.deadline
    }

    /// Checks whether the timer has fired by `now`, disarming it if so.
    ///
    /// Fires at most once per arm.
    pub fn fired(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

/// The filter tuple that actually drives a fetch.
///
/// Compared against the last tuple that triggered a fetch to decide whether
/// the page must reset to 1.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterSnapshot {
    /// Settled search text.
    pub search: String,
    /// Lower acquisition-date bound.
    pub from_date: Option<NaiveDate>,
    /// Upper acquisition-date bound.
    pub to_date: Option<NaiveDate>,
    /// Named relative date filter.
    pub time_frame: Option<TimeFrame>,
}

/// Filter state for one recipient list screen.
#[derive(Debug, Clone)]
pub struct FilterState {
    search_input: String,
    settled_search: String,
    from_date: Option<NaiveDate>,
    to_date: Option<NaiveDate>,
    time_frame: Option<TimeFrame>,
    timer: DebounceTimer,
}

impl Default for FilterState {
    fn default() -> Self {
        Self::new()
    }
}

impl FilterState {
    /// Creates an empty filter with the standard settle period.
    #[must_use]
    pub const fn new() -> Self {
        Self::with_settle_period(SETTLE_PERIOD)
    }

    /// Creates an empty filter with a custom settle period.
    #[must_use]
    pub const fn with_settle_period(quiet: Duration) -> Self {
        Self {
            search_input: String::new(),
            settled_search: String::new(),
            from_date: None,
            to_date: None,
            time_frame: None,
            timer: DebounceTimer::new(quiet),
        }
    }

    /// The text as typed, updated on every keystroke.
    #[must_use]
    pub fn search_input(&self) -> &str {
        &self.search_input
    }

    /// The settled text fetches are issued with.
    #[must_use]
    pub fn settled_search(&self) -> &str {
        &self.settled_search
    }

    /// Lower acquisition-date bound.
    #[must_use]
    pub const fn from_date(&self) -> Option<NaiveDate> {
        self.from_date
    }

    /// Upper acquisition-date bound.
    #[must_use]
    pub const fn to_date(&self) -> Option<NaiveDate> {
        self.to_date
    }

    /// Active quick range, if any.
    #[must_use]
    pub const fn time_frame(&self) -> Option<TimeFrame> {
        self.time_frame
    }

    /// Records a keystroke and restarts the settle countdown.
    pub fn set_search_input(&mut self, text: impl Into<String>, now: Instant) {
        self.search_input = text.into();
        self.timer.arm(now);
    }

    /// Settles the search text if the input has been quiet long enough.
    ///
    /// Returns true when a settle event occurred; the caller should then
    /// check [`FilterTracker::observe`] and refetch.
    pub fn poll_settle(&mut self, now: Instant) -> bool {
        if self.timer.fired(now) {
            self.settled_search = self.search_input.clone();
            debug!(search = %self.settled_search, "search settled");
            true
        } else {
            false
        }
    }

    /// Sets the lower date bound, deactivating any quick range.
    pub fn set_from_date(&mut self, date: Option<NaiveDate>) {
        self.from_date = date;
        self.time_frame = None;
    }

    /// Sets the upper date bound, deactivating any quick range.
    pub fn set_to_date(&mut self, date: Option<NaiveDate>) {
        self.to_date = date;
        self.time_frame = None;
    }

    /// Activates a quick range, clearing both explicit dates.
    ///
    /// Activating the currently active range toggles it off instead.
    pub fn toggle_time_frame(&mut self, frame: TimeFrame) {
        if self.time_frame == Some(frame) {
            self.time_frame = None;
        } else {
            self.time_frame = Some(frame);
            self.from_date = None;
            self.to_date = None;
        }
    }

    /// Returns true if any filter (including un-settled input) is active.
    #[must_use]
    pub fn has_active_filters(&self) -> bool {
        !self.search_input.is_empty()
            || self.from_date.is_some()
            || self.to_date.is_some()
            || self.time_frame.is_some()
    }

    /// Clears every filter and disarms the settle timer.
    pub fn clear(&mut self) {
        self.search_input.clear();
        self.settled_search.clear();
        self.from_date = None;
        self.to_date = None;
        self.time_frame = None;
        self.timer.cancel();
    }

    /// The current effective filter tuple.
    #[must_use]
    pub fn snapshot(&self) -> FilterSnapshot {
        FilterSnapshot {
            search: self.settled_search.clone(),
            from_date: self.from_date,
            to_date: self.to_date,
            time_frame: self.time_frame,
        }
    }

    /// Builds the query parameters for a fetch.
    ///
    /// Blank search text is omitted entirely rather than sent empty.
    #[must_use]
    pub fn query(&self) -> RecipientQuery {
        let search = self.settled_search.trim();
        RecipientQuery {
            search: (!search.is_empty()).then(|| search.to_string()),
            from_date: self.from_date,
            to_date: self.to_date,
            time_frame: self.time_frame,
        }
    }
}

/// Remembers the filter tuple of the last fetch to detect effective changes.
///
/// Comparing against the last *fetched* tuple (not the previous poll) means
/// unrelated state churn never causes a spurious page reset.
#[derive(Debug, Clone, Default)]
pub struct FilterTracker {
    last_fetched: Option<FilterSnapshot>,
}

impl FilterTracker {
    /// Creates a tracker that has seen no fetch yet.
    #[must_use]
    pub const fn new() -> Self {
        Self { last_fetched: None }
    }

    /// Records that a fetch is about to run with `snapshot`.
    ///
    /// Returns true when the tuple differs from the previous fetch and the
    /// page must therefore reset to 1. The very first observation records
    /// the tuple without requesting a reset.
    pub fn observe(&mut self, snapshot: &FilterSnapshot) -> bool {
        match &self.last_fetched {
            Some(last) if last == snapshot => false,
            Some(_) => {
                self.last_fetched = Some(snapshot.clone());
                true
            }
            None => {
                self.last_fetched = Some(snapshot.clone());
                false
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn test_burst_of_keystrokes_settles_once() {
        let start = Instant::now();
        let mut filter = FilterState::new();

        filter.set_search_input("a", start);
        filter.set_search_input("al", start + Duration::from_millis(100));
        filter.set_search_input("ali", start + Duration::from_millis(200));

        // 500ms after the first keystroke: re-armed, nothing settles.
        assert!(!filter.poll_settle(start + Duration::from_millis(500)));
        assert!(!filter.poll_settle(start + Duration::from_millis(699)));
        assert_eq!(filter.settled_search(), "");

        // 500ms after the last keystroke: exactly one settle event.
        assert!(filter.poll_settle(start + Duration::from_millis(700)));
        assert_eq!(filter.settled_search(), "ali");
        assert!(!filter.poll_settle(start + Duration::from_millis(800)));
    }

    #[test]
    fn test_dates_and_quick_range_are_mutually_exclusive() {
        let mut filter = FilterState::new();

        filter.set_from_date(Some(date("2026-08-01")));
        filter.toggle_time_frame(TimeFrame::ThisWeek);
        assert!(filter.from_date().is_none());
        assert!(filter.to_date().is_none());
        assert_eq!(filter.time_frame(), Some(TimeFrame::ThisWeek));

        filter.set_from_date(Some(date("2026-08-02")));
        assert_eq!(filter.time_frame(), None);
        assert_eq!(filter.from_date(), Some(date("2026-08-02")));

        filter.set_to_date(Some(date("2026-08-10")));
        assert_eq!(filter.time_frame(), None);
    }

    #[test]
    fn test_reactivating_quick_range_toggles_off() {
        let mut filter = FilterState::new();

        filter.toggle_time_frame(TimeFrame::Today);
        assert_eq!(filter.time_frame(), Some(TimeFrame::Today));

        filter.toggle_time_frame(TimeFrame::Today);
        assert_eq!(filter.time_frame(), None);
    }

    #[test]
    fn test_clear_resets_everything_and_disarms_timer() {
        let start = Instant::now();
        let mut filter = FilterState::new();
        filter.set_search_input("bob", start);
        filter.toggle_time_frame(TimeFrame::ThisMonth);

        filter.clear();

        assert!(!filter.has_active_filters());
        // A pending settle must not resurrect the cleared text.
        assert!(!filter.poll_settle(start + Duration::from_secs(1)));
        assert_eq!(filter.settled_search(), "");
    }

    #[test]
    fn test_query_trims_and_omits_blank_search() {
        let start = Instant::now();
        let mut filter = FilterState::new();

        filter.set_search_input("  alice ", start);
        assert!(filter.poll_settle(start + Duration::from_secs(1)));
        assert_eq!(filter.query().search.as_deref(), Some("alice"));

        filter.set_search_input("   ", start);
        assert!(filter.poll_settle(start + Duration::from_secs(2)));
        assert!(filter.query().search.is_none());
    }

    #[test]
    fn test_tracker_requests_reset_only_on_effective_change() {
        let mut filter = FilterState::new();
        let mut tracker = FilterTracker::new();

        // First fetch: record, no reset.
        assert!(!tracker.observe(&filter.snapshot()));
        // Unrelated re-render with the same tuple: no reset.
        assert!(!tracker.observe(&filter.snapshot()));

        filter.toggle_time_frame(TimeFrame::ThisYear);
        assert!(tracker.observe(&filter.snapshot()));
        assert!(!tracker.observe(&filter.snapshot()));

        filter.set_from_date(Some(date("2026-01-01")));
        assert!(tracker.observe(&filter.snapshot()));
    }

    #[test]
    fn test_timer_fire_is_one_shot() {
        let start = Instant::now();
        let mut timer = DebounceTimer::new(Duration::from_millis(500));

        timer.arm(start);
        assert!(timer.is_armed());
        assert!(!timer.fired(start + Duration::from_millis(499)));
        assert!(timer.fired(start + Duration::from_millis(500)));
        assert!(!timer.fired(start + Duration::from_millis(501)));
        assert!(!timer.is_armed());
    }

    #[test]
    fn test_timer_cancel_prevents_fire() {
        let start = Instant::now();
        let mut timer = DebounceTimer::new(Duration::from_millis(500));

        timer.arm(start);
        timer.cancel();
        assert!(!timer.fired(start + Duration::from_secs(5)));
    }
}
