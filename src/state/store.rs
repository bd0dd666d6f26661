use chrono::{DateTime, Utc};

use quotawatch_core::usage::{format_last_updated, render_bucket, BucketDisplay};
use quotawatch_core::{FetchError, UsageSnapshot};

/// Messages processed by the state machine in arrival order. Every data
/// path funnels through [`AppState::handle`] so there is a single source
/// of truth for what is displayed.
#[derive(Debug)]
pub enum AppMessage {
    /// Best-effort cached snapshot read at startup. `None` is a cache
    /// miss, which is not an error.
    CacheLoaded(Option<UsageSnapshot>),
    /// Completion of a startup or manual fresh fetch.
    FetchDone(Result<UsageSnapshot, FetchError>),
    /// Push update from the background poller.
    Pushed(UsageSnapshot),
    /// Refresh ticker fired; re-render time-derived text over the data we
    /// already hold. Not a fetch.
    Tick,
}

/// Labels and per-bucket empty messages for the three tracked windows.
pub const PANELS: [(&str, &str); 3] = [
    ("Session", "No session data"),
    ("Week", "No weekly data"),
    ("Opus", "You haven't used Opus yet"),
];

/// Spinner frames for the busy indicator
pub const SPINNER_FRAMES: &[char] = &['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];

/// One rendered bucket row.
#[derive(Debug, Clone, PartialEq)]
pub struct PanelRow {
    pub label: &'static str,
    pub display: BucketDisplay,
}

/// What the main panel shows.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewState {
    /// No data yet. A cache miss keeps us here until the first fetch lands.
    Loading,
    /// Last-known snapshot, replaced wholesale on every acquisition.
    Showing(UsageSnapshot),
    /// A fresh fetch failed. Replaces any prior display until the next
    /// successful fetch or push delivers new data.
    Error(String),
}

/// Application state owned by the main loop. Background tasks never touch
/// it directly; they send [`AppMessage`]s instead.
pub struct AppState {
    view: ViewState,
    /// Derived rows for the three bucket panels, rebuilt on every render
    /// pass from the current snapshot.
    pub panels: Vec<PanelRow>,
    /// "Last updated" text. Kept untouched when a snapshot carries no
    /// `fetched_at`.
    pub last_updated: Option<String>,
    /// Outstanding fresh fetches. Overlapping manual refreshes are not
    /// deduplicated; the later-resolving response wins.
    in_flight: u32,
    /// Whether the app is running
    pub running: bool,
    /// Spinner animation frame counter
    spinner_frame: usize,
    /// Last spinner update time
    last_spinner_update: std::time::Instant,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            view: ViewState::Loading,
            panels: Vec::new(),
            last_updated: None,
            in_flight: 0,
            running: true,
            spinner_frame: 0,
            last_spinner_update: std::time::Instant::now(),
        }
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    /// Apply one message to the state machine.
    pub fn handle(&mut self, msg: AppMessage, now: DateTime<Utc>) {
        match msg {
            // Cache is best-effort: absence is silent and we stay Loading.
            // A cached snapshot only seeds the initial view; once a fetch
            // has resolved (either way) the cache read is stale and ignored.
            AppMessage::CacheLoaded(Some(snapshot)) => {
                if self.view == ViewState::Loading {
                    self.show(snapshot, now);
                }
            }
            AppMessage::CacheLoaded(None) => {}
            AppMessage::FetchDone(result) => {
                // Busy indicator clears on both success and failure
                self.in_flight = self.in_flight.saturating_sub(1);
                match result {
                    Ok(snapshot) => self.show(snapshot, now),
                    // A failed refresh surfaces the error even over a
                    // previously successful display
                    Err(e) => self.view = ViewState::Error(e.to_string()),
                }
            }
            // A push supersedes Error and Loading unconditionally
            AppMessage::Pushed(snapshot) => self.show(snapshot, now),
            AppMessage::Tick => self.render_pass(now),
        }
    }

    /// Record that a fresh fetch was spawned. The matching `FetchDone`
    /// decrements the counter regardless of outcome.
    pub fn fetch_started(&mut self) {
        self.in_flight += 1;
    }

    /// Whether any fresh fetch is outstanding.
    pub fn is_fetching(&self) -> bool {
        self.in_flight > 0
    }

    fn show(&mut self, snapshot: UsageSnapshot, now: DateTime<Utc>) {
        self.view = ViewState::Showing(snapshot);
        self.render_pass(now);
    }

    /// Recompute the derived display from the snapshot we already hold.
    /// No state transition and no fetch; countdown and elapsed text are
    /// the only things that change between two identical passes.
    fn render_pass(&mut self, now: DateTime<Utc>) {
        let ViewState::Showing(snapshot) = &self.view else {
            return;
        };

        let buckets = [
            &snapshot.five_hour,
            &snapshot.seven_day,
            &snapshot.seven_day_opus,
        ];
        self.panels = PANELS
            .iter()
            .zip(buckets)
            .map(|(&(label, empty_message), bucket)| PanelRow {
                label,
                display: render_bucket(bucket.as_ref(), empty_message, now),
            })
            .collect();

        if let Some(text) = format_last_updated(snapshot.fetched_at, now) {
            self.last_updated = Some(text);
        }
    }

    /// Advance the spinner animation frame (time-based, ~150ms per frame)
    pub fn tick_spinner(&mut self) {
        let elapsed = self.last_spinner_update.elapsed();
        if elapsed.as_millis() >= 150 {
            self.last_spinner_update = std::time::Instant::now();
            self.spinner_frame = (self.spinner_frame + 1) % SPINNER_FRAMES.len();
        }
    }

    /// Get the current spinner character
    pub fn spinner_char(&self) -> char {
        SPINNER_FRAMES[self.spinner_frame]
    }

    /// Stop the application
    pub fn quit(&mut self) {
        self.running = false;
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use pretty_assertions::assert_eq;
    use quotawatch_core::usage::Severity;
    use quotawatch_core::UsageBucket;

    fn now() -> DateTime<Utc> {
        "2026-08-23T12:00:00Z".parse().unwrap()
    }

    fn snapshot(utilization: f64) -> UsageSnapshot {
        UsageSnapshot {
            five_hour: Some(UsageBucket {
                utilization,
                resets_at: Some(now() + Duration::minutes(125)),
            }),
            seven_day: Some(UsageBucket {
                utilization: 81.0,
                resets_at: None,
            }),
            seven_day_opus: None,
            fetched_at: Some(now()),
        }
    }

    #[test]
    fn test_initial_state_is_loading() {
        let state = AppState::new();
        assert_eq!(state.view(), &ViewState::Loading);
        assert!(state.panels.is_empty());
        assert!(!state.is_fetching());
    }

    #[test]
    fn test_cache_miss_stays_loading() {
        let mut state = AppState::new();
        state.handle(AppMessage::CacheLoaded(None), now());
        assert_eq!(state.view(), &ViewState::Loading);
    }

    #[test]
    fn test_cache_hit_shows_snapshot() {
        let mut state = AppState::new();
        state.handle(AppMessage::CacheLoaded(Some(snapshot(36.0))), now());

        assert!(matches!(state.view(), ViewState::Showing(_)));
        assert_eq!(state.panels.len(), 3);
        assert_eq!(state.panels[0].display.percent_text, "36% used");
        assert_eq!(state.panels[0].display.reset_text, "Resets in 2 hr 5 min");
        assert_eq!(state.panels[1].display.severity, Severity::High);
        // absent bucket renders its empty message at 0% fill
        assert_eq!(state.panels[2].display.fill, 0);
        assert_eq!(state.panels[2].display.reset_text, "You haven't used Opus yet");
        assert_eq!(state.last_updated, Some("just now".to_string()));
    }

    #[test]
    fn test_late_cache_load_never_overwrites_fresh_fetch() {
        let mut state = AppState::new();
        state.fetch_started();
        state.handle(AppMessage::FetchDone(Ok(snapshot(90.0))), now());
        assert_eq!(state.panels[0].display.percent_text, "90% used");

        // A slow cache read resolving after the startup fetch is stale
        state.handle(AppMessage::CacheLoaded(Some(snapshot(10.0))), now());
        assert_eq!(state.panels[0].display.percent_text, "90% used");
    }

    #[test]
    fn test_late_cache_load_never_masks_startup_error() {
        let mut state = AppState::new();
        state.fetch_started();
        state.handle(
            AppMessage::FetchDone(Err(FetchError::Credentials("not signed in".into()))),
            now(),
        );

        state.handle(AppMessage::CacheLoaded(Some(snapshot(10.0))), now());
        assert_eq!(
            state.view(),
            &ViewState::Error("No Claude credentials: not signed in".to_string())
        );
    }

    #[test]
    fn test_failed_fetch_replaces_showing() {
        let mut state = AppState::new();
        state.handle(AppMessage::FetchDone(Ok(snapshot(36.0))), now());
        assert!(matches!(state.view(), ViewState::Showing(_)));

        state.fetch_started();
        state.handle(
            AppMessage::FetchDone(Err(FetchError::Request("connection refused".into()))),
            now(),
        );
        assert_eq!(
            state.view(),
            &ViewState::Error("Usage request failed: connection refused".to_string())
        );
        assert!(!state.is_fetching());

        // Re-triggering the same failing refresh leaves the structure unchanged
        state.fetch_started();
        state.handle(
            AppMessage::FetchDone(Err(FetchError::Request("connection refused".into()))),
            now(),
        );
        assert_eq!(
            state.view(),
            &ViewState::Error("Usage request failed: connection refused".to_string())
        );
    }

    #[test]
    fn test_push_supersedes_error() {
        let mut state = AppState::new();
        state.handle(
            AppMessage::FetchDone(Err(FetchError::Request("boom".into()))),
            now(),
        );
        assert!(matches!(state.view(), ViewState::Error(_)));

        state.handle(AppMessage::Pushed(snapshot(50.0)), now());
        assert!(matches!(state.view(), ViewState::Showing(_)));
        assert_eq!(state.panels[0].display.percent_text, "50% used");
    }

    #[test]
    fn test_snapshot_fully_replaces_prior() {
        let mut state = AppState::new();
        state.handle(AppMessage::Pushed(snapshot(36.0)), now());

        let mut next = snapshot(90.0);
        next.seven_day = None;
        state.handle(AppMessage::Pushed(next), now());

        // No partial merging: the prior seven_day bucket is gone
        assert_eq!(state.panels[1].display.fill, 0);
        assert_eq!(state.panels[1].display.reset_text, "No weekly data");
        assert_eq!(state.panels[0].display.percent_text, "90% used");
    }

    #[test]
    fn test_tick_rerenders_same_snapshot() {
        let mut state = AppState::new();
        state.handle(AppMessage::Pushed(snapshot(36.0)), now());
        let before = state.view().clone();

        let later = now() + Duration::minutes(3);
        state.handle(AppMessage::Tick, later);

        // Snapshot unchanged, time-derived text advanced
        assert_eq!(state.view(), &before);
        assert_eq!(state.panels[0].display.reset_text, "Resets in 2 hr 2 min");
        assert_eq!(state.last_updated, Some("3 min ago".to_string()));
    }

    #[test]
    fn test_elapsed_text_is_monotonic_between_snapshots() {
        let mut state = AppState::new();
        state.handle(AppMessage::Pushed(snapshot(36.0)), now());
        assert_eq!(state.last_updated, Some("just now".to_string()));

        state.handle(AppMessage::Tick, now() + Duration::seconds(90));
        assert_eq!(state.last_updated, Some("1 min ago".to_string()));

        state.handle(AppMessage::Tick, now() + Duration::minutes(5));
        assert_eq!(state.last_updated, Some("5 min ago".to_string()));
    }

    #[test]
    fn test_tick_in_loading_and_error_is_a_no_op() {
        let mut state = AppState::new();
        state.handle(AppMessage::Tick, now());
        assert_eq!(state.view(), &ViewState::Loading);
        assert!(state.panels.is_empty());

        state.handle(
            AppMessage::FetchDone(Err(FetchError::Request("boom".into()))),
            now(),
        );
        state.handle(AppMessage::Tick, now());
        assert!(matches!(state.view(), ViewState::Error(_)));
    }

    #[test]
    fn test_last_updated_kept_when_fetched_at_absent() {
        let mut state = AppState::new();
        state.handle(AppMessage::Pushed(snapshot(36.0)), now());
        assert_eq!(state.last_updated, Some("just now".to_string()));

        let mut stamped_less = snapshot(40.0);
        stamped_less.fetched_at = None;
        state.handle(AppMessage::Pushed(stamped_less), now());

        // Prior text untouched, new buckets rendered
        assert_eq!(state.last_updated, Some("just now".to_string()));
        assert_eq!(state.panels[0].display.percent_text, "40% used");
    }

    #[test]
    fn test_overlapping_fetches_clear_busy_indicator() {
        let mut state = AppState::new();
        state.fetch_started();
        state.fetch_started();
        assert!(state.is_fetching());

        state.handle(AppMessage::FetchDone(Ok(snapshot(10.0))), now());
        assert!(state.is_fetching());

        // Later-resolving response wins the snapshot
        state.handle(AppMessage::FetchDone(Ok(snapshot(20.0))), now());
        assert!(!state.is_fetching());
        assert_eq!(state.panels[0].display.percent_text, "20% used");
    }
}
