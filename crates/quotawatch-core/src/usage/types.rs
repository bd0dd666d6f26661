//! Usage snapshot types as reported by the backend.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One rate-limit window (e.g., the 5-hour or 7-day quota).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UsageBucket {
    /// Utilization already expressed as a percentage (36.0 means 36%).
    /// Values above 100 are possible and are kept as reported.
    pub utilization: f64,
    /// When this window resets, if the backend knows.
    pub resets_at: Option<DateTime<Utc>>,
}

/// Complete usage snapshot at one point in time.
///
/// A snapshot is immutable once received; a new one fully replaces the
/// prior one. Fields are never merged across snapshots.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UsageSnapshot {
    /// Rolling 5-hour session window.
    pub five_hour: Option<UsageBucket>,
    /// Rolling 7-day window across all models.
    pub seven_day: Option<UsageBucket>,
    /// Rolling 7-day window for Opus only.
    pub seven_day_opus: Option<UsageBucket>,
    /// When the snapshot was produced. The API response carries no
    /// timestamp; the client stamps this after a successful fetch.
    pub fetched_at: Option<DateTime<Utc>>,
}
