//! Maps one usage bucket (or its absence) into display state.

use chrono::{DateTime, Utc};

use super::format::format_countdown;
use super::types::UsageBucket;

/// Three-tier visual classification of a bucket's utilization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Below 50%.
    Low,
    /// 50% to 79%.
    Mid,
    /// 80% and above.
    High,
}

impl Severity {
    /// Classify a rounded integer percentage. 50 and 80 are the inclusive
    /// lower bounds of `Mid` and `High`.
    pub fn from_percent(percent: u32) -> Self {
        if percent < 50 {
            Severity::Low
        } else if percent < 80 {
            Severity::Mid
        } else {
            Severity::High
        }
    }
}

/// Display state derived from a single bucket. Derived on every render
/// pass, never stored across ticks.
#[derive(Debug, Clone, PartialEq)]
pub struct BucketDisplay {
    /// e.g. "36% used". Not clamped: "150% used" is possible.
    pub percent_text: String,
    /// Bar fill in 0..=100, clamped for drawing only.
    pub fill: u16,
    pub severity: Severity,
    /// Reset countdown, or the bucket-specific empty message.
    pub reset_text: String,
}

/// Render one bucket into display state.
///
/// An absent bucket renders as 0% with the caller-supplied empty message.
pub fn render_bucket(
    bucket: Option<&UsageBucket>,
    empty_message: &str,
    now: DateTime<Utc>,
) -> BucketDisplay {
    let Some(bucket) = bucket else {
        return BucketDisplay {
            percent_text: "0% used".to_string(),
            fill: 0,
            severity: Severity::Low,
            reset_text: empty_message.to_string(),
        };
    };

    // round() is half-away-from-zero, which is half-up for the
    // non-negative utilization values the backend reports.
    let percent = bucket.utilization.max(0.0).round() as u32;

    BucketDisplay {
        percent_text: format!("{percent}% used"),
        fill: percent.min(100) as u16,
        severity: Severity::from_percent(percent),
        reset_text: format_countdown(bucket.resets_at, now),
    }
}
