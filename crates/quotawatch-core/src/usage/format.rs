//! Pure time-derived text: reset countdowns and the "last updated" line.
//!
//! Both functions take `now` as a parameter so they stay deterministic in
//! tests. Callers must re-invoke them on every render tick; the strings
//! must never be cached past their computation instant.

use chrono::{DateTime, Utc};

/// Shown when a reset instant is already in the past but the backend has
/// not delivered a corrected snapshot yet.
pub const RESETTING_SOON: &str = "Resetting soon…";

/// Format a reset instant as a countdown.
///
/// Absent instant renders as an empty string. Hours and minutes are
/// floored, never rounded up, so "Resets in 0 min" is a legitimate output
/// just above the reset boundary.
pub fn format_countdown(resets_at: Option<DateTime<Utc>>, now: DateTime<Utc>) -> String {
    let Some(resets_at) = resets_at else {
        return String::new();
    };

    let diff = resets_at - now;
    if diff <= chrono::Duration::zero() {
        return RESETTING_SOON.to_string();
    }

    let total_minutes = diff.num_minutes();
    let hours = total_minutes / 60;
    let minutes = total_minutes % 60;
    if hours > 0 {
        format!("Resets in {hours} hr {minutes} min")
    } else {
        format!("Resets in {minutes} min")
    }
}

/// Format the instant a snapshot was fetched as relative elapsed time.
///
/// Returns `None` when the instant is absent so the caller can leave its
/// prior text untouched. Elapsed minutes are floored and clamped to zero
/// to tolerate clock skew producing negative values.
pub fn format_last_updated(
    fetched_at: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> Option<String> {
    let fetched_at = fetched_at?;
    let minutes = (now - fetched_at).num_minutes().max(0);
    if minutes == 0 {
        Some("just now".to_string())
    } else {
        Some(format!("{minutes} min ago"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use pretty_assertions::assert_eq;

    fn now() -> DateTime<Utc> {
        "2026-08-23T12:00:00Z".parse().unwrap()
    }

    #[test]
    fn test_countdown_absent() {
        assert_eq!(format_countdown(None, now()), "");
    }

    #[test]
    fn test_countdown_hours_and_minutes() {
        let resets_at = now() + Duration::minutes(125);
        assert_eq!(
            format_countdown(Some(resets_at), now()),
            "Resets in 2 hr 5 min"
        );
    }

    #[test]
    fn test_countdown_minutes_only() {
        let resets_at = now() + Duration::minutes(42);
        assert_eq!(format_countdown(Some(resets_at), now()), "Resets in 42 min");
    }

    #[test]
    fn test_countdown_floors_to_zero_minutes() {
        let resets_at = now() + Duration::seconds(59);
        assert_eq!(format_countdown(Some(resets_at), now()), "Resets in 0 min");
    }

    #[test]
    fn test_countdown_exactly_one_hour() {
        let resets_at = now() + Duration::hours(1);
        assert_eq!(
            format_countdown(Some(resets_at), now()),
            "Resets in 1 hr 0 min"
        );
    }

    #[test]
    fn test_countdown_in_the_past() {
        let resets_at = now() - Duration::seconds(1);
        assert_eq!(format_countdown(Some(resets_at), now()), RESETTING_SOON);
    }

    #[test]
    fn test_countdown_exactly_now() {
        assert_eq!(format_countdown(Some(now()), now()), RESETTING_SOON);
    }

    #[test]
    fn test_last_updated_absent() {
        assert_eq!(format_last_updated(None, now()), None);
    }

    #[test]
    fn test_last_updated_just_now() {
        assert_eq!(
            format_last_updated(Some(now()), now()),
            Some("just now".to_string())
        );
    }

    #[test]
    fn test_last_updated_rounds_down() {
        let fetched_at = now() - Duration::seconds(30);
        assert_eq!(
            format_last_updated(Some(fetched_at), now()),
            Some("just now".to_string())
        );
    }

    #[test]
    fn test_last_updated_ninety_seconds() {
        let fetched_at = now() - Duration::seconds(90);
        assert_eq!(
            format_last_updated(Some(fetched_at), now()),
            Some("1 min ago".to_string())
        );
    }

    #[test]
    fn test_last_updated_clamps_clock_skew() {
        let fetched_at = now() + Duration::minutes(5);
        assert_eq!(
            format_last_updated(Some(fetched_at), now()),
            Some("just now".to_string())
        );
    }
}
