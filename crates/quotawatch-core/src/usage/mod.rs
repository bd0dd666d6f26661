//! Usage bucket types, time-derived text, and bucket display mapping.

pub mod format;
pub mod render;
pub mod types;

pub use format::{format_countdown, format_last_updated, RESETTING_SOON};
pub use render::{render_bucket, BucketDisplay, Severity};
pub use types::{UsageBucket, UsageSnapshot};
