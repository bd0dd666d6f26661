//! quotawatch - terminal dashboard for Claude usage quotas.

pub mod config;
pub mod monitor;
pub mod state;
pub mod ui;
