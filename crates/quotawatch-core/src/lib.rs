//! Core library for quotawatch: usage snapshot types, pure display
//! mapping, and the client that talks to the Anthropic usage endpoint.

pub mod auth;
pub mod client;
pub mod usage;

pub use client::{FetchError, UsageClient};
pub use usage::{UsageBucket, UsageSnapshot};
