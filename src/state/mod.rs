//! Application state for the quotawatch TUI.

mod store;

pub use store::{AppMessage, AppState, PanelRow, ViewState};
