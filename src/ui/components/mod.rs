mod status_bar;
mod usage_panel;

pub use status_bar::StatusBar;
pub use usage_panel::UsagePanel;
