//! CLI arguments and file-based settings.

mod settings;

pub use settings::{Config, Settings};
