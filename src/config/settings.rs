use anyhow::{Context, Result};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Command line arguments
#[derive(Parser, Debug)]
#[command(author, version, about = "Terminal dashboard for Claude usage quotas")]
pub struct Config {
    /// Enable debug mode
    #[arg(short, long)]
    pub debug: bool,

    /// Path to config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Background polling interval in seconds
    #[arg(short = 'i', long)]
    pub poll_interval: Option<u64>,

    /// Countdown re-render interval in seconds
    #[arg(short = 't', long)]
    pub tick_interval: Option<u64>,

    /// Disable the on-disk snapshot cache
    #[arg(long)]
    pub no_cache: bool,
}

impl Config {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

/// Application settings (from config file)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Background polling interval in seconds
    #[serde(default = "default_poll_interval")]
    pub poll_interval_secs: u64,

    /// Countdown re-render interval in seconds
    #[serde(default = "default_tick_interval")]
    pub tick_interval_secs: u64,

    /// Cache the last snapshot on disk for instant startup
    #[serde(default = "default_cache_enabled")]
    pub cache_enabled: bool,
}

fn default_poll_interval() -> u64 {
    300
}

fn default_tick_interval() -> u64 {
    30
}

fn default_cache_enabled() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            poll_interval_secs: default_poll_interval(),
            tick_interval_secs: default_tick_interval(),
            cache_enabled: default_cache_enabled(),
        }
    }
}

impl Settings {
    /// Load settings from config file or use defaults
    pub fn load(path: Option<&PathBuf>) -> Result<Self> {
        // Try custom path first
        if let Some(p) = path {
            if p.exists() {
                let content = std::fs::read_to_string(p)
                    .with_context(|| format!("Failed to read config file: {:?}", p))?;
                return toml::from_str(&content)
                    .with_context(|| format!("Failed to parse config file: {:?}", p));
            }
        }

        // Try default config locations
        let default_paths = [
            dirs::config_dir().map(|p| p.join("quotawatch/config.toml")),
            dirs::home_dir().map(|p| p.join(".config/quotawatch/config.toml")),
            dirs::home_dir().map(|p| p.join(".quotawatch.toml")),
        ];

        for path in default_paths.iter().flatten() {
            if path.exists() {
                let content = std::fs::read_to_string(path)
                    .with_context(|| format!("Failed to read config file: {:?}", path))?;
                return toml::from_str(&content)
                    .with_context(|| format!("Failed to parse config file: {:?}", path));
            }
        }

        // Return defaults if no config file found
        Ok(Self::default())
    }

    /// Merge CLI config into settings (CLI takes precedence)
    pub fn merge_cli(&mut self, cli: &Config) {
        if let Some(poll_interval) = cli.poll_interval {
            self.poll_interval_secs = poll_interval;
        }
        if let Some(tick_interval) = cli.tick_interval {
            self.tick_interval_secs = tick_interval;
        }
        if cli.no_cache {
            self.cache_enabled = false;
        }
    }

    /// Validate and normalize settings values
    ///
    /// Ensures intervals have a minimum value to prevent hammering the API
    /// or burning CPU on redraws.
    pub fn validate(&mut self) {
        const MIN_POLL_INTERVAL: u64 = 30;
        const MIN_TICK_INTERVAL: u64 = 1;

        if self.poll_interval_secs < MIN_POLL_INTERVAL {
            self.poll_interval_secs = MIN_POLL_INTERVAL;
        }
        if self.tick_interval_secs < MIN_TICK_INTERVAL {
            self.tick_interval_secs = MIN_TICK_INTERVAL;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.poll_interval_secs, 300);
        assert_eq!(settings.tick_interval_secs, 30);
        assert!(settings.cache_enabled);
    }

    #[test]
    fn test_parse_toml() {
        let toml = r#"
            poll_interval_secs = 600
            tick_interval_secs = 15
            cache_enabled = false
        "#;

        let settings: Settings = toml::from_str(toml).expect("Should parse TOML");
        assert_eq!(settings.poll_interval_secs, 600);
        assert_eq!(settings.tick_interval_secs, 15);
        assert!(!settings.cache_enabled);
    }

    #[test]
    fn test_validate_enforces_minimums() {
        let mut settings = Settings {
            poll_interval_secs: 1,
            tick_interval_secs: 0,
            cache_enabled: true,
        };
        settings.validate();
        assert_eq!(settings.poll_interval_secs, 30);
        assert_eq!(settings.tick_interval_secs, 1);
    }
}
