//! Client for the Anthropic usage endpoint plus the best-effort disk cache.

use std::path::PathBuf;

use chrono::Utc;
use parking_lot::Mutex;
use thiserror::Error;
use tracing::debug;

use crate::auth;
use crate::usage::UsageSnapshot;

const USAGE_URL: &str = "https://api.anthropic.com/api/oauth/usage";
const OAUTH_BETA: &str = "oauth-2025-04-20";

/// A fetch fault with a display-ready message.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("No Claude credentials: {0}")]
    Credentials(String),
    #[error("Usage request failed: {0}")]
    Request(String),
    #[error("Usage API error ({status}): {body}")]
    Api { status: u16, body: String },
    #[error("Failed to parse usage response: {0}")]
    Parse(String),
}

/// Fetches usage snapshots and mirrors the last successful one to disk.
///
/// Cache reads and writes are best effort: a cache miss or a failed write
/// is never surfaced to the caller.
pub struct UsageClient {
    http: reqwest::Client,
    cache_path: Option<PathBuf>,
    /// Access token obtained via refresh, kept for subsequent requests so
    /// a single expiry does not trigger a refresh on every fetch.
    refreshed_token: Mutex<Option<String>>,
}

impl UsageClient {
    /// Create a client using the default cache location.
    pub fn new() -> Self {
        Self::with_cache_path(default_cache_path())
    }

    /// Create a client with an explicit cache file, or none.
    pub fn with_cache_path(cache_path: Option<PathBuf>) -> Self {
        Self {
            http: reqwest::Client::new(),
            cache_path,
            refreshed_token: Mutex::new(None),
        }
    }

    /// Fetch a fresh snapshot, refreshing the access token once on 401.
    pub async fn get_usage(&self) -> Result<UsageSnapshot, FetchError> {
        let tokens =
            auth::read_tokens().map_err(|e| FetchError::Credentials(format!("{e:#}")))?;

        let access_token = self
            .refreshed_token
            .lock()
            .clone()
            .unwrap_or_else(|| tokens.access_token.clone());

        let snapshot = match self.fetch(&access_token).await {
            Err(FetchError::Api { status: 401, .. }) => {
                debug!("access token expired, refreshing");
                let new_token = auth::refresh_access_token(&self.http, &tokens.refresh_token)
                    .await
                    .map_err(|e| FetchError::Credentials(format!("{e:#}")))?;
                *self.refreshed_token.lock() = Some(new_token.clone());
                self.fetch(&new_token).await?
            }
            other => other?,
        };

        self.store_cached(&snapshot);
        Ok(snapshot)
    }

    async fn fetch(&self, access_token: &str) -> Result<UsageSnapshot, FetchError> {
        let resp = self
            .http
            .get(USAGE_URL)
            .header("Authorization", format!("Bearer {access_token}"))
            .header("anthropic-beta", OAUTH_BETA)
            .send()
            .await
            .map_err(|e| FetchError::Request(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(FetchError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let mut snapshot: UsageSnapshot = resp
            .json()
            .await
            .map_err(|e| FetchError::Parse(e.to_string()))?;
        snapshot.fetched_at = Some(Utc::now());
        Ok(snapshot)
    }

    /// Read the last cached snapshot. Any failure is treated as a miss.
    pub fn get_cached_usage(&self) -> Option<UsageSnapshot> {
        let path = self.cache_path.as_ref()?;
        let content = std::fs::read_to_string(path).ok()?;
        serde_json::from_str(&content).ok()
    }

    fn store_cached(&self, snapshot: &UsageSnapshot) {
        let Some(path) = &self.cache_path else {
            return;
        };
        let result = (|| -> anyhow::Result<()> {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(path, serde_json::to_vec(snapshot)?)?;
            Ok(())
        })();
        if let Err(e) = result {
            debug!("usage cache write failed: {e:#}");
        }
    }
}

impl Default for UsageClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Default cache file location.
pub fn default_cache_path() -> Option<PathBuf> {
    dirs::cache_dir().map(|dir| dir.join("quotawatch").join("usage.json"))
}
