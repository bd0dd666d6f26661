use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tracing::{debug, warn};

use quotawatch_core::UsageClient;

use crate::state::AppMessage;

/// Background poller that fetches fresh snapshots on a fixed cadence and
/// pushes them to the main loop. Poll failures are logged and skipped;
/// the next cycle simply tries again.
pub struct Poller {
    client: Arc<UsageClient>,
    interval: Duration,
}

impl Poller {
    /// Create a new poller
    pub fn new(client: Arc<UsageClient>, interval: Duration) -> Self {
        Self { client, interval }
    }

    /// Start polling in a background task
    pub fn start(self, tx: mpsc::Sender<AppMessage>) {
        tokio::spawn(async move {
            self.run(tx).await;
        });
    }

    async fn run(self, tx: mpsc::Sender<AppMessage>) {
        let mut interval = tokio::time::interval(self.interval);
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        // Skip the immediate first tick; the startup fetch covers it
        interval.tick().await;

        loop {
            interval.tick().await;
            match self.client.get_usage().await {
                Ok(snapshot) => {
                    debug!("poll delivered a fresh snapshot");
                    if tx.send(AppMessage::Pushed(snapshot)).await.is_err() {
                        break; // Receiver dropped
                    }
                }
                Err(e) => {
                    warn!("usage poll failed: {e}");
                }
            }
        }
    }
}
