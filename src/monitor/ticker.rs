use std::time::Duration;

use tokio::sync::mpsc;

use crate::state::AppMessage;

/// Fixed-period trigger that keeps countdowns and the "last updated" line
/// accurate between data updates. Each firing is a single render pass on
/// the main task; the ticker itself performs no I/O.
pub struct Ticker {
    period: Duration,
}

impl Ticker {
    /// Create a new ticker
    pub fn new(period: Duration) -> Self {
        Self { period }
    }

    /// Start ticking in a background task
    pub fn start(self, tx: mpsc::Sender<AppMessage>) {
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(self.period);
            interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
            interval.tick().await; // skip the immediate first tick

            loop {
                interval.tick().await;
                if tx.send(AppMessage::Tick).await.is_err() {
                    break; // Receiver dropped
                }
            }
        });
    }
}
