//! Periodic snapshot polling

use super::RuleFetcher;
use crate::client::SnapshotStore;
use crate::factory::ReadySignal;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

/// Fetches on a fixed interval and keeps the store current.
///
/// Failed fetches are logged and retried on the next tick.
pub struct PollingSynchronizer {
    fetcher: Arc<dyn RuleFetcher>,
    store: SnapshotStore,
    refresh: Duration,
}

impl PollingSynchronizer {
    pub fn new(fetcher: Arc<dyn RuleFetcher>, store: SnapshotStore, refresh: Duration) -> Self {
        Self {
            fetcher,
            store,
            refresh,
        }
    }

    /// Fetch once. Returns whether a snapshot was stored.
    pub async fn sync_once(&self, ready: &ReadySignal) -> bool {
        match self.fetcher.fetch().await {
            Ok(snapshot) => {
                tracing::debug!(
                    flag_count = snapshot.flags.len(),
                    segment_count = snapshot.segments.len(),
                    "Rule snapshot refreshed"
                );
                self.store.replace(snapshot);
                ready.mark_ready();
                true
            }
            Err(e) => {
                tracing::warn!(error = %e, "Rule snapshot fetch failed");
                false
            }
        }
    }

    /// Run on a background task until aborted
    pub fn spawn(self, ready: ReadySignal) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(self.refresh);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                // First tick completes immediately
                ticker.tick().await;
                self.sync_once(&ready).await;
            }
        })
    }
}
