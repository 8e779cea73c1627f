//! Client backed by synchronized rule snapshots

use super::TreatmentClient;
use crate::models::{treatment, RuleSnapshot};
use std::sync::{Arc, RwLock};

/// Latest snapshot written by the synchronization engine.
///
/// Clones share the same slot.
#[derive(Debug, Clone, Default)]
pub struct SnapshotStore {
    latest: Arc<RwLock<Option<Arc<RuleSnapshot>>>>,
}

impl SnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn latest(&self) -> Option<Arc<RuleSnapshot>> {
        let guard = self.latest.read().unwrap_or_else(|e| e.into_inner());
        guard.clone()
    }

    pub fn replace(&self, snapshot: RuleSnapshot) {
        let mut guard = self.latest.write().unwrap_or_else(|e| e.into_inner());
        *guard = Some(Arc::new(snapshot));
    }
}

/// Evaluates against whatever snapshot is current; `control` before the first one
#[derive(Debug, Clone)]
pub struct RemoteClient {
    store: SnapshotStore,
}

impl RemoteClient {
    pub fn new(store: SnapshotStore) -> Self {
        Self { store }
    }
}

impl TreatmentClient for RemoteClient {
    fn get_treatment(&self, key: &str, flag: &str) -> String {
        self.store
            .latest()
            .and_then(|snapshot| snapshot.treatment(key, flag).map(str::to_string))
            .unwrap_or_else(|| treatment::CONTROL.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FlagRule;
    use std::collections::HashMap;

    fn snapshot_with(flag: &str, default_treatment: &str) -> RuleSnapshot {
        let mut flags = HashMap::new();
        flags.insert(
            flag.to_string(),
            FlagRule {
                default_treatment: default_treatment.to_string(),
                killed: false,
                keys: HashMap::new(),
                segments: Vec::new(),
            },
        );
        RuleSnapshot {
            flags,
            segments: HashMap::new(),
            fetched_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn test_control_before_first_snapshot() {
        let client = RemoteClient::new(SnapshotStore::new());
        assert_eq!(client.get_treatment("user", "checkout"), treatment::CONTROL);
    }

    #[test]
    fn test_reads_latest_snapshot() {
        let store = SnapshotStore::new();
        let client = RemoteClient::new(store.clone());

        store.replace(snapshot_with("checkout", "off"));
        assert_eq!(client.get_treatment("user", "checkout"), "off");

        store.replace(snapshot_with("checkout", "on"));
        assert!(client.is_on("user", "checkout"));
        assert_eq!(client.get_treatment("user", "other"), treatment::CONTROL);
    }
}
