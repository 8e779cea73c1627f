//! Background synchronization of rule data
//!
//! The engine fetches rule snapshots on its own task and promotes the
//! factory's readiness gate after the first complete snapshot.

mod fetcher;
mod poller;

pub use fetcher::{HttpRuleFetcher, RuleFetcher};
pub use poller::PollingSynchronizer;

use crate::client::{RemoteClient, SnapshotStore, TreatmentClient};
use crate::error::RemoteBuildError;
use crate::factory::ReadySignal;
use crate::models::ClientConfiguration;
use std::sync::Arc;
use tokio::task::JoinHandle;

/// Running engine; stopping it aborts its task
#[derive(Debug)]
pub struct EngineHandle {
    task: Option<JoinHandle<()>>,
}

impl EngineHandle {
    pub fn new(task: JoinHandle<()>) -> Self {
        Self { task: Some(task) }
    }

    /// Handle for an engine with no task of its own
    pub fn detached() -> Self {
        Self { task: None }
    }

    pub fn stop(mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

/// What an engine provider hands back to the factory
pub struct StartedEngine {
    pub client: Arc<dyn TreatmentClient>,
    pub handle: EngineHandle,
}

/// Allocates a synchronization engine during remote construction.
///
/// Called with the construction lock held. Must not wait for data.
pub trait EngineProvider: Send + Sync {
    fn start(
        &self,
        token: &str,
        config: &Arc<ClientConfiguration>,
        ready: ReadySignal,
    ) -> Result<StartedEngine, RemoteBuildError>;
}

/// Polls the configured SDK endpoint over HTTP
#[derive(Debug, Clone, Copy, Default)]
pub struct PollingEngineProvider;

impl EngineProvider for PollingEngineProvider {
    fn start(
        &self,
        token: &str,
        config: &Arc<ClientConfiguration>,
        ready: ReadySignal,
    ) -> Result<StartedEngine, RemoteBuildError> {
        let fetcher = HttpRuleFetcher::new(&config.sdk_endpoint, token, config.connection_timeout())
            .map_err(|e| RemoteBuildError::Engine(e.to_string()))?;

        let store = SnapshotStore::new();
        let synchronizer =
            PollingSynchronizer::new(Arc::new(fetcher), store.clone(), config.refresh_interval());
        let task = synchronizer.spawn(ready);

        Ok(StartedEngine {
            client: Arc::new(RemoteClient::new(store)),
            handle: EngineHandle::new(task),
        })
    }
}
