//! Factory construction and the factory handle

mod builder;
mod local;
pub mod readiness;
mod remote;

pub use builder::{ConstructionLock, FactoryBuilder};
pub use local::{build_local, OVERRIDE_FILE_NAME};
pub use readiness::{ReadinessGate, ReadinessState, ReadySignal};

use crate::client::TreatmentClient;
use crate::error::ReadyError;
use crate::mode::FactoryMode;
use crate::models::ClientConfiguration;
use crate::sync::{EngineHandle, StartedEngine};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

/// Handle to a constructed client and its readiness.
///
/// Dropping the factory stops its background synchronization.
pub struct Factory {
    id: Uuid,
    mode: FactoryMode,
    config: Arc<ClientConfiguration>,
    client: Arc<dyn TreatmentClient>,
    readiness: ReadinessGate,
    engine: Option<EngineHandle>,
}

impl Factory {
    pub(crate) fn local(
        client: Arc<dyn TreatmentClient>,
        config: Arc<ClientConfiguration>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            mode: FactoryMode::Local,
            config,
            client,
            readiness: ReadinessGate::ready(),
            engine: None,
        }
    }

    pub(crate) fn remote(
        config: Arc<ClientConfiguration>,
        engine: StartedEngine,
        readiness: ReadinessGate,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            mode: FactoryMode::Remote,
            config,
            client: engine.client,
            readiness,
            engine: Some(engine.handle),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn mode(&self) -> FactoryMode {
        self.mode
    }

    pub fn config(&self) -> &ClientConfiguration {
        &self.config
    }

    /// Evaluation client backed by this factory's rule data
    pub fn client(&self) -> Arc<dyn TreatmentClient> {
        Arc::clone(&self.client)
    }

    pub fn readiness(&self) -> &ReadinessGate {
        &self.readiness
    }

    pub fn state(&self) -> ReadinessState {
        self.readiness.state()
    }

    pub fn is_ready(&self) -> bool {
        self.readiness.is_ready()
    }

    /// See [`ReadinessGate::await_ready`]
    pub async fn await_ready(&self, timeout: Duration) -> Result<(), ReadyError> {
        self.readiness.await_ready(timeout).await
    }

    /// See [`ReadinessGate::await_ready_or_interrupt`]
    pub async fn await_ready_or_interrupt<F>(
        &self,
        timeout: Duration,
        interrupt: F,
    ) -> Result<(), ReadyError>
    where
        F: Future,
    {
        self.readiness
            .await_ready_or_interrupt(timeout, interrupt)
            .await
    }

    /// Stop background synchronization and release the factory
    pub fn destroy(self) {
        tracing::info!(factory_id = %self.id, mode = %self.mode, "Factory destroyed");
    }
}

impl Drop for Factory {
    fn drop(&mut self) {
        if let Some(engine) = self.engine.take() {
            engine.stop();
        }
    }
}

impl std::fmt::Debug for Factory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Factory")
            .field("id", &self.id)
            .field("mode", &self.mode)
            .field("state", &self.state())
            .finish()
    }
}
