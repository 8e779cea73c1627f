//! Token-routed factory builder

use super::{local, remote, Factory};
use crate::error::{BuildError, LocalFactoryError, RemoteBuildError};
use crate::mode::{select_mode, FactoryMode};
use crate::models::ClientConfiguration;
use crate::sync::{EngineProvider, PollingEngineProvider};
use std::path::Path;
use std::sync::{Arc, OnceLock};
use tokio::sync::{Mutex, MutexGuard};

/// Serializes remote construction.
///
/// Clones share the same lock. Construction touches process-wide resources, so
/// production builders share [`ConstructionLock::process_wide`]; tests use
/// [`ConstructionLock::new`] to stay isolated.
#[derive(Debug, Clone, Default)]
pub struct ConstructionLock {
    inner: Arc<Mutex<()>>,
}

impl ConstructionLock {
    /// A lock shared by nothing else
    pub fn new() -> Self {
        Self::default()
    }

    /// The lock shared by every builder in this process
    pub fn process_wide() -> Self {
        static PROCESS_LOCK: OnceLock<ConstructionLock> = OnceLock::new();
        PROCESS_LOCK.get_or_init(ConstructionLock::new).clone()
    }

    pub async fn acquire(&self) -> MutexGuard<'_, ()> {
        self.inner.lock().await
    }

    /// Whether a construction currently holds the lock
    pub fn is_held(&self) -> bool {
        self.inner.try_lock().is_err()
    }
}

/// Builds factories, routing on the token.
///
/// ```no_run
/// # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
/// use flaggate_core::factory::FactoryBuilder;
/// use std::time::Duration;
///
/// let factory = FactoryBuilder::new().build("sdk-key").await?;
/// factory.await_ready(Duration::from_secs(10)).await?;
/// let treatment = factory.client().get_treatment("user-1", "new_checkout");
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct FactoryBuilder {
    lock: ConstructionLock,
    engines: Arc<dyn EngineProvider>,
}

impl FactoryBuilder {
    /// Builder using the process-wide construction lock and the polling engine
    pub fn new() -> Self {
        Self {
            lock: ConstructionLock::process_wide(),
            engines: Arc::new(PollingEngineProvider),
        }
    }

    pub fn with_lock(mut self, lock: ConstructionLock) -> Self {
        self.lock = lock;
        self
    }

    pub fn with_engine_provider(mut self, engines: Arc<dyn EngineProvider>) -> Self {
        self.engines = engines;
        self
    }

    pub fn lock(&self) -> &ConstructionLock {
        &self.lock
    }

    /// Build with default configuration
    pub async fn build(&self, token: &str) -> Result<Factory, BuildError> {
        self.build_with_config(token, ClientConfiguration::default())
            .await
    }

    /// Build local when `token` is the sentinel, remote otherwise
    pub async fn build_with_config(
        &self,
        token: &str,
        config: ClientConfiguration,
    ) -> Result<Factory, BuildError> {
        let mode = select_mode(token);
        tracing::debug!(mode = %mode, "Selected factory mode");

        match mode {
            FactoryMode::Local => Ok(local::build_local(None, config)?),
            FactoryMode::Remote => Ok(self.build_remote(token, config).await?),
        }
    }

    /// Local factory from the default override location
    pub fn local(&self) -> Result<Factory, LocalFactoryError> {
        local::build_local(None, ClientConfiguration::default())
    }

    /// Local factory from `home`, a directory or the override file itself
    pub fn local_from(&self, home: impl AsRef<Path>) -> Result<Factory, LocalFactoryError> {
        local::build_local(Some(home.as_ref()), ClientConfiguration::default())
    }

    /// Remote factory; never deduplicated by token
    pub async fn build_remote(
        &self,
        token: &str,
        config: ClientConfiguration,
    ) -> Result<Factory, RemoteBuildError> {
        remote::build_remote(&self.lock, self.engines.as_ref(), token, config).await
    }
}

impl Default for FactoryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_process_wide_lock_is_shared() {
        let a = ConstructionLock::process_wide();
        let b = ConstructionLock::process_wide();
        assert!(Arc::ptr_eq(&a.inner, &b.inner));
        assert!(!Arc::ptr_eq(&a.inner, &ConstructionLock::new().inner));
    }

    #[tokio::test]
    async fn test_is_held_tracks_guard() {
        let lock = ConstructionLock::new();
        assert!(!lock.is_held());
        let guard = lock.acquire().await;
        assert!(lock.is_held());
        assert!(lock.clone().is_held());
        drop(guard);
        assert!(!lock.is_held());
    }
}
