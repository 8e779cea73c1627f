//! Remote mode construction

use super::{ConstructionLock, Factory, ReadinessGate};
use crate::error::RemoteBuildError;
use crate::models::ClientConfiguration;
use crate::sync::EngineProvider;
use std::sync::Arc;

/// Validate inputs, then allocate the engine under the construction lock.
///
/// Validation failures return before the lock is touched. The returned
/// factory is not ready; data arrives asynchronously.
pub(crate) async fn build_remote(
    lock: &ConstructionLock,
    engines: &dyn EngineProvider,
    token: &str,
    config: ClientConfiguration,
) -> Result<Factory, RemoteBuildError> {
    if token.trim().is_empty() {
        return Err(RemoteBuildError::InvalidArgument(
            "token must not be empty".to_string(),
        ));
    }
    config
        .validate()
        .map_err(|errors| RemoteBuildError::InvalidArgument(errors.join("; ")))?;
    let config = Arc::new(config);

    let _guard = lock.acquire().await;

    let readiness = ReadinessGate::new();
    let engine = engines.start(token, &config, readiness.signal())?;
    let factory = Factory::remote(config, engine, readiness);

    tracing::info!(
        factory_id = %factory.id(),
        sdk_endpoint = %factory.config().sdk_endpoint,
        "Remote factory constructed"
    );
    Ok(factory)
}
