//! Local override mode

use super::Factory;
use crate::client::LocalClient;
use crate::error::LocalFactoryError;
use crate::models::ClientConfiguration;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Override file looked up inside a home directory
pub const OVERRIDE_FILE_NAME: &str = ".split";

/// Build a factory whose treatments come from a static override file.
///
/// `home` may name the override file itself or a directory holding
/// [`OVERRIDE_FILE_NAME`]. Without it the user's home directory is used. The
/// file is read once, here, and the factory is ready on return. `config` is
/// kept on the factory but drives nothing in local mode.
pub fn build_local(
    home: Option<&Path>,
    config: ClientConfiguration,
) -> Result<Factory, LocalFactoryError> {
    let path = resolve_override_path(home)?;
    let client = LocalClient::from_file(&path)?;

    let factory = Factory::local(Arc::new(client), Arc::new(config));
    tracing::info!(
        factory_id = %factory.id(),
        path = %path.display(),
        "Local factory constructed"
    );
    Ok(factory)
}

fn resolve_override_path(home: Option<&Path>) -> Result<PathBuf, LocalFactoryError> {
    let home = match home {
        Some(path) if path.as_os_str().is_empty() => {
            return Err(LocalFactoryError::InvalidArgument(
                "home path must not be empty".to_string(),
            ))
        }
        Some(path) => path.to_path_buf(),
        None => dirs::home_dir().ok_or(LocalFactoryError::NoHomeDirectory)?,
    };

    if home.is_file() {
        Ok(home)
    } else {
        Ok(home.join(OVERRIDE_FILE_NAME))
    }
}
