//! Error types for factory construction and readiness waits
//!
//! Each entry point returns only the error kinds it can produce.

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Failure to build a factory from a local override source
#[derive(Debug, Error)]
pub enum LocalFactoryError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Could not determine home directory for override file discovery")]
    NoHomeDirectory,

    #[error("Failed to read override file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed override file {} at line {line}: {reason}", path.display())]
    Parse {
        path: PathBuf,
        line: usize,
        reason: String,
    },
}

/// Failure to build a remote-backed factory
#[derive(Debug, Error)]
pub enum RemoteBuildError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Failed to start synchronization engine: {0}")]
    Engine(String),
}

/// Failure of the token-routed build entry point
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error(transparent)]
    Local(#[from] LocalFactoryError),

    #[error("Failed to start synchronization engine: {0}")]
    Engine(String),
}

impl From<RemoteBuildError> for BuildError {
    fn from(err: RemoteBuildError) -> Self {
        match err {
            RemoteBuildError::InvalidArgument(msg) => BuildError::InvalidArgument(msg),
            RemoteBuildError::Engine(msg) => BuildError::Engine(msg),
        }
    }
}

/// Failure of a readiness wait
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ReadyError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The deadline passed first. The factory stays usable and may still become ready.
    #[error("Factory was not ready within {0:?}")]
    Timeout(Duration),

    /// The wait was cancelled; readiness is unknown.
    #[error("Wait for readiness was interrupted")]
    Interrupted,
}
