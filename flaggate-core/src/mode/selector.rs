//! Token-based mode selection

use serde::{Deserialize, Serialize};

/// Reserved token that selects local override mode
pub const LOCALHOST: &str = "localhost";

/// Construction path for a factory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FactoryMode {
    /// Treatments fixed from a static override file
    Local,
    /// Treatments computed from remotely synchronized rules
    Remote,
}

impl FactoryMode {
    pub fn is_local(&self) -> bool {
        *self == FactoryMode::Local
    }

    pub fn is_remote(&self) -> bool {
        *self == FactoryMode::Remote
    }
}

impl std::fmt::Display for FactoryMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FactoryMode::Local => write!(f, "local"),
            FactoryMode::Remote => write!(f, "remote"),
        }
    }
}

/// Select the construction path for `token`.
///
/// Exact match against [`LOCALHOST`]; everything else, including the empty
/// string, is remote.
pub fn select_mode(token: &str) -> FactoryMode {
    if token == LOCALHOST {
        FactoryMode::Local
    } else {
        FactoryMode::Remote
    }
}
