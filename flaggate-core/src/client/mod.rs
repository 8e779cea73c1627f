//! Evaluation clients handed out by factories

mod local;
mod remote;

pub use local::LocalClient;
pub use remote::{RemoteClient, SnapshotStore};

use crate::models::treatment;

/// Computes a treatment for a key/flag pair.
pub trait TreatmentClient: Send + Sync {
    /// Treatment label for `key` under `flag`; `control` when the flag is unknown
    fn get_treatment(&self, key: &str, flag: &str) -> String;

    fn is_on(&self, key: &str, flag: &str) -> bool {
        treatment::is_on(&self.get_treatment(key, flag))
    }
}
