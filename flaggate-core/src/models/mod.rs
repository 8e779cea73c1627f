//! Data models for flaggate

pub mod configuration;
pub mod snapshot;
pub mod treatment;

pub use configuration::*;
pub use snapshot::*;
