//! Mode selection
//!
//! Decides from the token whether a factory is backed by a local override
//! file or by remote synchronization.

mod selector;

pub use selector::{select_mode, FactoryMode, LOCALHOST};
