//! CLI command handling

pub mod interactive;
