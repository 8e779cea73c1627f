//! # Flaggate Core Library
//!
//! Builds feature-flag evaluation clients and gates their use until rule data
//! is ready.
//!
//! A token routes construction: the `localhost` sentinel yields a factory
//! backed by a static override file, anything else a factory backed by a
//! background synchronization engine. Remote construction is serialized by a
//! [`factory::ConstructionLock`]; readiness is awaited separately with a
//! deadline.

pub mod client;
pub mod error;
pub mod factory;
pub mod mode;
pub mod models;
pub mod services;
pub mod sync;

pub use client::TreatmentClient;
pub use error::{BuildError, LocalFactoryError, ReadyError, RemoteBuildError};
pub use factory::{Factory, FactoryBuilder, ReadinessState};
pub use mode::{select_mode, FactoryMode, LOCALHOST};
pub use models::ClientConfiguration;
