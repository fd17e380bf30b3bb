//! # modhcp Kernel
//!
//! The composition root of the service.
//!
//! ## Key Responsibilities & Components:
//!
//! - **Bootstrap sequencing**: [`Bootstrap`](bootstrap::Bootstrap) validates
//!   logging, installs the logger, loads configuration, registers the desired
//!   plugins and constructs the server, stopping at the first failure.
//! - **Lifecycle**: [`Lifecycle`](lifecycle::Lifecycle) starts the server,
//!   blocks until it terminates and holds the process for a fixed grace
//!   period before returning.
//! - **Core Constants**: names, default paths and ports in `constants`.
//! - **Error Handling**: the aggregate [`Error`](error::Error) and its
//!   [`BootstrapPhase`](error::BootstrapPhase).
pub mod bootstrap;
pub mod constants;
pub mod error;
pub mod lifecycle;

pub use bootstrap::{Bootstrap, BootstrapOptions, Bootstrapped, DesiredPlugin};
pub use error::{BootstrapPhase, Error, Result};
pub use lifecycle::{Lifecycle, LifecycleState, ShutdownReport, GRACE_PERIOD};
// Test module declaration
#[cfg(test)]
mod tests;
