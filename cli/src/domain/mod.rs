//! Domain layer: pure business logic, types, and validation.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, `std::process`, or `std::net`.
//! All functions are synchronous and take data in, returning data out.

pub mod action;
pub mod command;
pub mod config;
pub mod error;
pub mod layout;
pub mod template;

pub use action::LifecycleAction;
pub use command::{CommandInvocation, CommandOutcome, OutputTarget};
pub use config::{LivenessKind, ReadinessPolicy, RunInputs, Settings, ToolConfig};
pub use error::LifecycleError;
pub use layout::{InstallLayout, Platform};
