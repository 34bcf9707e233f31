//! stevedore - single-machine deployment tool
//!
//! Orchestrates the deployment lifecycle of a Deno application on one host:
//! pull sources with git, compile them into a self-contained executable,
//! package it into a Docker image, and manage the container's start/stop
//! lifecycle.

pub mod build;
pub mod commands;
pub mod config;
pub mod container;
pub mod error;
pub mod exec;
pub mod image;
pub mod source;

// Re-exports for convenience
pub use build::Builder;
pub use config::DeployConfig;
pub use container::{ContainerLifecycle, ContainerState};
pub use error::{DeployError, DeployResult};
pub use exec::{CommandRunner, ExecOutput, SystemRunner};
pub use image::ImageBuilder;
pub use source::SourceSync;
