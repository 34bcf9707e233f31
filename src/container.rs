//! Container lifecycle
//!
//! Stop, remove, and start the named container. Stop and remove are guarded
//! by an inspect probe so that a container that was never started does not
//! fail the action; the probe distinguishes "no such container" from a
//! broken engine connection instead of conflating the two.

use crate::config::DeployConfig;
use crate::error::{DeployError, DeployResult};
use crate::exec::CommandRunner;

/// Outcome of the `docker inspect` probe
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContainerState {
    Present,
    Absent,
    /// Probe exited non-zero for some reason other than a missing container
    /// (typically an unreachable daemon)
    ProbeFailed(String),
}

pub struct ContainerLifecycle<'a> {
    config: &'a DeployConfig,
    runner: &'a dyn CommandRunner,
}

impl<'a> ContainerLifecycle<'a> {
    pub fn new(config: &'a DeployConfig, runner: &'a dyn CommandRunner) -> Self {
        Self { config, runner }
    }

    /// Probe for the configured container
    pub fn probe(&self) -> DeployResult<ContainerState> {
        let output = self.runner.run(
            "docker",
            &[
                "inspect".to_string(),
                self.config.container_name.clone(),
            ],
            None,
        )?;

        if output.success() {
            return Ok(ContainerState::Present);
        }
        let stderr = output.stderr.to_lowercase();
        if stderr.contains("no such object") || stderr.contains("no such container") {
            Ok(ContainerState::Absent)
        } else {
            Ok(ContainerState::ProbeFailed(output.stderr))
        }
    }

    /// Stop the container if it exists. Stopping an already-stopped
    /// container is not an error.
    pub fn stop(&self) -> DeployResult<()> {
        match self.probe()? {
            ContainerState::Present => {
                let _ = self.runner.run(
                    "docker",
                    &["stop".to_string(), self.config.container_name.clone()],
                    None,
                )?;
                println!("✓ Stopped container '{}'", self.config.container_name);
            }
            ContainerState::Absent => {
                println!(
                    "Container '{}' does not exist, nothing to stop",
                    self.config.container_name
                );
            }
            ContainerState::ProbeFailed(message) => {
                return Err(DeployError::DaemonUnreachable { message });
            }
        }
        Ok(())
    }

    /// Remove the container if it exists
    pub fn remove(&self) -> DeployResult<()> {
        match self.probe()? {
            ContainerState::Present => {
                let _ = self.runner.run(
                    "docker",
                    &["rm".to_string(), self.config.container_name.clone()],
                    None,
                )?;
                println!("✓ Removed container '{}'", self.config.container_name);
            }
            ContainerState::Absent => {
                println!(
                    "Container '{}' does not exist, nothing to remove",
                    self.config.container_name
                );
            }
            ContainerState::ProbeFailed(message) => {
                return Err(DeployError::DaemonUnreachable { message });
            }
        }
        Ok(())
    }

    /// Start a detached container with the configured ports and environment
    pub fn start(&self) -> DeployResult<()> {
        let mut args: Vec<String> = vec![
            "run".to_string(),
            "-d".to_string(),
            "--name".to_string(),
            self.config.container_name.clone(),
        ];
        for mapping in &self.config.ports {
            args.push("-p".to_string());
            args.push(mapping.clone());
        }
        for (key, value) in &self.config.env {
            args.push("-e".to_string());
            args.push(format!("{key}={value}"));
        }
        args.push(self.config.image_name.clone());

        self.runner.run_checked("docker", &args, None)?;
        println!("✓ Started container '{}'", self.config.container_name);
        Ok(())
    }
}
