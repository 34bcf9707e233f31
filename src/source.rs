//! Source synchronization
//!
//! Keeps the local working copy in step with the git remote: pull in place
//! when the checkout exists, clone from scratch when it does not. Whatever
//! branch the checkout is on is the branch that gets deployed.

use std::fs;

use crate::config::DeployConfig;
use crate::error::DeployResult;
use crate::exec::CommandRunner;

pub struct SourceSync<'a> {
    config: &'a DeployConfig,
    runner: &'a dyn CommandRunner,
}

impl<'a> SourceSync<'a> {
    pub fn new(config: &'a DeployConfig, runner: &'a dyn CommandRunner) -> Self {
        Self { config, runner }
    }

    /// Pull the working copy, cloning it first if it does not exist yet
    pub fn sync(&self) -> DeployResult<()> {
        if self.config.repo_path.exists() {
            println!(
                "Working copy {} exists, pulling latest changes",
                self.config.repo_path.display()
            );
            self.runner.run_checked(
                "git",
                &["pull".to_string()],
                Some(&self.config.repo_path),
            )?;
        } else {
            println!(
                "Working copy {} missing, cloning {}",
                self.config.repo_path.display(),
                self.config.repo_url
            );
            if let Some(parent) = self.config.repo_path.parent() {
                fs::create_dir_all(parent)?;
            }
            self.runner.run_checked(
                "git",
                &[
                    "clone".to_string(),
                    self.config.repo_url.clone(),
                    self.config.repo_path.display().to_string(),
                ],
                None,
            )?;
        }
        println!("✓ Sources up to date");
        Ok(())
    }
}
