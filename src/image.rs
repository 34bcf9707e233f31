//! Image build step

use crate::config::DeployConfig;
use crate::error::{DeployError, DeployResult};
use crate::exec::CommandRunner;

/// Builds the Docker image from the generated Dockerfile, with the build
/// directory as the build context.
pub struct ImageBuilder<'a> {
    config: &'a DeployConfig,
    runner: &'a dyn CommandRunner,
}

impl<'a> ImageBuilder<'a> {
    pub fn new(config: &'a DeployConfig, runner: &'a dyn CommandRunner) -> Self {
        Self { config, runner }
    }

    pub fn build_image(&self) -> DeployResult<()> {
        let dockerfile = self.config.dockerfile_path();
        if !dockerfile.exists() {
            return Err(DeployError::MissingDescriptor { path: dockerfile });
        }

        self.runner.run_checked(
            "docker",
            &[
                "build".to_string(),
                "-t".to_string(),
                self.config.image_name.clone(),
                "-f".to_string(),
                dockerfile.display().to_string(),
                self.config.build_dir.display().to_string(),
            ],
            None,
        )?;
        println!("✓ Built image '{}'", self.config.image_name);
        Ok(())
    }
}
