//! Compile step
//!
//! Compiles the application into a single self-contained executable with
//! `deno compile` and generates the Dockerfile that packages it. The build
//! directory is cleared (not recreated) on every run so stale artifacts
//! never leak into an image.

use std::fs;
use std::path::Path;

use crate::config::DeployConfig;
use crate::error::{DeployError, DeployResult};
use crate::exec::CommandRunner;

pub struct Builder<'a> {
    config: &'a DeployConfig,
    runner: &'a dyn CommandRunner,
}

impl<'a> Builder<'a> {
    pub fn new(config: &'a DeployConfig, runner: &'a dyn CommandRunner) -> Self {
        Self { config, runner }
    }

    /// Compile the entry point and write the Dockerfile next to the artifact
    pub fn compile(&self) -> DeployResult<()> {
        if !self.config.repo_path.exists() {
            return Err(DeployError::MissingWorkingCopy {
                path: self.config.repo_path.clone(),
            });
        }

        prepare_build_dir(&self.config.build_dir)?;

        let artifact = self.config.artifact_path();
        let mut args: Vec<String> = vec!["compile".to_string()];
        args.extend(self.config.compile_flags.iter().cloned());
        args.push("--target".to_string());
        args.push(self.config.target.clone());
        args.push("--output".to_string());
        args.push(artifact.display().to_string());
        args.push(self.config.entry_point.clone());

        self.runner
            .run_checked("deno", &args, Some(&self.config.repo_path))?;

        if !artifact.exists() {
            return Err(DeployError::MissingArtifact { path: artifact });
        }
        println!("✓ Compiled {}", artifact.display());

        let dockerfile = self.config.dockerfile_path();
        fs::write(&dockerfile, render_dockerfile(&self.config.executable_name))?;
        println!("✓ Wrote {}", dockerfile.display());

        Ok(())
    }
}

/// Create the build directory, or empty an existing one in place
fn prepare_build_dir(build_dir: &Path) -> DeployResult<()> {
    if build_dir.exists() {
        for entry in fs::read_dir(build_dir)? {
            let entry = entry?;
            let path = entry.path();
            if entry.file_type()?.is_dir() {
                fs::remove_dir_all(&path)?;
            } else {
                fs::remove_file(&path)?;
            }
        }
    } else {
        fs::create_dir_all(build_dir)?;
    }
    Ok(())
}

/// Dockerfile packaging the compiled executable on a minimal base image
fn render_dockerfile(executable: &str) -> String {
    format!(
        "FROM alpine:latest\n\
         WORKDIR /app\n\
         COPY {executable} /app/\n\
         RUN chmod +x /app/{executable}\n\
         CMD [\"/app/{executable}\"]\n"
    )
}
