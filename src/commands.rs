//! Deployment actions
//!
//! Each action is a straight-line composition of the component steps; the
//! first error aborts the whole action and surfaces in `main`.

use crate::build::Builder;
use crate::config::DeployConfig;
use crate::container::ContainerLifecycle;
use crate::error::DeployResult;
use crate::exec::CommandRunner;
use crate::image::ImageBuilder;
use crate::source::SourceSync;

/// `build`: pull sources, compile, build the image
pub fn build(config: &DeployConfig, runner: &dyn CommandRunner) -> DeployResult<()> {
    println!("📦 stevedore build");
    SourceSync::new(config, runner).sync()?;
    Builder::new(config, runner).compile()?;
    ImageBuilder::new(config, runner).build_image()?;
    println!("✓ build complete");
    Ok(())
}

/// `stop`: stop and remove the container (absent container is fine)
pub fn stop(config: &DeployConfig, runner: &dyn CommandRunner) -> DeployResult<()> {
    println!("🛑 stevedore stop");
    let lifecycle = ContainerLifecycle::new(config, runner);
    lifecycle.stop()?;
    lifecycle.remove()?;
    println!("✓ stop complete");
    Ok(())
}

/// `start`: run the container detached
pub fn start(config: &DeployConfig, runner: &dyn CommandRunner) -> DeployResult<()> {
    println!("🚀 stevedore start");
    ContainerLifecycle::new(config, runner).start()?;
    println!("✓ start complete");
    Ok(())
}

/// `redeploy`: full cycle, build then swap the running container
pub fn redeploy(config: &DeployConfig, runner: &dyn CommandRunner) -> DeployResult<()> {
    println!("🔄 stevedore redeploy");
    check_docker(runner)?;
    build(config, runner)?;
    stop(config, runner)?;
    start(config, runner)?;
    println!("✓ redeploy complete");
    Ok(())
}

/// Verify the container engine is installed before a full redeploy
fn check_docker(runner: &dyn CommandRunner) -> DeployResult<()> {
    runner.run_checked("docker", &["--version".to_string()], None)?;
    Ok(())
}
