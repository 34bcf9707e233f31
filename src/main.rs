//! stevedore CLI entry point
//!
//! Usage: stevedore [build|start|stop|redeploy]
//!
//! No action defaults to a full redeploy.

mod cli;

use anyhow::Result;
use clap::Parser;

use cli::{Action, Cli};
use stevedore::config::DeployConfig;
use stevedore::exec::SystemRunner;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = DeployConfig::load_or_default(cli.config.as_deref())?;
    let runner = SystemRunner::new(cli.verbose > 0);

    match cli.action {
        Some(Action::Build) => stevedore::commands::build(&config, &runner)?,
        Some(Action::Start) => stevedore::commands::start(&config, &runner)?,
        Some(Action::Stop) => stevedore::commands::stop(&config, &runner)?,
        Some(Action::Redeploy) => stevedore::commands::redeploy(&config, &runner)?,
        None => {
            println!("No action given, defaulting to redeploy");
            stevedore::commands::redeploy(&config, &runner)?;
        }
    }

    Ok(())
}
