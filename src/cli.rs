use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// stevedore - single-machine deployment tool
#[derive(Parser, Debug)]
#[command(name = "stevedore")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "Run 'stevedore' without an action to redeploy.")]
pub struct Cli {
    /// Path to a stevedore.toml configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbosity level (-v echoes command output)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub action: Option<Action>,
}

#[derive(Subcommand, Debug)]
pub enum Action {
    /// Pull sources, compile, and build the image
    Build,

    /// Start the container detached
    Start,

    /// Stop and remove the container
    Stop,

    /// Full cycle: build, stop, start
    Redeploy,
}
