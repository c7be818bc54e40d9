//! CLI argument definitions using clap derive API

use clap::{Args, Parser, ValueEnum};

/// Global arguments shared by every devmig tool
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Enable verbose (debug) logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to project directory
    #[arg(short = 'p', long, global = true, default_value = ".")]
    pub project_dir: String,
}

/// Insert or remove the development fixture data
#[derive(Parser, Debug)]
#[command(name = "seed-tool")]
#[command(author, version, about, long_about = None)]
pub struct SeedToolCli {
    #[command(flatten)]
    pub global: GlobalArgs,

    /// What to do with the fixture data
    #[arg(value_enum)]
    pub action: SeedAction,
}

/// Fixture actions
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedAction {
    /// Insert the standard fixture graph
    Generate,
    /// Delete all rows from the fixture tables
    Clean,
}

/// Interactively revert development migrations, newest first
#[derive(Parser, Debug)]
#[command(name = "reconcile")]
#[command(author, version, about, long_about = None)]
pub struct ReconcileCli {
    #[command(flatten)]
    pub global: GlobalArgs,
}

/// Log in to the local API and print an Authorization header
#[derive(Parser, Debug)]
#[command(name = "login-header")]
#[command(author, version, about, long_about = None)]
pub struct LoginCli {
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Base URL of the API server
    #[arg(long, default_value = "http://localhost:8000")]
    pub url: String,

    /// User to log in as
    #[arg(short, long, default_value = "meteor")]
    pub username: String,
}

#[cfg(test)]
#[path = "cli_test.rs"]
mod tests;
