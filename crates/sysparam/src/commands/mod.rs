//! CLI command dispatch and execution

use anyhow::Result;
use clap::{Parser, Subcommand};

mod explain;
mod resolve;
mod seed;

/// sysparam - property-then-environment parameter resolution
#[derive(Parser, Debug)]
#[command(
    name = "sysparam",
    version,
    about = "Resolve a parameter from process properties or the environment",
    long_about = "Resolve a parameter from the process property table, falling back to an environment variable. \
                  Properties are seeded with --properties FILE and -D NAME=VALUE."
)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the resolved value
    Resolve(resolve::ResolveArgs),

    /// Show what each source reports and which one wins
    Explain(explain::ExplainArgs),
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> Result<()> {
        match self.command {
            Commands::Resolve(args) => resolve::execute(args),
            Commands::Explain(args) => explain::execute(args),
        }
    }
}
