//! sysparam - inspect parameter resolution
//!
//! Resolves a value from the process property table (seeded with `-D` and
//! `--properties`) with a fallback to an environment variable.

use clap::Parser;

mod commands;

use commands::Cli;

fn main() {
    sysparam_core::logging::init();
    let cli = Cli::parse();

    if let Err(e) = cli.execute() {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}
