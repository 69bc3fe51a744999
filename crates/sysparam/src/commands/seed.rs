//! Property table seeding shared by all commands

use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;
use sysparam_core::properties;
use tracing::debug;

/// Property definitions applied before resolution
#[derive(Args, Debug)]
pub struct SeedArgs {
    /// Define a property (repeatable, overrides --properties)
    #[arg(short = 'D', value_name = "NAME=VALUE")]
    define: Vec<String>,

    /// Load properties from a TOML file
    #[arg(long, value_name = "FILE")]
    properties: Option<PathBuf>,
}

impl SeedArgs {
    /// Install the file first, then the `-D` definitions
    pub fn apply(&self) -> Result<()> {
        if let Some(ref path) = self.properties {
            properties::load_file(path)
                .with_context(|| format!("Failed to load properties from {}", path.display()))?;
        }

        // Parse every definition before installing any of them
        let definitions = self
            .define
            .iter()
            .map(|d| properties::parse_definition(d))
            .collect::<Result<Vec<_>, _>>()?;

        for (name, value) in definitions {
            debug!("Defining property '{name}'");
            properties::set_property(name, value);
        }
        Ok(())
    }
}
