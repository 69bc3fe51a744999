//! Resolve command implementation

use anyhow::{Result, bail};
use clap::Args;
use serde_json::json;
use sysparam_core::resolve_with_origin;

use super::seed::SeedArgs;

/// Print the value of a property, or of the environment variable if the
/// property is unset or blank
#[derive(Args, Debug)]
pub struct ResolveArgs {
    /// Property name (e.g. app.mode)
    property: String,

    /// Environment variable name (e.g. APP_MODE)
    variable: String,

    #[command(flatten)]
    seed: SeedArgs,

    /// Output as JSON
    #[arg(long)]
    json: bool,
}

/// Execute the resolve command
pub fn execute(args: ResolveArgs) -> Result<()> {
    args.seed.apply()?;

    let Some(resolved) = resolve_with_origin(&args.property, &args.variable) else {
        bail!(
            "no value for property '{}' or environment variable '{}'",
            args.property,
            args.variable
        );
    };

    if args.json {
        let output = json!({
            "value": resolved.value,
            "source": resolved.origin.as_str(),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("{}", resolved.value);
    }
    Ok(())
}
