//! Explain command implementation

use anyhow::Result;
use clap::Args;
use serde_json::{Value, json};
use sysparam_core::{ParameterResolver, SourceOutcome};

use super::seed::SeedArgs;

/// Show what the property table and the environment report for a pair of names
#[derive(Args, Debug)]
pub struct ExplainArgs {
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

/// Execute the explain command
pub fn execute(args: ExplainArgs) -> Result<()> {
    args.seed.apply()?;

    let explanation = ParameterResolver::system().explain(&args.property, &args.variable);
    let winner = explanation.winner();

    if args.json {
        let resolved = match winner {
            Some(ref r) => json!({ "value": r.value, "source": r.origin.as_str() }),
            None => Value::Null,
        };
        let output = json!({
            "property": outcome_json(&explanation.property_name, &explanation.property),
            "environment": outcome_json(&explanation.variable_name, &explanation.environment),
            "resolved": resolved,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        let property = format_outcome(&explanation.property);
        let environment = format_outcome(&explanation.environment);
        println!("property {}: {property}", explanation.property_name);
        println!("environment {}: {environment}", explanation.variable_name);
        match winner {
            Some(r) => println!("resolved: {:?} (from {})", r.value, r.origin),
            None => println!("resolved: (none)"),
        }
    }
    Ok(())
}

fn status(outcome: &SourceOutcome) -> &'static str {
    match outcome {
        SourceOutcome::Found(_) => "found",
        SourceOutcome::Blank => "blank",
        SourceOutcome::Unset => "unset",
        SourceOutcome::Unavailable(_) => "unavailable",
    }
}

fn outcome_json(name: &str, outcome: &SourceOutcome) -> Value {
    let mut entry = json!({ "name": name, "status": status(outcome) });
    match outcome {
        SourceOutcome::Found(value) => entry["value"] = json!(value),
        SourceOutcome::Unavailable(reason) => entry["reason"] = json!(reason),
        SourceOutcome::Blank | SourceOutcome::Unset => {}
    }
    entry
}

fn format_outcome(outcome: &SourceOutcome) -> String {
    match outcome {
        SourceOutcome::Found(value) => format!("found {value:?}"),
        SourceOutcome::Unavailable(reason) => format!("unavailable ({reason})"),
        other => status(other).to_string(),
    }
}
