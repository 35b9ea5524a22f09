//! Model catalog listing.

#![allow(clippy::print_literal)] // Table headers use literal strings intentionally

use clap::Args;
use helaix_catalog::Catalog;
use serde_json::json;

#[derive(Args)]
pub struct ModelsArgs {
    /// Only models whose name, identifier or reference gear contains this
    #[arg(value_name = "FILTER")]
    filter: Option<String>,

    /// Print JSON instead of a table
    #[arg(long)]
    json: bool,
}

pub fn run(args: ModelsArgs) -> anyhow::Result<()> {
    let catalog = Catalog::builtin()?;
    let entries = catalog.search(args.filter.as_deref().unwrap_or(""));

    if args.json {
        let list: Vec<_> = entries
            .iter()
            .map(|e| {
                json!({
                    "name": e.display_name(),
                    "internal_name": e.internal_name,
                    "based_on": e.based_on,
                    "family": format!("{:?}", e.family()),
                    "dsp_cost": e.mono_cost(),
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&list)?);
        return Ok(());
    }

    if entries.is_empty() {
        println!("No models match '{}'", args.filter.unwrap_or_default());
        return Ok(());
    }

    println!("{:24}  {:28}  {:>6}  {}", "Name", "Identifier", "DSP %", "Based on");
    println!("{:24}  {:28}  {:>6}  {}", "----", "----------", "-----", "--------");
    for entry in &entries {
        println!(
            "{:24}  {:28}  {:>6.1}  {}",
            entry.display_name(),
            entry.internal_name,
            entry.mono_cost(),
            entry.based_on
        );
    }
    println!();
    println!("{} of {} models", entries.len(), catalog.len());
    Ok(())
}
