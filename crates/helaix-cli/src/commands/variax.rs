//! Variax resolution command.

use std::path::Path;

use clap::Args;
use helaix_preset::Settings;
use helaix_variax::variax_type;

#[derive(Args)]
pub struct VariaxArgs {
    /// Instrument text, e.g. "Stratocaster bridge" or "Acoustic 2"
    #[arg(value_name = "MODEL")]
    model: String,

    /// Tuning text, e.g. "Drop D"
    #[arg(short, long)]
    tuning: Option<String>,

    /// Variax hardware model (default: from settings)
    #[arg(long)]
    hardware: Option<String>,
}

pub fn run(args: VariaxArgs, config: &Path) -> anyhow::Result<()> {
    let settings = Settings::load_or_default(config)?;
    let table = settings.variax_config();
    let hardware = args
        .hardware
        .unwrap_or_else(|| settings.variax_hardware_model.clone());

    println!("Hardware: {} ({})", hardware, variax_type(&hardware));
    match table.resolve_model(&args.model, &hardware) {
        Some(code) => println!("Model code: {code}"),
        None => println!("Model code: unmapped"),
    }

    if let Some(tuning) = &args.tuning {
        match table.resolve_tuning(tuning, &hardware) {
            Some(offsets) => {
                let text: Vec<String> = offsets.iter().map(ToString::to_string).collect();
                println!("Tuning offsets (low to high): {}", text.join(" "));
            }
            None => println!("Tuning offsets: standard"),
        }
    }
    Ok(())
}
