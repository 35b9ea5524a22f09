//! Compile command: rig + block mapping to `.hlx`.

use std::io::Write;
use std::path::{Path, PathBuf};

use clap::Args;
use helaix_preset::{
    BlockMapping, DspBudget, PresetCompiler, RigDescription, Settings, save_preset,
};

#[derive(Args)]
pub struct CompileArgs {
    /// Rig description JSON
    #[arg(long, value_name = "FILE")]
    rig: PathBuf,

    /// Block mapping JSON
    #[arg(long, value_name = "FILE")]
    blocks: PathBuf,

    /// Preset name (default: the rig's suggested name)
    #[arg(short, long)]
    name: Option<String>,

    /// Target hardware, e.g. "Helix Floor" or "HX Stomp"
    #[arg(long)]
    hardware: Option<String>,

    /// Expression pedal for wah, volume and whammy blocks (0 disables)
    #[arg(long, value_name = "N")]
    exp_pedal: Option<u32>,

    /// Drive the Variax input even if the rig names no instrument
    #[arg(long)]
    variax: bool,

    /// Variax hardware model ("Standard", "JTV", "Shuriken")
    #[arg(long, value_name = "MODEL")]
    variax_model: Option<String>,

    /// Output directory
    #[arg(short, long, value_name = "DIR")]
    output: Option<PathBuf>,

    /// Never overwrite; number the file instead
    #[arg(long)]
    incremental: bool,

    /// Write the preset JSON to stdout instead of a file
    #[arg(long)]
    stdout: bool,
}

pub fn run(args: CompileArgs, config: &Path) -> anyhow::Result<()> {
    let settings = Settings::load_or_default(config)?;
    let rig = RigDescription::load(&args.rig)?;
    let mapping = BlockMapping::load(&args.blocks)?;

    let name = args
        .name
        .or_else(|| Some(rig.suggested_name.trim().to_string()).filter(|n| !n.is_empty()))
        .unwrap_or_else(|| "New Preset".to_string());

    let mut options = settings.compile_options(name.clone());
    if let Some(hardware) = args.hardware {
        options.hardware = hardware;
    }
    if let Some(pedal) = args.exp_pedal {
        options.default_expression_pedal = pedal;
    }
    if args.variax {
        options.variax_enabled = true;
    }
    if let Some(model) = args.variax_model {
        options.variax_hardware = model;
    }

    let catalog = settings.catalog()?;
    let variax = settings.variax_config();
    let aliases = settings.param_aliases()?;
    let compiler =
        PresetCompiler::new(catalog, &variax, &aliases).with_template(settings.template_source());

    let doc = compiler.compile(&rig, &mapping.blocks, &options)?;
    let budget = DspBudget::from_document(&doc);

    if args.stdout {
        println!("{}", doc.to_json_pretty()?);
        print_usage(&mut std::io::stderr(), &budget)?;
        return Ok(());
    }

    let dir = args.output.unwrap_or(settings.output_path);
    let incremental = args.incremental || settings.incremental_save;
    let path = save_preset(&doc, &dir, &name, incremental)?;

    println!("Compiled '{}' for {}", name, options.hardware);
    println!("Saved to {}", path.display());
    println!();
    print_usage(&mut std::io::stdout(), &budget)?;
    Ok(())
}

fn print_usage(out: &mut impl Write, budget: &DspBudget) -> std::io::Result<()> {
    writeln!(out, "DSP usage:")?;
    for usage in budget.paths() {
        let note = if usage.is_over_capacity() {
            "  OVER CAPACITY"
        } else if usage.is_above_recommended() {
            "  (high)"
        } else {
            ""
        };
        writeln!(
            out,
            "  {}  {:2} blocks  {:5.1}%{}",
            usage.path, usage.blocks, usage.cost, note
        )?;
    }
    Ok(())
}
