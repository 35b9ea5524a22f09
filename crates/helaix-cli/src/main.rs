//! HelAIx CLI - compile rig designs into Helix presets.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "helaix")]
#[command(author, version, about = "HelAIx Helix preset compiler", long_about = None)]
struct Cli {
    /// Settings file (default: platform config directory)
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Log compiler decisions
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile a rig and block mapping into an .hlx preset
    Compile(commands::compile::CompileArgs),

    /// List catalog models and their DSP cost
    Models(commands::models::ModelsArgs),

    /// Resolve a Variax instrument and tuning
    Variax(commands::variax::VariaxArgs),

    /// Inspect or create the settings file
    Settings(commands::settings::SettingsArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| default_level.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = cli
        .config
        .unwrap_or_else(helaix_preset::paths::settings_path);

    match cli.command {
        Commands::Compile(args) => commands::compile::run(args, &config),
        Commands::Models(args) => commands::models::run(args),
        Commands::Variax(args) => commands::variax::run(args, &config),
        Commands::Settings(args) => commands::settings::run(args, &config),
    }
}
