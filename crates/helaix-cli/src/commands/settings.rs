//! Settings file management.

use std::path::Path;

use clap::{Args, Subcommand};
use helaix_preset::Settings;

#[derive(Args)]
pub struct SettingsArgs {
    #[command(subcommand)]
    command: SettingsCommand,
}

#[derive(Subcommand)]
enum SettingsCommand {
    /// Print the effective settings
    Show,

    /// Print the settings file location
    Path,

    /// Write a settings file with default values
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

pub fn run(args: SettingsArgs, config: &Path) -> anyhow::Result<()> {
    match args.command {
        SettingsCommand::Show => {
            let settings = Settings::load_or_default(config)?;
            if !config.exists() {
                println!("# {} not found, showing defaults", config.display());
            }
            print!("{}", settings.to_toml()?);
        }
        SettingsCommand::Path => println!("{}", config.display()),
        SettingsCommand::Init { force } => {
            if config.exists() && !force {
                anyhow::bail!(
                    "{} already exists (use --force to overwrite)",
                    config.display()
                );
            }
            Settings::default().save(config)?;
            println!("Wrote {}", config.display());
        }
    }
    Ok(())
}
