//! Preset management commands.

use clap::{Args, Subcommand};

use lumen_session::{PresetStore, paths};

use crate::commands::confirm;

#[derive(Args)]
pub struct PresetArgs {
    #[command(subcommand)]
    action: PresetAction,
}

#[derive(Subcommand)]
enum PresetAction {
    /// List stored presets
    List,

    /// Print a preset as TOML
    Show {
        /// Preset name
        name: String,
    },

    /// Delete a preset
    Delete {
        /// Preset name
        name: String,

        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

pub fn run(args: PresetArgs) -> anyhow::Result<()> {
    let store = PresetStore::new(paths::presets_dir(&paths::user_config_dir()));

    match args.action {
        PresetAction::List => {
            let names = store.list()?;
            if names.is_empty() {
                println!("No presets stored in {}", store.dir().display());
            } else {
                for name in names {
                    println!("{name}");
                }
            }
        }
        PresetAction::Show { name } => {
            let preset = store.load(&name)?;
            print!("{}", preset.to_toml()?);
        }
        PresetAction::Delete { name, yes } => {
            if !yes && !confirm(&format!("Delete preset '{name}'?")) {
                println!("Aborted.");
                return Ok(());
            }
            store.delete(&name)?;
            println!("Deleted preset '{name}'");
        }
    }
    Ok(())
}
