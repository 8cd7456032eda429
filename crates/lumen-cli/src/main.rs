//! Lumen CLI - command-line interface for the lumen virtual studio rack.

mod commands;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "lumen")]
#[command(author, version, about = "Lumen virtual studio rack CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List rack plugins and their parameters
    Plugins(commands::plugins::PluginsArgs),

    /// Run a headless session and report visualizer activity
    Simulate(commands::simulate::SimulateArgs),

    /// List, show, or delete presets
    Preset(commands::preset::PresetArgs),

    /// Reset all persisted session state to defaults
    Reset(commands::reset::ResetArgs),
}

fn main() -> anyhow::Result<()> {
    use tracing_subscriber::EnvFilter;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Plugins(args) => commands::plugins::run(args),
        Commands::Simulate(args) => commands::simulate::run(args),
        Commands::Preset(args) => commands::preset::run(args),
        Commands::Reset(args) => commands::reset::run(args),
    }
}
