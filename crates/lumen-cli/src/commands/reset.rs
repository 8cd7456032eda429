//! Session reset command.

use clap::Args;

use lumen_session::{Session, SessionOptions};

use crate::commands::confirm;

#[derive(Args)]
pub struct ResetArgs {
    /// Skip the confirmation prompt
    #[arg(long)]
    yes: bool,
}

pub fn run(args: ResetArgs) -> anyhow::Result<()> {
    if !args.yes
        && !confirm("Reset all session state (settings, mappings, sidechain links) to defaults?")
    {
        println!("Aborted.");
        return Ok(());
    }

    let mut session = Session::new(SessionOptions::default());
    session.reset();
    println!("Session state reset to defaults. Preset files were kept.");
    Ok(())
}
