//! CLI subcommand implementations.

pub mod plugins;
pub mod preset;
pub mod reset;
pub mod simulate;

use std::io::Write;

/// Ask the user a yes/no question on the terminal.
///
/// Anything other than an explicit `y`/`yes` declines; a declined
/// confirmation aborts the operation with no state change.
pub fn confirm(prompt: &str) -> bool {
    print!("{prompt} [y/N] ");
    if std::io::stdout().flush().is_err() {
        return false;
    }
    let mut answer = String::new();
    if std::io::stdin().read_line(&mut answer).is_err() {
        return false;
    }
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}
