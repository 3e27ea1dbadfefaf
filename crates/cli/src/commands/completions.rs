//! # CLI Completions Command

use clap::Command;
use clap_complete::Shell;
use error::Result;

/// Writes completions for `shell` to stdout.
pub fn completions(shell: Shell, cmd: &mut Command) -> Result<()> {
    clap_complete::generate(shell, cmd, "campus", &mut std::io::stdout());
    Ok(())
}
