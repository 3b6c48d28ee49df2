//! cli::completion
//!
//! Shell completion scripts.

use std::io::Write;

use anyhow::{Context, Result};
use clap::CommandFactory;
use clap_complete::{generate, shells};

use super::args::{Cli, Shell};

/// Write the completion script for `shell`.
pub fn write_completion(shell: Shell, out: &mut dyn Write) -> Result<()> {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();

    match shell {
        Shell::Bash => generate(shells::Bash, &mut cmd, &name, out),
        Shell::Zsh => generate(shells::Zsh, &mut cmd, &name, out),
        Shell::Fish => generate(shells::Fish, &mut cmd, &name, out),
        Shell::PowerShell => generate(shells::PowerShell, &mut cmd, &name, out),
    }

    out.flush().context("failed to write completion script")
}
