//! Static shell completions
//!
//! Subcommands and flags only; identifiers are not completed.

use std::io;

use clap::CommandFactory;

use crate::cli::{Cli, Shell};

/// Write the completion script for `shell` to stdout.
pub fn run(shell: Shell) {
    let mut command = Cli::command();
    let name = command.get_name().to_string();
    clap_complete::generate(shell, &mut command, name, &mut io::stdout());
}
