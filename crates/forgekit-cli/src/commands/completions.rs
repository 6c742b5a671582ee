//! Implementation of the `forgekit completions` command.

use clap::CommandFactory;
use clap_complete::generate;

use crate::{
    cli::{Cli, CompletionsArgs, Shell},
    error::CliResult,
};

/// Generate a completion script for the requested shell on stdout.
pub fn execute(args: CompletionsArgs) -> CliResult<()> {
    let mut cmd = Cli::command();
    let shell = match args.shell {
        Shell::Bash => clap_complete::Shell::Bash,
        Shell::Zsh => clap_complete::Shell::Zsh,
        Shell::Fish => clap_complete::Shell::Fish,
        Shell::PowerShell => clap_complete::Shell::PowerShell,
        Shell::Elvish => clap_complete::Shell::Elvish,
    };
    generate(shell, &mut cmd, "forgekit", &mut std::io::stdout());
    Ok(())
}
