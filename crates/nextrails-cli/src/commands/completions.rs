//! Shell completion generation.

use std::io::Write;

use clap::CommandFactory;
use clap_complete::{Generator, generate, shells};

use crate::cli::{Cli, CompletionsArgs, Shell};
use crate::error::CliResult;

const BIN_NAME: &str = "nextrails";

pub fn execute(args: CompletionsArgs) -> CliResult<()> {
    write_completions(args.shell, &mut std::io::stdout())
}

fn write_completions(shell: Shell, out: &mut dyn Write) -> CliResult<()> {
    match shell {
        Shell::Bash => emit(shells::Bash, out),
        Shell::Zsh => emit(shells::Zsh, out),
        Shell::Fish => emit(shells::Fish, out),
        Shell::PowerShell => emit(shells::PowerShell, out),
        Shell::Elvish => emit(shells::Elvish, out),
    }
    out.flush()?;
    Ok(())
}

fn emit(shell: impl Generator, out: &mut dyn Write) {
    let mut cmd = Cli::command();
    generate(shell, &mut cmd, BIN_NAME, out);
}
