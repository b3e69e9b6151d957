//! # NextRails CLI
//!
//! Edits `config/routes.rb` structurally and scaffolds the matching Next.js
//! frontend.
//!
//! Startup: parse arguments, install the tracing subscriber, enter
//! `--directory`, load layered configuration, then dispatch. Every failure
//! after parsing goes through [`CliError`] so it gets suggestions and a
//! stable exit code.
//!
//! | Code | Meaning                                     |
//! |------|---------------------------------------------|
//! |  0   | Success                                     |
//! |  1   | Internal error or broken toolchain          |
//! |  2   | Bad input or malformed routes file          |
//! |  3   | Routes file, directory or route not found   |
//! |  4   | Configuration error                         |

use std::io::IsTerminal as _;
use std::path::Path;
use std::process::ExitCode;

use clap::Parser;
use tracing::{debug, info, instrument};

use crate::{
    cli::{Cli, Commands},
    config::AppConfig,
    error::{CliError, CliResult},
    logging::init_logging,
    output::OutputManager,
};

mod cli;
mod commands;
mod config;
mod error;
mod logging;
mod output;

fn main() -> ExitCode {
    // A missing .env is fine.
    let _ = dotenvy::dotenv();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // --help and --version arrive here too and exit 0.
            let _ = e.print();
            return ExitCode::from(u8::try_from(e.exit_code()).unwrap_or(2));
        }
    };

    if let Err(e) = init_logging(&cli.global) {
        eprintln!("Failed to initialise logging: {e}");
        return ExitCode::from(1);
    }

    debug!(
        verbose = cli.global.verbose,
        quiet = cli.global.quiet,
        output_format = ?cli.global.output_format,
        "CLI started"
    );

    let verbose = cli.global.verbose > 0;
    match start(cli) {
        Ok(()) => {
            info!("NextRails completed successfully");
            ExitCode::SUCCESS
        }
        Err(e) => handle_error(e, verbose),
    }
}

/// Everything after logging is up: working directory, config, dispatch.
fn start(cli: Cli) -> CliResult<()> {
    if let Some(dir) = &cli.global.directory {
        enter_directory(dir)?;
    }

    let config = AppConfig::load(cli.global.config.as_ref()).map_err(|e| CliError::ConfigError {
        message: format!("failed to load configuration: {e:#}"),
        source: Some(e.into()),
    })?;
    let output = OutputManager::new(&cli.global, &config);

    run(cli, config, output)
}

fn enter_directory(dir: &Path) -> CliResult<()> {
    std::env::set_current_dir(dir).map_err(|source| CliError::DirectoryNotFound {
        path: dir.to_path_buf(),
        source,
    })?;
    debug!(directory = %dir.display(), "Changed working directory");
    Ok(())
}

#[instrument(skip_all)]
fn run(cli: Cli, config: AppConfig, output: OutputManager) -> CliResult<()> {
    match cli.command {
        Commands::Route(cmd) => commands::route::execute(cmd, config, output),
        Commands::Scaffold(cmd) => commands::scaffold::execute(cmd, cli.global, config, output),
        Commands::Install(cmd) => commands::install::execute(cmd, config, output),
        Commands::Init(cmd) => commands::init::execute(cmd, config, output),
        Commands::Completions(cmd) => commands::completions::execute(cmd),
        Commands::Config(cmd) => commands::config::execute(cmd, config, output),
    }
}

/// Log, print to stderr (coloured only on a TTY), and map to an exit code.
fn handle_error(err: CliError, verbose: bool) -> ExitCode {
    err.log();

    let msg = if std::io::stderr().is_terminal() {
        err.format_colored(verbose)
    } else {
        err.format_plain(verbose)
    };
    eprint!("{msg}");

    ExitCode::from(err.exit_code())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_structure_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn cli_version_matches_cargo() {
        let cmd = Cli::command();
        assert_eq!(cmd.get_version(), Some(env!("CARGO_PKG_VERSION")));
    }

    #[test]
    fn missing_directory_maps_to_not_found() {
        let err = enter_directory(Path::new("definitely/not/here")).unwrap_err();
        assert_eq!(err.exit_code(), 3);
    }
}
