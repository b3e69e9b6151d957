//! Flags accepted before or after any subcommand.

use clap::Args;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct GlobalArgs {
    /// Run as if started in DIR (like `git -C`).
    ///
    /// Relative routes files, `.nextrails.toml` and scaffold roots all
    /// resolve against this directory.
    #[arg(
        short = 'C',
        long = "directory",
        global = true,
        value_name = "DIR",
        help = "Run as if started in DIR"
    )]
    pub directory: Option<PathBuf>,

    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        global = true,
        help = "Increase verbosity (-v, -vv, -vvv)",
        long_help = "Increase logging verbosity:
    (none)  - Warnings and errors
    -v      - Info level (each scaffold step)
    -vv     - Debug level (route resolution decisions)
    -vvv    - Trace level (block scanning)"
    )]
    pub verbose: u8,

    #[arg(
        short = 'q',
        long = "quiet",
        global = true,
        conflicts_with = "verbose",
        help = "Suppress non-error output"
    )]
    pub quiet: bool,

    /// Honours `NO_COLOR` (<https://no-color.org>).
    #[arg(
        long = "no-color",
        global = true,
        env = "NO_COLOR",
        help = "Disable colored output"
    )]
    pub no_color: bool,

    /// Extra config file layered above the user config.
    #[arg(
        short = 'c',
        long = "config",
        global = true,
        value_name = "FILE",
        help = "Configuration file path"
    )]
    pub config: Option<PathBuf>,

    #[arg(
        long = "output-format",
        global = true,
        value_enum,
        default_value = "auto",
        help = "Output format"
    )]
    pub output_format: OutputFormat,
}

impl GlobalArgs {
    /// Tracing level for the workspace crates. `--quiet` beats `-v`.
    pub fn log_level(&self) -> &'static str {
        if self.quiet {
            return "error";
        }
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human when stdout is a terminal, plain otherwise.
    #[default]
    Auto,
    Human,
    Plain,
    /// One JSON document per command on stdout.
    Json,
}
