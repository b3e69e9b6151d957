//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use nextrails_core::domain::{AnchorPolicy, PackageManager};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "nextrails",
    bin_name = "nextrails",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Rails API routes and Next.js scaffolds, kept in step",
    long_about = "NextRails edits config/routes.rb structurally, nesting routes \
                  inside namespace and scope blocks, and drives the Next.js \
                  toolchain to scaffold a matching frontend.",
    after_help = "EXAMPLES:\n\
        \x20 nextrails route 'resources :users' -n admin\n\
        \x20 nextrails route 'resources :users' -n admin --revoke\n\
        \x20 nextrails scaffold admin/product title:string price:decimal\n\
        \x20 nextrails completions bash > /usr/share/bash-completion/completions/nextrails",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Add or remove a route inside namespace/scope blocks.
    #[command(
        visible_alias = "r",
        about = "Add or remove a route in config/routes.rb",
        after_help = "EXAMPLES:\n\
            \x20 nextrails route 'resources :users' --namespace admin\n\
            \x20 nextrails route 'resources :products' -s /api -n admin -n users\n\
            \x20 nextrails route 'resources :users' -n admin --revoke --dry-run"
    )]
    Route(RouteArgs),

    /// Scaffold a resource: API route plus Next.js frontend.
    #[command(
        visible_alias = "g",
        about = "Scaffold a resource route and its Next.js frontend",
        after_help = "EXAMPLES:\n\
            \x20 nextrails scaffold product title:string price:decimal\n\
            \x20 nextrails scaffold admin/users/product --package-manager pnpm --yes\n\
            \x20 nextrails scaffold admin/product --revoke"
    )]
    Scaffold(ScaffoldArgs),

    /// Write the generator initializer into the Rails app.
    #[command(
        about = "Install the NextRails initializer",
        after_help = "EXAMPLES:\n\
            \x20 nextrails install\n\
            \x20 nextrails install --force"
    )]
    Install(InstallArgs),

    /// Initialise a NextRails configuration file.
    #[command(
        about = "Initialise configuration",
        after_help = "EXAMPLES:\n\
            \x20 nextrails init           # user config directory\n\
            \x20 nextrails init --local   # .nextrails.toml in CWD"
    )]
    Init(InitArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 nextrails completions bash > ~/.local/share/bash-completion/completions/nextrails\n\
            \x20 nextrails completions zsh  > ~/.zfunc/_nextrails\n\
            \x20 nextrails completions fish > ~/.config/fish/completions/nextrails.fish"
    )]
    Completions(CompletionsArgs),

    /// Inspect the NextRails configuration.
    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 nextrails config get routes.file\n\
            \x20 nextrails config list\n\
            \x20 nextrails config path"
    )]
    Config(ConfigCommands),
}

// ── route ─────────────────────────────────────────────────────────────────────

/// Arguments for `nextrails route`.
#[derive(Debug, Args)]
pub struct RouteArgs {
    /// Route code to add, e.g. `resources :users`.
    #[arg(value_name = "ENTRY", help = "Route code, e.g. \"resources :users\"")]
    pub entry: String,

    /// Namespaces, outermost first.
    #[arg(
        short = 'n',
        long = "namespace",
        value_name = "NAME",
        help = "Wrap in `namespace :NAME do` (repeatable, outermost first)"
    )]
    pub namespaces: Vec<String>,

    /// Scopes, outermost first. Scopes always wrap namespaces.
    #[arg(
        short = 's',
        long = "scope",
        value_name = "PATH",
        help = "Wrap in `scope 'PATH' do` (repeatable, outside namespaces)"
    )]
    pub scopes: Vec<String>,

    /// Routes file to edit.
    #[arg(
        short = 'f',
        long = "file",
        value_name = "PATH",
        help = "Routes file (default: config/routes.rb)"
    )]
    pub file: Option<PathBuf>,

    /// Remove the route instead of adding it.
    #[arg(long = "revoke", help = "Remove the route and collapse emptied blocks")]
    pub revoke: bool,

    /// What to do when two sibling blocks match one wrapper.
    #[arg(long = "anchor", value_enum, value_name = "POLICY", help = "Duplicate block policy")]
    pub anchor: Option<AnchorArg>,

    /// Print the resulting file instead of writing it.
    #[arg(long = "dry-run", help = "Print the result without writing")]
    pub dry_run: bool,
}

// ── scaffold ──────────────────────────────────────────────────────────────────

/// Arguments for `nextrails scaffold`.
#[derive(Debug, Args)]
pub struct ScaffoldArgs {
    /// Resource name, optionally namespaced (`admin/users/product`).
    #[arg(value_name = "NAME", help = "Resource name, e.g. admin/product")]
    pub name: String,

    /// Attributes handed to the frontend generator.
    #[arg(value_name = "FIELD:TYPE", help = "Attributes, e.g. title:string")]
    pub attributes: Vec<String>,

    /// Package manager for the frontend project.
    #[arg(
        short = 'p',
        long = "package-manager",
        value_enum,
        value_name = "PM",
        help = "Package manager for the frontend project"
    )]
    pub package_manager: Option<PackageManagerArg>,

    /// Scope wrapped around the resource route.
    #[arg(
        long = "scope",
        value_name = "PATH",
        conflicts_with = "no_scope",
        help = "Route scope (default: /api)"
    )]
    pub scope: Option<String>,

    /// Register the route without any scope.
    #[arg(long = "no-scope", help = "Do not wrap the route in a scope")]
    pub no_scope: bool,

    #[arg(long = "skip-build", help = "Skip running the Next.js build")]
    pub skip_build: bool,

    #[arg(long = "skip-routes", help = "Skip adding resources to routes.rb")]
    pub skip_routes: bool,

    #[arg(long = "no-typescript", help = "Generate a JavaScript scaffold")]
    pub no_typescript: bool,

    /// Remove the route again. The frontend is left alone.
    #[arg(long = "revoke", help = "Remove the resource route")]
    pub revoke: bool,

    /// Rails application root.
    #[arg(long = "root", value_name = "DIR", help = "Rails app root (default: .)")]
    pub root: Option<PathBuf>,

    /// Skip prompts; build without asking.
    #[arg(short = 'y', long = "yes", help = "Skip confirmation prompts")]
    pub yes: bool,

    /// Show the plan without touching anything.
    #[arg(long = "dry-run", help = "Show planned steps and commands without running them")]
    pub dry_run: bool,
}

// ── install ───────────────────────────────────────────────────────────────────

/// Arguments for `nextrails install`.
#[derive(Debug, Args)]
pub struct InstallArgs {
    /// Overwrite an existing initializer.
    #[arg(short = 'f', long = "force", help = "Overwrite existing initializer")]
    pub force: bool,

    /// Rails application root.
    #[arg(long = "root", value_name = "DIR", help = "Rails app root (default: .)")]
    pub root: Option<PathBuf>,

    #[arg(long = "dry-run", help = "Report without writing")]
    pub dry_run: bool,
}

// ── init ──────────────────────────────────────────────────────────────────────

/// Arguments for `nextrails init`.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Write to `.nextrails.toml` in the current directory.
    #[arg(
        long = "local",
        help = "Create local configuration in current directory"
    )]
    pub local: bool,

    /// Overwrite an existing config file.
    #[arg(short = 'f', long = "force", help = "Overwrite existing configuration")]
    pub force: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `nextrails completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

/// Subcommands for `nextrails config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `frontend.next_version`.
        key: String,
    },
    /// Print all configuration values.
    List,
    /// Print the path to the active configuration file.
    Path,
}

// ── value enums ───────────────────────────────────────────────────────────────

/// Node package managers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum PackageManagerArg {
    Npm,
    Yarn,
    Pnpm,
    Bun,
}

impl From<PackageManagerArg> for PackageManager {
    fn from(arg: PackageManagerArg) -> Self {
        match arg {
            PackageManagerArg::Npm => Self::Npm,
            PackageManagerArg::Yarn => Self::Yarn,
            PackageManagerArg::Pnpm => Self::Pnpm,
            PackageManagerArg::Bun => Self::Bun,
        }
    }
}

/// Duplicate sibling block handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum AnchorArg {
    /// Use the first matching block.
    First,
    /// Refuse to edit.
    Reject,
}

impl From<AnchorArg> for AnchorPolicy {
    fn from(arg: AnchorArg) -> Self {
        match arg {
            AnchorArg::First => Self::First,
            AnchorArg::Reject => Self::Reject,
        }
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────
