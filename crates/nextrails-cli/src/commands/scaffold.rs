//! Implementation of the `nextrails scaffold` command.
//!
//! Responsibility: translate CLI arguments into `ScaffoldOptions`, settle the
//! package manager with the user when nothing else decides it, call the core
//! scaffold service, and display the report.

use std::path::{Path, PathBuf};

use console::Term;
use tracing::{info, instrument, warn};

use nextrails_core::{
    application::{ScaffoldOptions, ScaffoldReport, ScaffoldService},
    domain::{Attribute, Behavior, PackageManager, ResourceName},
};

use crate::{
    cli::{GlobalArgs, ScaffoldArgs},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Execute the `nextrails scaffold` command.
///
/// Dispatch sequence:
/// 1. Parse the resource name and attributes
/// 2. Merge flags with configuration into `ScaffoldOptions`
/// 3. Ask for a package manager if neither flag, config nor lock file names one
/// 4. Confirm with the user unless `--yes`, `--quiet` or `--dry-run`
/// 5. Run the scaffold behind a spinner and print the report
#[instrument(skip_all, fields(resource = %args.name, revoke = args.revoke))]
pub fn execute(
    args: ScaffoldArgs,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    // 1. Inputs
    let name = ResourceName::parse(&args.name)?;
    let attributes = args
        .attributes
        .iter()
        .map(|raw| Attribute::parse(raw))
        .collect::<Result<Vec<_>, _>>()?;

    // 2. Options
    let mut opts = build_options(&args, &config);
    if opts.behavior == Behavior::Invoke && !config.is_configured(&opts.root) {
        warn!(root = %opts.root.display(), "Project not installed");
        output.warning("NextRails is not installed in this project; run `nextrails install` first")?;
    }

    let service = super::scaffold_service(&config);
    let interactive = !args.yes && !global.quiet && !output.is_json() && Term::stderr().is_term();

    // 3. Package manager (revokes never reach the frontend)
    if opts.behavior == Behavior::Invoke {
        opts.package_manager = settle_package_manager(&service, &opts, interactive)?;
    }

    // 4. Confirm
    if interactive && !opts.dry_run && opts.behavior == Behavior::Invoke {
        show_plan(&name, &attributes, &opts, &output)?;
        if !confirm()? {
            return Err(CliError::Cancelled);
        }
    }

    // 5. Run
    let spinner = output.spinner(format!("Scaffolding {name}..."));
    let result = service.scaffold(&name, &attributes, &opts);
    spinner.finish_and_clear();
    let report = result?;
    info!(steps = report.steps.len(), "Scaffold finished");

    print_report(&report, &output)
}

/// Flags win over config; config wins over built-in defaults.
fn build_options(args: &ScaffoldArgs, config: &AppConfig) -> ScaffoldOptions {
    let scope = if args.no_scope {
        None
    } else {
        args.scope.clone().or_else(|| config.scaffold_scope())
    };

    ScaffoldOptions {
        root: args.root.clone().unwrap_or_else(|| PathBuf::from(".")),
        routes_file: config.routes.file.clone(),
        frontend_dir: config.frontend.directory.clone(),
        scope,
        package_manager: args
            .package_manager
            .map(Into::into)
            .or(config.frontend.package_manager),
        typescript: config.frontend.typescript && !args.no_typescript,
        skip_routes: args.skip_routes,
        skip_build: args.skip_build,
        behavior: if args.revoke {
            Behavior::Revoke
        } else {
            Behavior::Invoke
        },
        dry_run: args.dry_run,
        next_version: config.frontend.next_version.clone(),
        node_requirement: config.frontend.node_required_version.clone(),
    }
}

/// Keep the resolved choice, or ask among the managers that are installed.
///
/// Returning `None` lets the service report `PackageManagerUnresolved`.
fn settle_package_manager(
    service: &ScaffoldService,
    opts: &ScaffoldOptions,
    interactive: bool,
) -> CliResult<Option<PackageManager>> {
    if let Some((pm, _)) = service.resolve_package_manager(opts) {
        return Ok(Some(pm));
    }
    if !interactive {
        return Ok(None);
    }

    let available = service.versions().available_package_managers()?;
    if available.is_empty() {
        return Ok(None);
    }
    prompt_package_manager(&available).map(Some)
}

#[cfg(feature = "interactive")]
fn prompt_package_manager(available: &[PackageManager]) -> CliResult<PackageManager> {
    use dialoguer::Select;

    let items: Vec<&str> = available.iter().map(PackageManager::as_str).collect();
    let index = Select::new()
        .with_prompt("Which package manager should the frontend use?")
        .items(&items)
        .default(0)
        .interact()?;
    Ok(available[index])
}

#[cfg(not(feature = "interactive"))]
fn prompt_package_manager(_available: &[PackageManager]) -> CliResult<PackageManager> {
    Err(CliError::FeatureNotAvailable {
        feature: "interactive",
    })
}

#[cfg(feature = "interactive")]
fn confirm() -> CliResult<bool> {
    use dialoguer::Confirm;

    Ok(Confirm::new()
        .with_prompt("Proceed with the scaffold?")
        .default(true)
        .interact()?)
}

#[cfg(not(feature = "interactive"))]
fn confirm() -> CliResult<bool> {
    Ok(true)
}

fn show_plan(
    name: &ResourceName,
    attributes: &[Attribute],
    opts: &ScaffoldOptions,
    output: &OutputManager,
) -> CliResult<()> {
    output.header(&format!("Scaffold '{name}'"))?;
    output.print(&format!("  Route:    resources :{}", name.plural_name()))?;
    if let Some(scope) = &opts.scope {
        output.print(&format!("  Scope:    {scope}"))?;
    }
    output.print(&format!("  Frontend: {}", display(&opts.frontend())))?;
    if let Some(pm) = opts.package_manager {
        output.print(&format!("  Using:    {pm}"))?;
    }
    if !attributes.is_empty() {
        let fields: Vec<String> = attributes.iter().map(ToString::to_string).collect();
        output.print(&format!("  Fields:   {}", fields.join(" ")))?;
    }
    Ok(())
}

fn print_report(report: &ScaffoldReport, output: &OutputManager) -> CliResult<()> {
    if output.is_json() {
        output.json(report)?;
        return Ok(());
    }

    for step in &report.steps {
        output.success(&step.to_string())?;
    }

    if report.dry_run {
        output.header("Dry run, nothing was changed. Planned commands:")?;
        for command in &report.commands {
            output.print(&format!("  {command}"))?;
        }
    } else if !report.commands.is_empty() {
        output.info(&format!("Ran {} command(s)", report.commands.len()))?;
    }
    Ok(())
}

fn display(path: &Path) -> String {
    path.display().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    use crate::cli::{Cli, Commands};

    fn scaffold_args(argv: &[&str]) -> ScaffoldArgs {
        let mut full = vec!["nextrails", "scaffold"];
        full.extend_from_slice(argv);
        match Cli::parse_from(full).command {
            Commands::Scaffold(args) => args,
            other => panic!("expected Scaffold, got {other:?}"),
        }
    }

    #[test]
    fn config_fills_unset_flags() {
        let mut config = AppConfig::default();
        config.frontend.package_manager = Some(PackageManager::Bun);
        config.frontend.directory = PathBuf::from("web");

        let opts = build_options(&scaffold_args(&["product"]), &config);
        assert_eq!(opts.package_manager, Some(PackageManager::Bun));
        assert_eq!(opts.frontend(), PathBuf::from("./web"));
        assert_eq!(opts.scope.as_deref(), Some("/api"));
        assert!(opts.typescript);
    }

    #[test]
    fn flags_override_config() {
        let mut config = AppConfig::default();
        config.frontend.package_manager = Some(PackageManager::Bun);

        let opts = build_options(
            &scaffold_args(&["product", "-p", "yarn", "--no-typescript", "--scope", "/v1"]),
            &config,
        );
        assert_eq!(opts.package_manager, Some(PackageManager::Yarn));
        assert!(!opts.typescript);
        assert_eq!(opts.scope.as_deref(), Some("/v1"));
    }

    #[test]
    fn no_scope_drops_the_default() {
        let opts = build_options(&scaffold_args(&["product", "--no-scope"]), &AppConfig::default());
        assert_eq!(opts.scope, None);
    }

    #[test]
    fn revoke_flag_sets_behavior() {
        let opts = build_options(&scaffold_args(&["product", "--revoke"]), &AppConfig::default());
        assert_eq!(opts.behavior, Behavior::Revoke);
    }
}
