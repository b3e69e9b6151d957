//! `nextrails install`: write the generator initializer into a Rails app.

use std::path::PathBuf;

use tracing::instrument;

use nextrails_core::application::services::{INITIALIZER_PATH, InstallOutcome};

use crate::{cli::InstallArgs, config::AppConfig, error::CliResult, output::OutputManager};

#[instrument(skip_all, fields(force = args.force))]
pub fn execute(args: InstallArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let root = args.root.unwrap_or_else(|| PathBuf::from("."));
    let path = root.join(INITIALIZER_PATH);

    let outcome = super::scaffold_service(&config).install(&root, args.force, args.dry_run)?;

    let verb = match (outcome, args.dry_run) {
        (InstallOutcome::Unchanged, _) => {
            output.warning(&format!(
                "{} already exists (use --force to overwrite)",
                path.display()
            ))?;
            return Ok(());
        }
        (InstallOutcome::Created, false) => "Created",
        (InstallOutcome::Created, true) => "Would create",
        (InstallOutcome::Overwritten, false) => "Overwrote",
        (InstallOutcome::Overwritten, true) => "Would overwrite",
    };
    output.success(&format!("{verb} {}", path.display()))?;
    Ok(())
}
