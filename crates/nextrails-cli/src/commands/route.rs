//! Implementation of the `nextrails route` command.

use std::path::Path;

use serde::Serialize;
use tracing::{debug, instrument};

use nextrails_core::{
    application::RouteOutcome,
    domain::{AnchorPolicy, Behavior, RouteRequest},
};

use crate::{
    cli::RouteArgs,
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

/// JSON shape: the outcome, plus the new file text for dry runs.
#[derive(Serialize)]
struct RouteReport<'a> {
    #[serde(flatten)]
    outcome: &'a RouteOutcome,
    #[serde(skip_serializing_if = "Option::is_none")]
    content: Option<&'a str>,
}

/// Execute the `nextrails route` command.
#[instrument(skip_all, fields(entry = %args.entry, revoke = args.revoke))]
pub fn execute(args: RouteArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let request = build_request(&args)?;
    let file = args.file.clone().unwrap_or_else(|| config.routes.file.clone());
    let policy: AnchorPolicy = args
        .anchor
        .map(Into::into)
        .unwrap_or(config.routes.ambiguous_anchor);
    let behavior = if args.revoke {
        Behavior::Revoke
    } else {
        Behavior::Invoke
    };
    debug!(file = %file.display(), ?policy, "Route request built");

    let outcome = super::route_service(policy).apply(&file, &request, behavior, args.dry_run)?;

    if output.is_json() {
        output.json(&RouteReport {
            outcome: &outcome,
            content: args.dry_run.then_some(outcome.content.as_str()),
        })?;
        return Ok(());
    }

    if args.dry_run {
        output.info(&format!(
            "Dry run: {} would become",
            display_path(&outcome.file)
        ))?;
        output.raw(&outcome.content)?;
        return Ok(());
    }

    let verb = match outcome.behavior {
        Behavior::Invoke => "Added",
        Behavior::Revoke => "Removed",
    };
    output.success(&format!(
        "{verb} `{}` under {} in {}",
        outcome.entry,
        outcome.wrappers,
        display_path(&outcome.file)
    ))?;
    Ok(())
}

/// Scopes always wrap namespaces, each kept in the order given.
fn build_request(args: &RouteArgs) -> CliResult<RouteRequest> {
    let mut request = RouteRequest::new(&args.entry)?;
    for scope in &args.scopes {
        request = request.scope(scope);
    }
    for namespace in &args.namespaces {
        request = request.namespace(namespace);
    }
    Ok(request)
}

fn display_path(path: &Path) -> String {
    path.display().to_string()
}
