//! Scaffold Service - main application orchestrator.
//!
//! This service coordinates the whole scaffold workflow:
//! 1. Register (or remove) the resource route in `config/routes.rb`
//! 2. Prepare the `frontend/` Next.js project with the node toolchain
//! 3. Run the hygen scaffold generator for the resource
//!
//! Revoking only touches the routes; the frontend is never removed.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{info, instrument, warn};

use crate::{
    application::{
        ApplicationError,
        ports::{CommandRunner, CommandSpec, Filesystem},
        services::{RouteService, VersionCache, route_service::DEFAULT_ROUTES_FILE},
    },
    domain::{Attribute, Behavior, PackageManager, ResourceName, VersionRequirement},
    error::{NextRailsError, NextRailsResult},
};

pub const DEFAULT_NEXT_VERSION: &str = "15.1.6";
pub const DEFAULT_NODE_REQUIREMENT: &str = ">= 18.20";
pub const DEFAULT_API_SCOPE: &str = "/api";
pub const INITIALIZER_PATH: &str = "config/initializers/next_rails_scaffold.rb";

const HYGEN_ADD: &str = "hygen-add@https://github.com/raphox/hygen-add";
const HYGEN_GENERATOR: &str = "next-rails-scaffold";
const GITIGNORE_BLOCK: &str =
    "\n# Ignoring node modules for Rails and Next.js projects\nnode_modules/\n";
const INITIALIZER: &str = "\
# frozen_string_literal: true

NextRailsScaffold.setup do |config|
  config.generators do |g|
    g.api_only = true
    g.resource_route false
    g.helper :next_rails_scaffold
  end
end
";

/// Knobs for one scaffold run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScaffoldOptions {
    /// Rails application root; every other path is relative to it.
    pub root: PathBuf,
    pub routes_file: PathBuf,
    pub frontend_dir: PathBuf,
    /// Scope wrapped around the resource route, outermost.
    pub scope: Option<String>,
    pub package_manager: Option<PackageManager>,
    pub typescript: bool,
    pub skip_routes: bool,
    pub skip_build: bool,
    pub behavior: Behavior,
    pub dry_run: bool,
    pub next_version: String,
    pub node_requirement: String,
}

impl Default for ScaffoldOptions {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            routes_file: PathBuf::from(DEFAULT_ROUTES_FILE),
            frontend_dir: PathBuf::from("frontend"),
            scope: Some(DEFAULT_API_SCOPE.to_string()),
            package_manager: None,
            typescript: true,
            skip_routes: false,
            skip_build: false,
            behavior: Behavior::Invoke,
            dry_run: false,
            next_version: DEFAULT_NEXT_VERSION.to_string(),
            node_requirement: DEFAULT_NODE_REQUIREMENT.to_string(),
        }
    }
}

impl ScaffoldOptions {
    pub fn frontend(&self) -> PathBuf {
        self.root.join(&self.frontend_dir)
    }
}

/// How the package manager was chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Selection {
    Explicit,
    LockFile,
}

/// One thing the scaffold did (or, in a dry run, would do).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "step", rename_all = "snake_case")]
pub enum ScaffoldStep {
    RoutesUpdated { behavior: Behavior, wrappers: String },
    RoutesSkipped,
    RouteAbsent,
    FrontendSkipped,
    GitignoreUpdated,
    FrontendCreated { path: PathBuf },
    NodeChecked { version: String },
    PackageManagerSelected { manager: PackageManager, via: Selection },
    NextAppCreated,
    NextAppPresent,
    NodeLinkerConfigured,
    HygenInstalled,
    HygenPresent,
    Generated { language: &'static str },
    Built,
    BuildSkipped,
}

impl fmt::Display for ScaffoldStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RoutesUpdated { behavior, wrappers } => {
                write!(f, "routes {behavior}d under {wrappers}")
            }
            Self::RoutesSkipped => f.write_str("routes skipped"),
            Self::RouteAbsent => f.write_str("route already absent"),
            Self::FrontendSkipped => f.write_str("frontend left in place"),
            Self::GitignoreUpdated => f.write_str(".gitignore now ignores node_modules/"),
            Self::FrontendCreated { path } => write!(f, "created {}", path.display()),
            Self::NodeChecked { version } => write!(f, "node {version}"),
            Self::PackageManagerSelected { manager, via } => match via {
                Selection::Explicit => write!(f, "using {manager}"),
                Selection::LockFile => write!(f, "using {manager} (found {})", manager.lock_file()),
            },
            Self::NextAppCreated => f.write_str("created Next.js app"),
            Self::NextAppPresent => f.write_str("Next.js app already present"),
            Self::NodeLinkerConfigured => f.write_str("yarn nodeLinker set to node-modules"),
            Self::HygenInstalled => f.write_str("installed hygen templates"),
            Self::HygenPresent => f.write_str("hygen templates already present"),
            Self::Generated { language } => write!(f, "generated {language} scaffold"),
            Self::Built => f.write_str("built Next.js app"),
            Self::BuildSkipped => f.write_str("build skipped"),
        }
    }
}

/// What a scaffold run did, in order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScaffoldReport {
    pub steps: Vec<ScaffoldStep>,
    /// Commands run, or planned when `dry_run` is set.
    pub commands: Vec<String>,
    pub dry_run: bool,
}

impl ScaffoldReport {
    fn step(&mut self, step: ScaffoldStep) {
        info!(%step, "Scaffold step");
        self.steps.push(step);
    }
}

/// Whether `install` wrote the initializer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InstallOutcome {
    Created,
    Overwritten,
    Unchanged,
}

/// Main scaffolding service.
pub struct ScaffoldService {
    routes: RouteService,
    filesystem: Box<dyn Filesystem>,
    runner: Box<dyn CommandRunner>,
    versions: VersionCache,
}

impl ScaffoldService {
    pub fn new(
        routes: RouteService,
        filesystem: Box<dyn Filesystem>,
        runner: Box<dyn CommandRunner>,
        versions: VersionCache,
    ) -> Self {
        Self {
            routes,
            filesystem,
            runner,
            versions,
        }
    }

    pub fn versions(&self) -> &VersionCache {
        &self.versions
    }

    /// Scaffold (or revoke) a resource.
    #[instrument(
        skip_all,
        fields(
            resource = %name,
            behavior = %opts.behavior,
            dry_run = opts.dry_run,
        )
    )]
    pub fn scaffold(
        &self,
        name: &ResourceName,
        attributes: &[Attribute],
        opts: &ScaffoldOptions,
    ) -> NextRailsResult<ScaffoldReport> {
        let mut report = ScaffoldReport {
            dry_run: opts.dry_run,
            ..ScaffoldReport::default()
        };

        // 1. Routes
        self.update_routes(name, opts, &mut report)?;

        // 2. Revoke stops here
        if opts.behavior == Behavior::Revoke {
            report.step(ScaffoldStep::FrontendSkipped);
            return Ok(report);
        }

        // 3. Ignore node_modules
        self.append_gitignore(opts, &mut report)?;

        // 4. Frontend project
        let frontend = opts.frontend();
        if !self.filesystem.exists(&frontend) {
            if !opts.dry_run {
                self.filesystem.create_dir_all(&frontend)?;
            }
            report.step(ScaffoldStep::FrontendCreated {
                path: frontend.clone(),
            });
        }

        let requirement = VersionRequirement::parse(&opts.node_requirement)?;
        let version = self.versions.require("node", &requirement)?;
        report.step(ScaffoldStep::NodeChecked { version });

        let (pm, via) = self
            .resolve_package_manager(opts)
            .ok_or(ApplicationError::PackageManagerUnresolved)?;
        report.step(ScaffoldStep::PackageManagerSelected { manager: pm, via });

        let created = self.create_next_app(pm, opts, &frontend, &mut report)?;
        self.install_hygen(pm, opts, &frontend, &mut report)?;

        // 5. Generate
        let language = if (created && opts.typescript)
            || self.filesystem.exists(&frontend.join("tsconfig.json"))
        {
            "typescript"
        } else {
            "javascript"
        };
        let generate = prefixed(pm.fetch())?
            .args(["hygen", "scaffold", language])
            .arg(name.to_string())
            .args(attributes.iter().map(ToString::to_string));
        self.run(generate.current_dir(&frontend), opts.dry_run, &mut report)?;
        report.step(ScaffoldStep::Generated { language });

        // 6. Build
        if opts.skip_build {
            report.step(ScaffoldStep::BuildSkipped);
        } else {
            let build = prefixed(pm.run())?.arg("build");
            self.run(build.current_dir(&frontend), opts.dry_run, &mut report)?;
            report.step(ScaffoldStep::Built);
        }

        info!("Scaffold completed successfully");
        Ok(report)
    }

    /// Write the generator initializer into the Rails app.
    #[instrument(skip_all, fields(root = %root.display(), force))]
    pub fn install(&self, root: &Path, force: bool, dry_run: bool) -> NextRailsResult<InstallOutcome> {
        let path = root.join(INITIALIZER_PATH);
        let existed = self.filesystem.exists(&path);
        if existed && !force {
            info!(path = %path.display(), "Initializer already present");
            return Ok(InstallOutcome::Unchanged);
        }

        if !dry_run {
            if let Some(parent) = path.parent() {
                self.filesystem.create_dir_all(parent)?;
            }
            self.filesystem.write_file(&path, INITIALIZER)?;
        }

        Ok(if existed {
            InstallOutcome::Overwritten
        } else {
            InstallOutcome::Created
        })
    }

    /// Explicit choice first, then the first lock file in the frontend.
    ///
    /// `None` means the caller has to ask (or give up).
    pub fn resolve_package_manager(
        &self,
        opts: &ScaffoldOptions,
    ) -> Option<(PackageManager, Selection)> {
        if let Some(pm) = opts.package_manager {
            return Some((pm, Selection::Explicit));
        }
        let frontend = opts.frontend();
        PackageManager::detect(|lock| self.filesystem.exists(&frontend.join(lock)))
            .map(|pm| (pm, Selection::LockFile))
    }

    // -------------------------------------------------------------------------
    // Internal Helpers
    // -------------------------------------------------------------------------

    fn update_routes(
        &self,
        name: &ResourceName,
        opts: &ScaffoldOptions,
        report: &mut ScaffoldReport,
    ) -> NextRailsResult<()> {
        if opts.skip_routes {
            report.step(ScaffoldStep::RoutesSkipped);
            return Ok(());
        }

        let request = name.resource_route(opts.scope.as_deref())?;
        let file = opts.root.join(&opts.routes_file);
        match self.routes.apply(&file, &request, opts.behavior, opts.dry_run) {
            Ok(outcome) => report.step(ScaffoldStep::RoutesUpdated {
                behavior: outcome.behavior,
                wrappers: outcome.wrappers,
            }),
            Err(e) if e.is_route_not_found() => {
                warn!(error = %e, "Nothing to revoke in routes file");
                report.step(ScaffoldStep::RouteAbsent);
            }
            Err(e) => return Err(e),
        }
        Ok(())
    }

    fn append_gitignore(&self, opts: &ScaffoldOptions, report: &mut ScaffoldReport) -> NextRailsResult<()> {
        let path = opts.root.join(".gitignore");
        if !self.filesystem.exists(&path) {
            return Ok(());
        }
        let current = self.filesystem.read_to_string(&path)?;
        if current.lines().any(|l| l.trim() == "node_modules/") {
            return Ok(());
        }
        if !opts.dry_run {
            self.filesystem.append(&path, GITIGNORE_BLOCK)?;
        }
        report.step(ScaffoldStep::GitignoreUpdated);
        Ok(())
    }

    /// Returns whether a new app was created.
    fn create_next_app(
        &self,
        pm: PackageManager,
        opts: &ScaffoldOptions,
        frontend: &Path,
        report: &mut ScaffoldReport,
    ) -> NextRailsResult<bool> {
        if self.filesystem.exists(&frontend.join("package.json")) {
            report.step(ScaffoldStep::NextAppPresent);
            return Ok(false);
        }

        let mut create = prefixed(pm.fetch())?
            .arg(format!("create-next-app@{}", opts.next_version))
            .arg(".")
            .arg(format!("--use-{pm}"))
            .args(["--no-app", "--src-dir", "--import-alias", "@/*"]);
        if opts.typescript {
            create = create.arg("--ts");
        }
        self.run(create.current_dir(frontend), opts.dry_run, report)?;
        report.step(ScaffoldStep::NextAppCreated);

        if pm == PackageManager::Yarn {
            let berry = VersionRequirement::parse(">= 2.0")?;
            let modern = self
                .versions
                .version(pm.binary())?
                .is_some_and(|v| berry.matches(&v));
            if modern {
                let linker = CommandSpec::new("yarn").args(["config", "set", "nodeLinker", "node-modules"]);
                self.run(linker.current_dir(frontend), opts.dry_run, report)?;
                report.step(ScaffoldStep::NodeLinkerConfigured);
            }
        }
        Ok(true)
    }

    fn install_hygen(
        &self,
        pm: PackageManager,
        opts: &ScaffoldOptions,
        frontend: &Path,
        report: &mut ScaffoldReport,
    ) -> NextRailsResult<()> {
        if self.filesystem.exists(&frontend.join("_templates")) {
            report.step(ScaffoldStep::HygenPresent);
            return Ok(());
        }

        let add = prefixed(pm.add())?.args(["-D", "hygen", HYGEN_ADD]);
        self.run(add.current_dir(frontend), opts.dry_run, report)?;

        let templates = prefixed(pm.fetch())?
            .args([HYGEN_ADD, HYGEN_GENERATOR, "--pm", pm.as_str()]);
        self.run(templates.current_dir(frontend), opts.dry_run, report)?;

        report.step(ScaffoldStep::HygenInstalled);
        Ok(())
    }

    fn run(&self, command: CommandSpec, dry_run: bool, report: &mut ScaffoldReport) -> NextRailsResult<()> {
        let rendered = command.to_string();
        report.commands.push(rendered.clone());
        if dry_run {
            info!(command = %rendered, "Dry run, command not executed");
            return Ok(());
        }

        info!(command = %rendered, "Running");
        let output = self.runner.run(&command)?;
        if !output.success() {
            return Err(ApplicationError::CommandFailed {
                command: rendered,
                status: output.status,
                stderr: output.stderr,
            }
            .into());
        }
        Ok(())
    }
}

fn prefixed(prefix: &[&str]) -> NextRailsResult<CommandSpec> {
    CommandSpec::from_prefix(prefix).ok_or_else(|| NextRailsError::Internal {
        message: "package manager command prefix is empty".into(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::{
        CommandOutput, MockCommandRunner, MockFilesystem, MockToolVersionProbe,
    };
    use crate::domain::RouteEngine;

    fn versions(node: &'static str) -> VersionCache {
        let mut probe = MockToolVersionProbe::new();
        probe.expect_version().returning(move |tool| {
            Ok(match tool {
                "node" => Some(node.to_string()),
                _ => None,
            })
        });
        VersionCache::new(Box::new(probe))
    }

    fn unused_routes() -> RouteService {
        RouteService::new(Box::new(MockFilesystem::new()), RouteEngine::default())
    }

    #[test]
    fn explicit_package_manager_beats_lock_file() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists().return_const(true);
        let service = ScaffoldService::new(
            unused_routes(),
            Box::new(fs),
            Box::new(MockCommandRunner::new()),
            versions("v20.0.0"),
        );
        let opts = ScaffoldOptions {
            package_manager: Some(PackageManager::Bun),
            ..ScaffoldOptions::default()
        };
        assert_eq!(
            service.resolve_package_manager(&opts),
            Some((PackageManager::Bun, Selection::Explicit))
        );
    }

    #[test]
    fn lock_file_is_looked_up_in_frontend() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists()
            .returning(|path| path == Path::new("./frontend/pnpm-lock.yaml"));
        let service = ScaffoldService::new(
            unused_routes(),
            Box::new(fs),
            Box::new(MockCommandRunner::new()),
            versions("v20.0.0"),
        );
        assert_eq!(
            service.resolve_package_manager(&ScaffoldOptions::default()),
            Some((PackageManager::Pnpm, Selection::LockFile))
        );
    }

    #[test]
    fn failing_command_aborts_with_stderr() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists().returning(|path| path.ends_with("frontend"));
        let mut runner = MockCommandRunner::new();
        runner.expect_run().times(1).returning(|_| {
            Ok(CommandOutput {
                status: 1,
                stdout: String::new(),
                stderr: "network down".into(),
            })
        });

        let service = ScaffoldService::new(unused_routes(), Box::new(fs), Box::new(runner), versions("v20.0.0"));
        let opts = ScaffoldOptions {
            skip_routes: true,
            package_manager: Some(PackageManager::Npm),
            ..ScaffoldOptions::default()
        };
        let name = ResourceName::parse("product").unwrap();
        let err = service.scaffold(&name, &[], &opts).unwrap_err();

        match err {
            NextRailsError::Application(ApplicationError::CommandFailed { command, stderr, .. }) => {
                assert!(command.starts_with("npx create-next-app@15.1.6"));
                assert_eq!(stderr, "network down");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn old_node_stops_before_any_command() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists().return_const(true);
        fs.expect_read_to_string()
            .returning(|_| Ok("node_modules/\n".into()));
        let mut runner = MockCommandRunner::new();
        runner.expect_run().never();

        let service = ScaffoldService::new(unused_routes(), Box::new(fs), Box::new(runner), versions("v16.0.0"));
        let opts = ScaffoldOptions {
            skip_routes: true,
            ..ScaffoldOptions::default()
        };
        let err = service
            .scaffold(&ResourceName::parse("product").unwrap(), &[], &opts)
            .unwrap_err();
        assert!(matches!(
            err,
            NextRailsError::Application(ApplicationError::ToolVersionMismatch { .. })
        ));
    }

    #[test]
    fn install_keeps_existing_initializer_without_force() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists().return_const(true);
        fs.expect_write_file().never();

        let service = ScaffoldService::new(
            unused_routes(),
            Box::new(fs),
            Box::new(MockCommandRunner::new()),
            versions("v20.0.0"),
        );
        assert_eq!(
            service.install(Path::new("."), false, false).unwrap(),
            InstallOutcome::Unchanged
        );
    }

    #[test]
    fn install_writes_generator_settings() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists().return_const(false);
        fs.expect_create_dir_all().returning(|_| Ok(()));
        fs.expect_write_file()
            .withf(|path, content| {
                path.ends_with(INITIALIZER_PATH) && content.contains("g.resource_route false")
            })
            .times(1)
            .returning(|_, _| Ok(()));

        let service = ScaffoldService::new(
            unused_routes(),
            Box::new(fs),
            Box::new(MockCommandRunner::new()),
            versions("v20.0.0"),
        );
        assert_eq!(
            service.install(Path::new("app"), false, false).unwrap(),
            InstallOutcome::Created
        );
    }

    #[test]
    fn step_messages_read_naturally() {
        let step = ScaffoldStep::RoutesUpdated {
            behavior: Behavior::Revoke,
            wrappers: "scope '/api'".into(),
        };
        assert_eq!(step.to_string(), "routes revoked under scope '/api'");
        assert_eq!(
            ScaffoldStep::PackageManagerSelected {
                manager: PackageManager::Yarn,
                via: Selection::LockFile,
            }
            .to_string(),
            "using yarn (found yarn.lock)"
        );
    }
}
