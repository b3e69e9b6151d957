//! Command handlers, one module per subcommand.
//!
//! Handlers translate arguments into core types, wire adapters into the
//! services and print results. No business logic lives here.

pub mod completions;
pub mod config;
pub mod init;
pub mod install;
pub mod route;
pub mod scaffold;

use nextrails_adapters::{LocalFilesystem, SystemCommandRunner};
use nextrails_core::prelude::{AnchorPolicy, RouteEngine, RouteService, ScaffoldService, VersionCache};

use crate::config::AppConfig;

/// Route service on the local filesystem.
fn route_service(policy: AnchorPolicy) -> RouteService {
    RouteService::new(Box::new(LocalFilesystem::new()), RouteEngine::new(policy))
}

/// Scaffold service on the local filesystem and real node toolchain.
fn scaffold_service(config: &AppConfig) -> ScaffoldService {
    ScaffoldService::new(
        route_service(config.routes.ambiguous_anchor),
        Box::new(LocalFilesystem::new()),
        Box::new(SystemCommandRunner::new()),
        VersionCache::new(Box::new(SystemCommandRunner::new())),
    )
}
