//! Route Service - reads `config/routes.rb`, runs the engine, writes it back.
//!
//! The file is only written once the engine has produced a complete
//! replacement, so a failed edit never leaves a half-edited file.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info, instrument};

use crate::{
    application::{ApplicationError, ports::Filesystem},
    domain::{Behavior, RouteEngine, RouteRequest},
    error::NextRailsResult,
};

/// Default location of the routes file, relative to the Rails root.
pub const DEFAULT_ROUTES_FILE: &str = "config/routes.rb";

/// Result of a route edit, suitable for text or JSON display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteOutcome {
    pub file: PathBuf,
    pub behavior: Behavior,
    pub entry: String,
    pub wrappers: String,
    /// False for dry runs.
    pub written: bool,
    /// The full file content after the edit.
    #[serde(skip)]
    pub content: String,
}

/// Route editing use case.
pub struct RouteService {
    filesystem: Box<dyn Filesystem>,
    engine: RouteEngine,
}

impl RouteService {
    pub fn new(filesystem: Box<dyn Filesystem>, engine: RouteEngine) -> Self {
        Self { filesystem, engine }
    }

    pub fn engine(&self) -> RouteEngine {
        self.engine
    }

    /// Inject or revoke `request` in the routes file at `file`.
    #[instrument(
        skip_all,
        fields(
            file = %file.display(),
            behavior = %behavior,
            entry = %request.entry(),
        )
    )]
    pub fn apply(
        &self,
        file: &Path,
        request: &RouteRequest,
        behavior: Behavior,
        dry_run: bool,
    ) -> NextRailsResult<RouteOutcome> {
        if !self.filesystem.exists(file) {
            return Err(ApplicationError::RoutesFileMissing {
                path: file.to_path_buf(),
            }
            .into());
        }

        let wrappers = request.wrappers()?;
        let original = self.filesystem.read_to_string(file)?;
        let content = self
            .engine
            .apply(behavior, request.entry(), &wrappers, &original)?;
        debug!(bytes = content.len(), "Route edit computed");

        if dry_run {
            info!("Dry run, routes file left untouched");
        } else {
            self.filesystem.write_file(file, &content)?;
            info!("Routes file updated");
        }

        Ok(RouteOutcome {
            file: file.to_path_buf(),
            behavior,
            entry: request.entry().to_string(),
            wrappers: wrappers.to_string(),
            written: !dry_run,
            content,
        })
    }
}
