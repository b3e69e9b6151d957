//! Node toolchain checks on top of the `ToolVersionProbe` port.

use std::collections::HashMap;
use std::sync::Mutex;

use tracing::{debug, info};

use crate::{
    application::{ApplicationError, ports::ToolVersionProbe},
    domain::{PackageManager, VersionRequirement},
    error::NextRailsResult,
};

/// Memoizes probe answers for the lifetime of one run.
///
/// Tool versions do not change mid-run, and probing spawns a process.
pub struct VersionCache {
    probe: Box<dyn ToolVersionProbe>,
    seen: Mutex<HashMap<String, Option<String>>>,
}

impl VersionCache {
    pub fn new(probe: Box<dyn ToolVersionProbe>) -> Self {
        Self {
            probe,
            seen: Mutex::new(HashMap::new()),
        }
    }

    /// Reported version of `tool`, or `None` when it is not installed.
    pub fn version(&self, tool: &str) -> NextRailsResult<Option<String>> {
        if let Some(hit) = self
            .seen
            .lock()
            .map_err(|_| ApplicationError::StoreLockError)?
            .get(tool)
        {
            return Ok(hit.clone());
        }

        let found = self.probe.version(tool)?;
        debug!(tool, version = ?found, "Probed tool version");
        self.seen
            .lock()
            .map_err(|_| ApplicationError::StoreLockError)?
            .insert(tool.to_string(), found.clone());
        Ok(found)
    }

    pub fn is_available(&self, tool: &str) -> NextRailsResult<bool> {
        Ok(self.version(tool)?.is_some())
    }

    /// Fail unless `tool` is installed and satisfies `required`.
    pub fn require(&self, tool: &str, required: &VersionRequirement) -> NextRailsResult<String> {
        let found = self.version(tool)?.ok_or_else(|| ApplicationError::ToolMissing {
            tool: tool.to_string(),
        })?;
        if !required.matches(&found) {
            return Err(ApplicationError::ToolVersionMismatch {
                tool: tool.to_string(),
                found,
                required: required.to_string(),
            }
            .into());
        }
        info!(tool, version = %found, "Toolchain requirement met");
        Ok(found)
    }

    /// Managers whose binary answers `--version`, in registry order.
    pub fn available_package_managers(&self) -> NextRailsResult<Vec<PackageManager>> {
        let mut available = Vec::new();
        for pm in PackageManager::ALL {
            if self.is_available(pm.binary())? {
                available.push(pm);
            }
        }
        Ok(available)
    }
}
