//! Command runner that records instead of running (testing).

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use nextrails_core::{
    application::{
        ApplicationError,
        ports::{CommandOutput, CommandRunner, CommandSpec, ToolVersionProbe},
    },
    error::NextRailsResult,
};

/// Records every command and answers version probes from a fixed table.
///
/// Clones share state, like [`crate::MemoryFilesystem`].
#[derive(Debug, Clone, Default)]
pub struct RecordingCommandRunner {
    inner: Arc<Mutex<Recorded>>,
}

#[derive(Debug, Default)]
struct Recorded {
    commands: Vec<CommandSpec>,
    versions: HashMap<String, String>,
    failures: HashMap<String, CommandOutput>,
}

impl RecordingCommandRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Report `version` for `tool --version`.
    pub fn with_tool(self, tool: &str, version: &str) -> Self {
        if let Ok(mut inner) = self.inner.lock() {
            inner.versions.insert(tool.to_string(), version.to_string());
        }
        self
    }

    /// Make any command whose rendering starts with `prefix` fail.
    pub fn failing(self, prefix: &str, status: i32, stderr: &str) -> Self {
        if let Ok(mut inner) = self.inner.lock() {
            inner.failures.insert(
                prefix.to_string(),
                CommandOutput {
                    status,
                    stdout: String::new(),
                    stderr: stderr.to_string(),
                },
            );
        }
        self
    }

    pub fn commands(&self) -> Vec<CommandSpec> {
        self.inner
            .lock()
            .map(|inner| inner.commands.clone())
            .unwrap_or_default()
    }

    /// Commands rendered the way a shell would show them.
    pub fn command_lines(&self) -> Vec<String> {
        self.commands().iter().map(ToString::to_string).collect()
    }
}

impl CommandRunner for RecordingCommandRunner {
    fn run(&self, invocation: &CommandSpec) -> NextRailsResult<CommandOutput> {
        let mut inner = self
            .inner
            .lock()
            .map_err(|_| ApplicationError::StoreLockError)?;
        inner.commands.push(invocation.clone());

        let rendered = invocation.to_string();
        Ok(inner
            .failures
            .iter()
            .find(|(prefix, _)| rendered.starts_with(prefix.as_str()))
            .map(|(_, output)| output.clone())
            .unwrap_or_default())
    }
}

impl ToolVersionProbe for RecordingCommandRunner {
    fn version(&self, tool: &str) -> NextRailsResult<Option<String>> {
        let inner = self
            .inner
            .lock()
            .map_err(|_| ApplicationError::StoreLockError)?;
        Ok(inner.versions.get(tool).cloned())
    }
}
