//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `nextrails-adapters` implement these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `Filesystem`: reading and rewriting project files
//!   - `CommandRunner`: running node tooling (`npx`, `yarn`, ...)
//!   - `ToolVersionProbe`: asking a tool for its `--version`

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::NextRailsResult;

/// Port for filesystem operations.
///
/// Implemented by:
/// - `nextrails_adapters::filesystem::LocalFilesystem` (production)
/// - `nextrails_adapters::filesystem::MemoryFilesystem` (testing)
#[cfg_attr(test, mockall::automock)]
pub trait Filesystem: Send + Sync {
    /// Read a whole UTF-8 file.
    fn read_to_string(&self, path: &Path) -> NextRailsResult<String>;

    /// Replace the file's content, creating it if needed.
    fn write_file(&self, path: &Path, content: &str) -> NextRailsResult<()>;

    /// Append to an existing file.
    fn append(&self, path: &Path, content: &str) -> NextRailsResult<()>;

    /// Check if path exists (file or directory).
    fn exists(&self, path: &Path) -> bool;

    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> NextRailsResult<()>;
}

/// An external command, described rather than executed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommandSpec {
    program: String,
    args: Vec<String>,
    cwd: Option<PathBuf>,
}

impl CommandSpec {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            cwd: None,
        }
    }

    /// Build from a prefix such as `["pnpm", "dlx"]`.
    ///
    /// Returns `None` for an empty prefix.
    pub fn from_prefix(prefix: &[&str]) -> Option<Self> {
        let (program, rest) = prefix.split_first()?;
        Some(Self::new(*program).args(rest.iter().copied()))
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cwd = Some(dir.into());
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn get_args(&self) -> &[String] {
        &self.args
    }

    pub fn cwd(&self) -> Option<&Path> {
        self.cwd.as_deref()
    }
}

impl fmt::Display for CommandSpec {
    /// Shell-like rendering, used in logs and dry-run output.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            if arg.is_empty() || arg.contains([' ', '"', '*', '\'']) {
                write!(f, " \"{}\"", arg.replace('"', "\\\""))?;
            } else {
                write!(f, " {arg}")?;
            }
        }
        Ok(())
    }
}

/// What a finished command left behind.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    pub status: i32,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.status == 0
    }
}

/// Port for running external programs.
///
/// A non-zero exit is not an error at this level; callers decide.
#[cfg_attr(test, mockall::automock)]
pub trait CommandRunner: Send + Sync {
    fn run(&self, command: &CommandSpec) -> NextRailsResult<CommandOutput>;
}

/// Port for asking a tool which version it is.
///
/// `Ok(None)` means the tool is not installed. Implementations do not cache;
/// see [`crate::application::services::VersionCache`].
#[cfg_attr(test, mockall::automock)]
pub trait ToolVersionProbe: Send + Sync {
    fn version(&self, tool: &str) -> NextRailsResult<Option<String>>;
}
