//! Runs commands for real with `std::process`.

use std::io;
use std::process::Command;

use tracing::{debug, warn};

use nextrails_core::{
    application::{
        ApplicationError,
        ports::{CommandOutput, CommandRunner, CommandSpec, ToolVersionProbe},
    },
    error::NextRailsResult,
};

/// Production runner: spawns processes and captures their output.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemCommandRunner;

impl SystemCommandRunner {
    pub fn new() -> Self {
        Self
    }
}

impl CommandRunner for SystemCommandRunner {
    fn run(&self, invocation: &CommandSpec) -> NextRailsResult<CommandOutput> {
        let mut command = Command::new(invocation.program());
        command.args(invocation.get_args());
        if let Some(dir) = invocation.cwd() {
            command.current_dir(dir);
        }

        debug!(command = %invocation, "Spawning");
        let output = command.output().map_err(|e| ApplicationError::CommandSpawn {
            command: invocation.to_string(),
            reason: e.to_string(),
        })?;

        let status = output.status.code().unwrap_or(-1);
        if status != 0 {
            warn!(command = %invocation, status, "Command exited unsuccessfully");
        }
        Ok(CommandOutput {
            status,
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

impl ToolVersionProbe for SystemCommandRunner {
    /// `<tool> --version`; a tool that cannot be found is `None`.
    fn version(&self, tool: &str) -> NextRailsResult<Option<String>> {
        match Command::new(tool).arg("--version").output() {
            Ok(output) if output.status.success() => {
                let reported = String::from_utf8_lossy(&output.stdout).trim().to_string();
                Ok(Some(reported).filter(|v| !v.is_empty()))
            }
            Ok(_) => Ok(None),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(ApplicationError::CommandSpawn {
                command: format!("{tool} --version"),
                reason: e.to_string(),
            }
            .into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_tool_has_no_version() {
        let probe = SystemCommandRunner::new();
        assert_eq!(
            probe.version("nextrails-definitely-not-installed").unwrap(),
            None
        );
    }

    #[test]
    fn spawn_failure_is_an_error() {
        let err = SystemCommandRunner::new()
            .run(&CommandSpec::new("nextrails-definitely-not-installed"))
            .unwrap_err();
        assert!(err.to_string().contains("Could not run"));
    }

    #[cfg(unix)]
    #[test]
    fn captures_exit_status_and_output() {
        let dir = tempfile::tempdir().unwrap();
        let out = SystemCommandRunner::new()
            .run(
                &CommandSpec::new("sh")
                    .args(["-c", "pwd; echo oops >&2; exit 3"])
                    .current_dir(dir.path()),
            )
            .unwrap();

        assert_eq!(out.status, 3);
        assert!(!out.success());
        assert_eq!(out.stderr.trim(), "oops");
        assert!(!out.stdout.trim().is_empty());
    }
}
