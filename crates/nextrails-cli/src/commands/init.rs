//! `nextrails init`: create a default configuration file.

use std::path::PathBuf;

use crate::{
    cli::InitArgs,
    config::{AppConfig, LOCAL_CONFIG},
    error::{CliError, CliResult, IntoCli},
    output::OutputManager,
};

/// Write the effective configuration as a TOML starting point.
///
/// The current settings (including any env overrides) are written, with
/// `install.configured` switched on.
pub fn execute(args: InitArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    output.info("Initialising configuration...")?;

    let config_path = target_path(args.local)?;

    if config_path.exists() && !args.force {
        output.warning(&format!(
            "Config already exists at {}  (use --force to overwrite)",
            config_path.display(),
        ))?;
        return Ok(());
    }

    let mut initial = config;
    initial.install.configured = true;
    let toml = toml::to_string_pretty(&initial).map_err(|e| CliError::ConfigError {
        message: format!("Failed to serialise config: {e}"),
        source: Some(Box::new(e)),
    })?;

    if let Some(parent) = config_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).with_cli_context(|| {
            format!("Failed to create config directory '{}'", parent.display())
        })?;
    }

    std::fs::write(&config_path, &toml)
        .with_cli_context(|| format!("Failed to write config to '{}'", config_path.display()))?;

    output.success(&format!(
        "Configuration created at {}",
        config_path.display(),
    ))?;

    Ok(())
}

fn target_path(local: bool) -> CliResult<PathBuf> {
    if local {
        return Ok(PathBuf::from(LOCAL_CONFIG));
    }
    AppConfig::config_path().ok_or_else(|| CliError::ConfigError {
        message: "No home directory found; use --local".into(),
        source: None,
    })
}
