//! `nextrails config`: inspect configuration values.

use std::path::Path;

use crate::{
    cli::ConfigCommands,
    config::{AppConfig, LOCAL_CONFIG},
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Dispatch to the correct config subcommand.
pub fn execute(cmd: ConfigCommands, config: AppConfig, output: OutputManager) -> CliResult<()> {
    match cmd {
        ConfigCommands::Get { key } => {
            if output.is_json() {
                let value = config.get(&key).ok_or_else(|| unknown_key(&key))?;
                output.json(&serde_json::json!({ "key": key, "value": value }))?;
                return Ok(());
            }
            let value = get_config_value(&config, &key)?;
            output.print(&value)?;
        }

        ConfigCommands::List => {
            if output.is_json() {
                output.json(&config)?;
                return Ok(());
            }
            output.header("Current Configuration:")?;
            let serialised =
                toml::to_string_pretty(&config).map_err(|e| CliError::ConfigError {
                    message: format!("Failed to serialise config: {e}"),
                    source: Some(Box::new(e)),
                })?;
            output.print(&serialised)?;
        }

        ConfigCommands::Path => {
            match AppConfig::config_path() {
                Some(path) => output.print(&path.display().to_string())?,
                None => output.warning("No user config directory on this system")?,
            }
            if Path::new(LOCAL_CONFIG).exists() {
                output.print(LOCAL_CONFIG)?;
            }
        }
    }

    Ok(())
}

// ── helpers ───────────────────────────────────────────────────────────────────

/// Strings print bare, anything else as JSON.  Unset options print empty.
fn get_config_value(config: &AppConfig, key: &str) -> CliResult<String> {
    match config.get(key) {
        Some(serde_json::Value::String(s)) => Ok(s),
        Some(serde_json::Value::Null) => Ok(String::new()),
        Some(other) => Ok(other.to_string()),
        None => Err(unknown_key(key)),
    }
}

fn unknown_key(key: &str) -> CliError {
    CliError::ConfigError {
        message: format!("Unknown config key: '{key}'"),
        source: None,
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;

    #[test]
    fn get_known_key() {
        let cfg = AppConfig::default();
        assert_eq!(get_config_value(&cfg, "routes.file").unwrap(), "config/routes.rb");
    }

    #[test]
    fn get_unknown_key_is_error() {
        let cfg = AppConfig::default();
        assert!(matches!(
            get_config_value(&cfg, "does.not.exist"),
            Err(CliError::ConfigError { .. })
        ));
    }

    #[test]
    fn get_bool_and_unset_values() {
        let cfg = AppConfig::default();
        assert_eq!(get_config_value(&cfg, "output.no_color").unwrap(), "false");
        assert_eq!(get_config_value(&cfg, "frontend.package_manager").unwrap(), "");
    }

    #[test]
    fn get_enum_value() {
        let cfg = AppConfig::default();
        assert_eq!(
            get_config_value(&cfg, "routes.ambiguous_anchor").unwrap(),
            "first"
        );
    }
}
