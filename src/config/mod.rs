//! Configuration system for tswhy
//!
//! Layered YAML configuration: built-in defaults, a user-wide root file, a
//! project-local `.tswhy.yaml`, and environment overrides.

mod defaults;
pub mod loader;
pub mod paths;
pub mod schema;

pub use loader::ConfigLoader;
pub use schema::{CompilerConfig, Config, LoggerConfig, PathsConfig};

/// Get a configuration value by key (dot notation)
pub fn get_config_value(config: &schema::Config, key: &str) -> anyhow::Result<String> {
    match key {
        "compiler.command" => Ok(config.compiler.command.clone()),
        "compiler.args" => serde_yaml::to_string(&config.compiler.args)
            .map_err(|e| anyhow::anyhow!("Failed to serialize compiler.args: {}", e)),
        "compiler.project" => Ok(config.compiler.project.clone().unwrap_or_default()),
        "compiler.ignoreExitStatus" => Ok(config.compiler.ignore_exit_status.to_string()),
        "paths.trimWorkingDir" => Ok(config.paths.trim_working_dir.to_string()),
        "paths.trimNodeModules" => Ok(config.paths.trim_node_modules.to_string()),
        "paths.extraPrefixes" => serde_yaml::to_string(&config.paths.extra_prefixes)
            .map_err(|e| anyhow::anyhow!("Failed to serialize paths.extraPrefixes: {}", e)),
        "logger.level" => Ok(config.logger.level.clone()),
        _ => Err(anyhow::anyhow!("Unknown configuration key: {}", key)),
    }
}

/// Set a configuration value by key (dot notation)
pub fn set_config_value(config: &mut schema::Config, key: &str, value: &str) -> anyhow::Result<()> {
    use anyhow::Context;
    match key {
        "compiler.command" => {
            if value.trim().is_empty() {
                return Err(anyhow::anyhow!("compiler.command must not be empty"));
            }
            config.compiler.command = value.to_string();
        }
        "compiler.args" => {
            config.compiler.args = parse_list(value).context(
                "compiler.args must be a YAML array (e.g., ['--traceResolution']) or a comma-separated list",
            )?;
        }
        "compiler.project" => {
            if value.is_empty() {
                config.compiler.project = None;
            } else {
                config.compiler.project = Some(value.to_string());
            }
        }
        "compiler.ignoreExitStatus" => {
            config.compiler.ignore_exit_status = value
                .parse()
                .context("compiler.ignoreExitStatus must be 'true' or 'false'")?;
        }
        "paths.trimWorkingDir" => {
            config.paths.trim_working_dir = value
                .parse()
                .context("paths.trimWorkingDir must be 'true' or 'false'")?;
        }
        "paths.trimNodeModules" => {
            config.paths.trim_node_modules = value
                .parse()
                .context("paths.trimNodeModules must be 'true' or 'false'")?;
        }
        "paths.extraPrefixes" => {
            config.paths.extra_prefixes = parse_list(value).context(
                "paths.extraPrefixes must be a YAML array or a comma-separated list",
            )?;
        }
        "logger.level" => {
            tracing_subscriber::EnvFilter::try_new(value)
                .with_context(|| format!("logger.level is not a valid filter: {}", value))?;
            config.logger.level = value.to_string();
        }
        _ => return Err(anyhow::anyhow!("Unknown configuration key: {}", key)),
    }

    Ok(())
}

/// Parse a YAML array (`[a, b]`) or a comma-separated list
fn parse_list(value: &str) -> anyhow::Result<Vec<String>> {
    if value.trim_start().starts_with('[') {
        Ok(serde_yaml::from_str(value)?)
    } else {
        Ok(value
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_known_keys() {
        let config = Config::default();
        assert_eq!(get_config_value(&config, "compiler.command").unwrap(), "tsc");
        assert_eq!(get_config_value(&config, "compiler.project").unwrap(), "");
        assert_eq!(
            get_config_value(&config, "paths.trimNodeModules").unwrap(),
            "true"
        );
        assert!(get_config_value(&config, "nope").is_err());
    }

    #[test]
    fn test_set_list_values() {
        let mut config = Config::default();
        set_config_value(&mut config, "compiler.args", "tsc, --traceResolution").unwrap();
        assert_eq!(config.compiler.args, vec!["tsc", "--traceResolution"]);

        set_config_value(&mut config, "paths.extraPrefixes", "['/a/', '/b/']").unwrap();
        assert_eq!(config.paths.extra_prefixes, vec!["/a/", "/b/"]);
    }

    #[test]
    fn test_set_rejects_bad_values() {
        let mut config = Config::default();
        assert!(set_config_value(&mut config, "compiler.ignoreExitStatus", "maybe").is_err());
        assert!(set_config_value(&mut config, "compiler.command", "  ").is_err());
        assert!(set_config_value(&mut config, "unknown.key", "x").is_err());
    }

    #[test]
    fn test_set_project_empty_clears() {
        let mut config = Config::default();
        set_config_value(&mut config, "compiler.project", "tsconfig.json").unwrap();
        assert_eq!(config.compiler.project.as_deref(), Some("tsconfig.json"));
        set_config_value(&mut config, "compiler.project", "").unwrap();
        assert_eq!(config.compiler.project, None);
    }
}
