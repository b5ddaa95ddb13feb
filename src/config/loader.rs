//! Configuration loading and merging logic
//!
//! Handles loading configuration from multiple sources and merging them
//! according to precedence rules.

use super::{defaults, paths, schema::Config};
use anyhow::{Context, Result};
use serde_yaml::Value;
use std::path::{Path, PathBuf};

/// Configuration loader
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with all layers merged
    ///
    /// Precedence order (highest to lowest):
    /// 1. Environment variable overrides
    /// 2. Project-local `.tswhy.yaml` in `project_dir`
    /// 3. Root config
    /// 4. Built-in defaults
    ///
    /// Files are merged key by key, so a project file that only sets
    /// `compiler.project` keeps everything else from the root config.
    pub fn load(project_dir: &Path) -> Result<Config> {
        let mut merged = Value::Mapping(Default::default());

        for path in Self::layers(project_dir) {
            if let Some(layer) = Self::load_value(&path)? {
                Self::merge_values(&mut merged, layer);
            }
        }

        let config: Config =
            serde_yaml::from_value(merged).context("Failed to parse merged configuration")?;

        Ok(Self::apply_env_overrides(config))
    }

    /// Config files that exist for `project_dir`, lowest precedence first
    pub fn layers(project_dir: &Path) -> Vec<PathBuf> {
        Self::existing(vec![
            paths::root_config_path(),
            paths::local_config_path(project_dir),
        ])
    }

    fn existing(candidates: Vec<PathBuf>) -> Vec<PathBuf> {
        candidates.into_iter().filter(|p| p.exists()).collect()
    }

    /// Load configuration from a single file
    pub fn load_file(path: &Path) -> Result<Config> {
        if !path.exists() {
            return Err(anyhow::anyhow!("Config file not found: {}", path.display()));
        }

        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = serde_yaml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Validate every config file that exists and the merged result
    pub fn validate(project_dir: &Path) -> Result<()> {
        for path in [
            paths::root_config_path(),
            paths::local_config_path(project_dir),
        ] {
            if path.exists() {
                let config = Self::load_file(&path)?;
                if config.compiler.command.trim().is_empty() {
                    return Err(anyhow::anyhow!(
                        "compiler.command is empty in {}",
                        path.display()
                    ));
                }
            }
        }

        let _ = Self::load(project_dir).context("Failed to load merged configuration")?;

        Ok(())
    }

    /// Load default configuration
    pub fn load_defaults() -> Config {
        defaults::default_config()
    }

    fn load_value(path: &Path) -> Result<Option<Value>> {
        if !path.exists() {
            return Ok(None);
        }

        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let value: Value = serde_yaml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        // An empty file parses as null
        Ok(match value {
            Value::Null => None,
            other => Some(other),
        })
    }

    /// Deep-merge `other` into `base`, with `other` taking precedence
    fn merge_values(base: &mut Value, other: Value) {
        match (base, other) {
            (Value::Mapping(base_map), Value::Mapping(other_map)) => {
                for (key, value) in other_map {
                    match base_map.get_mut(&key) {
                        Some(existing) => Self::merge_values(existing, value),
                        None => {
                            base_map.insert(key, value);
                        }
                    }
                }
            }
            (base, other) => *base = other,
        }
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(mut config: Config) -> Config {
        // TSWHY_COMPILER override
        if let Ok(command) = std::env::var("TSWHY_COMPILER") {
            config.compiler.command = command;
        }

        // TSWHY_PROJECT override
        if let Ok(project) = std::env::var("TSWHY_PROJECT") {
            config.compiler.project = Some(project);
        }

        // TSWHY_IGNORE_EXIT_STATUS override
        if let Ok(ignore) = std::env::var("TSWHY_IGNORE_EXIT_STATUS") {
            if let Ok(val) = ignore.parse::<bool>() {
                config.compiler.ignore_exit_status = val;
            }
        }

        config
    }

    /// Save configuration to a file
    pub fn save(config: &Config, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            paths::ensure_dir(parent)?;
        }

        let yaml =
            serde_yaml::to_string(config).context("Failed to serialize configuration to YAML")?;

        std::fs::write(path, yaml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Save root configuration
    pub fn save_root(config: &Config) -> Result<()> {
        Self::save(config, &paths::root_config_path())
    }

    /// Save project-local configuration
    pub fn save_local(config: &Config, project_dir: &Path) -> Result<()> {
        Self::save(config, &paths::local_config_path(project_dir))
    }
}
