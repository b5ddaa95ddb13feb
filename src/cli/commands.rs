//! CLI command handlers

use anyhow::{Context, Result};
use clap::Subcommand;
use std::path::Path;

use crate::config::{ConfigLoader, paths};

/// Configuration management subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigSubcommand {
    /// Get configuration value
    Get {
        /// Configuration key (e.g., "compiler.command", "paths.trimNodeModules")
        key: Option<String>,
    },
    /// Set configuration value
    Set {
        /// Configuration key (e.g., "compiler.command", "paths.trimNodeModules")
        key: String,
        /// Configuration value
        value: String,
        /// Write to the project-local .tswhy.yaml instead of the user config
        #[arg(long)]
        local: bool,
    },
    /// List all configuration
    List,
    /// Show configuration file paths
    Path,
    /// Validate configuration
    Validate,
}

/// Handle configuration subcommands
pub fn handle_config_command(cmd: ConfigSubcommand, project_dir: &Path) -> Result<()> {
    match cmd {
        ConfigSubcommand::Get { key } => {
            // Load config (will use defaults if no file exists)
            let config =
                ConfigLoader::load(project_dir).context("Failed to load configuration")?;

            if let Some(key) = key {
                let value = crate::config::get_config_value(&config, &key)?;
                println!("{}", value.trim_end());
            } else {
                let yaml =
                    serde_yaml::to_string(&config).context("Failed to serialize configuration")?;
                print!("{}", yaml);
            }
        }
        ConfigSubcommand::Set { key, value, local } => {
            // Only the target layer is edited, so other layers are not copied into it
            let target = if local {
                paths::local_config_path(project_dir)
            } else {
                paths::root_config_path()
            };
            let mut config = if target.exists() {
                ConfigLoader::load_file(&target)?
            } else {
                ConfigLoader::load_defaults()
            };

            crate::config::set_config_value(&mut config, &key, &value)
                .with_context(|| format!("Failed to set {} = {}", key, value))?;

            if local {
                ConfigLoader::save_local(&config, project_dir)
                    .context("Failed to save project configuration")?;
                println!("Configuration saved to {}", target.display());
            } else {
                ConfigLoader::save_root(&config).context("Failed to save configuration")?;
                println!("Configuration saved");
            }
        }
        ConfigSubcommand::List => {
            let config =
                ConfigLoader::load(project_dir).context("Failed to load configuration")?;

            let yaml =
                serde_yaml::to_string(&config).context("Failed to serialize configuration")?;
            print!("{}", yaml);
        }
        ConfigSubcommand::Path => {
            println!("{}", paths::root_config_path().display());
            println!("{}", paths::local_config_path(project_dir).display());
        }
        ConfigSubcommand::Validate => match ConfigLoader::validate(project_dir) {
            Ok(()) => {
                println!("Configuration is valid");
            }
            Err(e) => {
                eprintln!("Configuration validation failed: {:#}", e);
                std::process::exit(1);
            }
        },
    }

    Ok(())
}
