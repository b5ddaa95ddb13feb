//! Configuration schema definitions
//!
//! Defines the structure of configuration files using serde for serialization.

use serde::{Deserialize, Serialize};

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Compiler invocation
    #[serde(default)]
    pub compiler: CompilerConfig,

    /// Display path normalization
    #[serde(default)]
    pub paths: PathsConfig,

    /// Logger configuration
    #[serde(default)]
    pub logger: LoggerConfig,
}

/// Compiler invocation configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CompilerConfig {
    /// Executable to run (looked up on PATH)
    #[serde(default = "default_command")]
    pub command: String,

    /// Arguments that make the compiler print its resolution trace
    #[serde(default = "default_args")]
    pub args: Vec<String>,

    /// Project passed as `--project <path>`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project: Option<String>,

    /// Accept a non-zero compiler exit status (type errors, etc.)
    #[serde(default = "default_false")]
    pub ignore_exit_status: bool,
}

/// Path normalization configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PathsConfig {
    /// Strip `<cwd>/` from printed paths
    #[serde(default = "default_true")]
    pub trim_working_dir: bool,

    /// Strip `<cwd>/node_modules/` from printed paths
    #[serde(default = "default_true")]
    pub trim_node_modules: bool,

    /// Additional prefixes stripped after the built-in ones
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extra_prefixes: Vec<String>,
}

/// Logger configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LoggerConfig {
    /// Default filter used with --debug when RUST_LOG is unset
    #[serde(default = "default_log_level")]
    pub level: String,
}

// Default value functions
fn default_command() -> String {
    "tsc".to_string()
}

fn default_args() -> Vec<String> {
    vec!["--traceResolution".to_string()]
}

fn default_true() -> bool {
    true
}

fn default_false() -> bool {
    false
}

fn default_log_level() -> String {
    "debug".to_string()
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self {
            command: default_command(),
            args: default_args(),
            project: None,
            ignore_exit_status: default_false(),
        }
    }
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            trim_working_dir: default_true(),
            trim_node_modules: default_true(),
            extra_prefixes: Vec::new(),
        }
    }
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = Config::default();
        assert_eq!(config.compiler.command, "tsc");
        assert_eq!(config.compiler.args, vec!["--traceResolution"]);
        assert!(config.paths.trim_working_dir);
        assert!(config.paths.trim_node_modules);
        assert!(!config.compiler.ignore_exit_status);
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let yaml = serde_yaml::to_string(&config).unwrap();
        assert!(yaml.contains("ignoreExitStatus"));
        assert!(yaml.contains("trimNodeModules"));
        assert!(!yaml.contains("project"));
    }

    #[test]
    fn test_config_deserialization() {
        let yaml = r#"
compiler:
  command: npx
  args: ["tsc", "--traceResolution"]
  project: tsconfig.build.json
paths:
  trimNodeModules: false
"#;
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.compiler.command, "npx");
        assert_eq!(config.compiler.args, vec!["tsc", "--traceResolution"]);
        assert_eq!(
            config.compiler.project.as_deref(),
            Some("tsconfig.build.json")
        );
        assert!(!config.paths.trim_node_modules);
        assert!(config.paths.trim_working_dir);
        assert_eq!(config.logger.level, "debug");
    }
}
