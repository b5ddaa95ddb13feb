//! Display path normalization
//!
//! The compiler prints absolute paths. For display they are shortened by
//! stripping the working directory, or the working directory's
//! `node_modules`, so `/work/app/node_modules/react/index.d.ts` reads as
//! `react/index.d.ts`.

use std::path::Path;

use crate::config::PathsConfig;

/// Strips configured prefixes from file paths
#[derive(Debug, Clone, Default)]
pub struct PathNormalizer {
    prefixes: Vec<String>,
}

impl PathNormalizer {
    /// Build a normalizer rooted at `working_dir`
    pub fn new(working_dir: &Path, config: &PathsConfig) -> Self {
        let mut prefixes = Vec::new();

        // node_modules first: it is the longer of the two
        if config.trim_node_modules {
            prefixes.push(dir_prefix(&working_dir.join("node_modules")));
        }
        if config.trim_working_dir {
            prefixes.push(dir_prefix(working_dir));
        }
        prefixes.extend(config.extra_prefixes.iter().cloned());

        tracing::debug!("Path prefixes to trim: {:?}", prefixes);

        Self { prefixes }
    }

    /// Normalizer that leaves paths untouched
    pub fn identity() -> Self {
        Self::default()
    }

    /// Strip each prefix at most once, in order
    pub fn normalize<'a>(&self, path: &'a str) -> &'a str {
        self.prefixes
            .iter()
            .fold(path, |acc, prefix| acc.strip_prefix(prefix.as_str()).unwrap_or(acc))
    }
}

/// Directory path with a trailing separator
fn dir_prefix(dir: &Path) -> String {
    let joined = dir.join("x");
    let joined = joined.to_string_lossy();
    joined
        .strip_suffix('x')
        .unwrap_or(&joined)
        .to_string()
}
