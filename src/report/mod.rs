//! Report building and rendering
//!
//! Two reports exist: a streaming dump of every resolved import edge, and the
//! "why" report explaining how modules matching a pattern are reached from
//! the root file.

mod dump;
mod why;

pub use dump::{EdgePrinter, ImportEdge};
pub use why::{GraphBuilder, WhyMatch, WhyReport};

use regex::Regex;

/// Output format for reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human readable text
    #[default]
    Text,
    /// JSON (one object per edge for dumps, one document for why reports)
    Json,
}

/// Pattern selecting which graph nodes to explain
#[derive(Debug, Clone)]
pub enum ModulePattern {
    /// Unanchored regular expression search
    Regex(Regex),
    /// Exact label equality, used when the pattern is not a valid regex
    Literal(String),
}

impl ModulePattern {
    /// Compile `pattern`, falling back to exact matching if it is not a regex
    pub fn parse(pattern: &str) -> Self {
        match Regex::new(pattern) {
            Ok(re) => ModulePattern::Regex(re),
            Err(e) => {
                tracing::warn!(
                    "'{}' is not a valid regex ({}), matching module names literally",
                    pattern,
                    e
                );
                ModulePattern::Literal(pattern.to_string())
            }
        }
    }

    pub fn matches(&self, label: &str) -> bool {
        match self {
            ModulePattern::Regex(re) => re.is_match(label),
            ModulePattern::Literal(literal) => label == literal,
        }
    }

    /// Pattern as the user wrote it
    pub fn as_str(&self) -> &str {
        match self {
            ModulePattern::Regex(re) => re.as_str(),
            ModulePattern::Literal(literal) => literal,
        }
    }
}
