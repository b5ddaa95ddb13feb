//! Trace line classification
//!
//! Each of the three line kinds has a fixed prefix and single-quoted fields.
//! The patterns are mutually exclusive by construction: `Resolving module`
//! and `Module name` differ at the first word, and the two `Module name`
//! patterns differ right after the quoted specifier, which cannot contain
//! a quote.

use regex::Regex;

use super::TraceError;
use super::models::TraceEvent;

const LINE_PREFIX: &str = "====";

const RESOLVING_PATTERN: &str =
    r"======== Resolving module '(?P<module>[^']+)' from '(?P<from>[^']+)'\. ========";

const RESOLVED_PATTERN: &str = r"======== Module name '(?P<module>[^']+)' was successfully resolved to '(?P<resolved>[^']+)'";

const NOT_RESOLVED_PATTERN: &str =
    r"======== Module name '(?P<module>[^']+)' was not resolved\. ========";

/// Classifies trace lines into [`TraceEvent`]s
#[derive(Debug, Clone)]
pub struct TraceMatcher {
    resolving: Regex,
    resolved: Regex,
    not_resolved: Regex,
}

impl TraceMatcher {
    /// Compile the three trace patterns
    pub fn new() -> Result<Self, TraceError> {
        Ok(Self {
            resolving: Regex::new(RESOLVING_PATTERN)?,
            resolved: Regex::new(RESOLVED_PATTERN)?,
            not_resolved: Regex::new(NOT_RESOLVED_PATTERN)?,
        })
    }

    /// Classify one line, returning `None` when it carries no resolution event
    pub fn classify(&self, line: &str) -> Option<TraceEvent> {
        if !line.starts_with(LINE_PREFIX) {
            return None;
        }

        if let Some(caps) = self.resolving.captures(line) {
            return Some(TraceEvent::Resolving {
                module: caps["module"].to_string(),
                from_file: caps["from"].to_string(),
            });
        }

        if let Some(caps) = self.resolved.captures(line) {
            return Some(TraceEvent::Resolved {
                module: caps["module"].to_string(),
                resolved_file: caps["resolved"].to_string(),
            });
        }

        self.not_resolved
            .captures(line)
            .map(|caps| TraceEvent::NotResolved {
                module: caps["module"].to_string(),
            })
    }
}
