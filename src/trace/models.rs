//! Data structures for trace events and import queries

use serde::Serialize;

/// A single classified line of `tsc --traceResolution` output
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TraceEvent {
    /// `======== Resolving module '<module>' from '<from_file>'. ========`
    Resolving { module: String, from_file: String },
    /// `======== Module name '<module>' was successfully resolved to '<resolved_file>'`
    Resolved {
        module: String,
        resolved_file: String,
    },
    /// `======== Module name '<module>' was not resolved. ========`
    NotResolved { module: String },
}

impl TraceEvent {
    /// Module specifier this event refers to
    pub fn module(&self) -> &str {
        match self {
            TraceEvent::Resolving { module, .. }
            | TraceEvent::Resolved { module, .. }
            | TraceEvent::NotResolved { module } => module,
        }
    }
}

/// A module resolution attempt, either in flight or finalized
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportQuery {
    /// File containing the import statement, as printed by the compiler
    pub from_file: String,
    /// Module specifier used by the import statement
    pub module: String,
    /// Concrete file the specifier resolved to; `None` until resolved
    pub resolved_file: Option<String>,
}

impl ImportQuery {
    pub fn new(from_file: impl Into<String>, module: impl Into<String>) -> Self {
        Self {
            from_file: from_file.into(),
            module: module.into(),
            resolved_file: None,
        }
    }

    pub fn is_resolved(&self) -> bool {
        self.resolved_file.is_some()
    }

    /// Borrow this query as a resolved import fact, if it was resolved
    pub fn as_resolved(&self) -> Option<ResolvedImport<'_>> {
        self.resolved_file
            .as_deref()
            .map(|resolved_file| ResolvedImport {
                from_file: &self.from_file,
                module: &self.module,
                resolved_file,
            })
    }
}

/// A confirmed `from_file --module--> resolved_file` mapping
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedImport<'a> {
    pub from_file: &'a str,
    pub module: &'a str,
    pub resolved_file: &'a str,
}

/// Counters collected while consuming a trace
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TraceSummary {
    /// Lines read from the source
    pub lines: usize,
    /// Lines that matched one of the three event patterns
    pub events: usize,
    /// Queries finalized as resolved
    pub resolved: usize,
    /// Queries finalized as not resolved
    pub not_resolved: usize,
    /// Queries still awaiting an outcome when the input ended
    pub pending: Vec<ImportQuery>,
}
