//! Module resolution trace parsing
//!
//! Turns the line-oriented output of `tsc --traceResolution` into finalized
//! import queries. Three line kinds matter: a query starting, a query
//! resolving to a file, and a query failing to resolve. Everything else in
//! the trace is skipped.

mod matcher;
mod models;
mod tracker;

pub use matcher::TraceMatcher;
pub use models::{ImportQuery, ResolvedImport, TraceEvent, TraceSummary};
pub use tracker::{ImportSink, ResolutionTracker};

use tokio::io::{AsyncBufRead, AsyncBufReadExt};

/// Trace parsing errors
#[derive(Debug, thiserror::Error)]
pub enum TraceError {
    #[error("Module '{module}' is already being resolved from '{from_file}'")]
    DuplicateQuery { module: String, from_file: String },

    #[error("Module '{module}' was resolved to '{resolved_file}' but never queried")]
    ResolvedWithoutQuery {
        module: String,
        resolved_file: String,
    },

    #[error("Invalid trace pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("Failed to read trace input: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Sink(#[from] anyhow::Error),
}

impl TraceError {
    /// Whether the trace contradicted the one-query-per-specifier nesting
    pub fn is_state_inconsistency(&self) -> bool {
        matches!(
            self,
            TraceError::DuplicateQuery { .. } | TraceError::ResolvedWithoutQuery { .. }
        )
    }
}

/// Feed every line of `reader` through a fresh tracker
///
/// Lines that are not valid UTF-8 are decoded lossily, never rejected. Stops at the first error. Queries left pending at end of input are
/// returned in the summary rather than treated as failures.
pub async fn parse_trace<R, S>(
    reader: R,
    matcher: &TraceMatcher,
    sink: &mut S,
) -> Result<TraceSummary, TraceError>
where
    R: AsyncBufRead + Unpin,
    S: ImportSink + ?Sized,
{
    let mut tracker = ResolutionTracker::new(matcher);
    let mut lines = reader.split(b'\n');

    // Traces can carry file names in any encoding, so lines are decoded lossily
    while let Some(bytes) = lines.next_segment().await? {
        let line = String::from_utf8_lossy(&bytes);
        tracker.feed_line(line.strip_suffix('\r').unwrap_or(&line), sink)?;
    }

    let summary = tracker.finish();
    tracing::debug!(
        "Trace parsed: {} lines, {} events, {} resolved, {} not resolved, {} pending",
        summary.lines,
        summary.events,
        summary.resolved,
        summary.not_resolved,
        summary.pending.len()
    );

    Ok(summary)
}
