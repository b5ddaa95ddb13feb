//! Resolution tracker
//!
//! Pairs `Resolving` events with their `Resolved` / `NotResolved` outcome and
//! hands each finalized query to an [`ImportSink`] before the next line is
//! processed.

use std::collections::HashMap;

use super::TraceError;
use super::matcher::TraceMatcher;
use super::models::{ImportQuery, TraceEvent, TraceSummary};

/// Consumer of finalized import queries
///
/// Called once per finalized query, in trace order. Resolved queries carry a
/// `resolved_file`; not-resolved queries are delivered with `None` so the
/// consumer can log them. An error aborts the parse.
#[cfg_attr(test, mockall::automock)]
pub trait ImportSink {
    fn accept(&mut self, query: &ImportQuery) -> anyhow::Result<()>;
}

impl<F> ImportSink for F
where
    F: FnMut(&ImportQuery) -> anyhow::Result<()>,
{
    fn accept(&mut self, query: &ImportQuery) -> anyhow::Result<()> {
        self(query)
    }
}

/// Streaming state machine over trace lines
#[derive(Debug)]
pub struct ResolutionTracker<'m> {
    matcher: &'m TraceMatcher,
    pending: HashMap<String, ImportQuery>,
    summary: TraceSummary,
}

impl<'m> ResolutionTracker<'m> {
    pub fn new(matcher: &'m TraceMatcher) -> Self {
        Self {
            matcher,
            pending: HashMap::new(),
            summary: TraceSummary::default(),
        }
    }

    /// Classify and apply a single trace line
    pub fn feed_line<S>(&mut self, line: &str, sink: &mut S) -> Result<(), TraceError>
    where
        S: ImportSink + ?Sized,
    {
        self.summary.lines += 1;
        match self.matcher.classify(line) {
            Some(event) => self.apply(event, sink),
            None => Ok(()),
        }
    }

    /// Apply an already classified event
    pub fn apply<S>(&mut self, event: TraceEvent, sink: &mut S) -> Result<(), TraceError>
    where
        S: ImportSink + ?Sized,
    {
        self.summary.events += 1;

        match event {
            TraceEvent::Resolving { module, from_file } => {
                if let Some(existing) = self.pending.get(&module) {
                    return Err(TraceError::DuplicateQuery {
                        module,
                        from_file: existing.from_file.clone(),
                    });
                }
                let query = ImportQuery::new(from_file, module.clone());
                self.pending.insert(module, query);
            }
            TraceEvent::Resolved {
                module,
                resolved_file,
            } => {
                let Some(mut query) = self.pending.remove(&module) else {
                    return Err(TraceError::ResolvedWithoutQuery {
                        module,
                        resolved_file,
                    });
                };
                query.resolved_file = Some(resolved_file);
                self.summary.resolved += 1;
                tracing::trace!(
                    "Resolved '{}' from {} to {:?}",
                    query.module,
                    query.from_file,
                    query.resolved_file
                );
                sink.accept(&query)?;
            }
            TraceEvent::NotResolved { module } => {
                // An outcome with nothing pending belongs to a query that was
                // already finalized; drop it silently.
                if let Some(query) = self.pending.remove(&module) {
                    self.summary.not_resolved += 1;
                    tracing::trace!("Not resolved '{}' from {}", query.module, query.from_file);
                    sink.accept(&query)?;
                }
            }
        }

        Ok(())
    }

    /// Queries currently awaiting an outcome
    pub fn pending(&self) -> impl Iterator<Item = &ImportQuery> {
        self.pending.values()
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Stop tracking and return the run summary, including leftover pending
    /// queries sorted by module specifier
    pub fn finish(self) -> TraceSummary {
        let mut summary = self.summary;
        let mut pending: Vec<ImportQuery> = self.pending.into_values().collect();
        pending.sort_by(|a, b| a.module.cmp(&b.module));
        summary.pending = pending;
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolving(module: &str, from: &str) -> TraceEvent {
        TraceEvent::Resolving {
            module: module.to_string(),
            from_file: from.to_string(),
        }
    }

    fn resolved(module: &str, to: &str) -> TraceEvent {
        TraceEvent::Resolved {
            module: module.to_string(),
            resolved_file: to.to_string(),
        }
    }

    fn not_resolved(module: &str) -> TraceEvent {
        TraceEvent::NotResolved {
            module: module.to_string(),
        }
    }

    #[test]
    fn test_resolved_query_is_emitted_once() {
        let matcher = TraceMatcher::new().unwrap();
        let mut tracker = ResolutionTracker::new(&matcher);
        let mut sink = MockImportSink::new();
        sink.expect_accept()
            .withf(|q| {
                q.from_file == "f1" && q.module == "x" && q.resolved_file.as_deref() == Some("f2")
            })
            .times(1)
            .returning(|_| Ok(()));

        tracker.apply(resolving("x", "f1"), &mut sink).unwrap();
        tracker.apply(resolved("x", "f2"), &mut sink).unwrap();
        assert_eq!(tracker.pending_len(), 0);
    }

    #[test]
    fn test_not_resolved_is_delivered_unresolved() {
        let matcher = TraceMatcher::new().unwrap();
        let mut tracker = ResolutionTracker::new(&matcher);
        let mut sink = MockImportSink::new();
        sink.expect_accept()
            .withf(|q| q.module == "gone" && !q.is_resolved())
            .times(1)
            .returning(|_| Ok(()));

        tracker.apply(resolving("gone", "a.ts"), &mut sink).unwrap();
        tracker.apply(not_resolved("gone"), &mut sink).unwrap();

        let summary = tracker.finish();
        assert_eq!(summary.not_resolved, 1);
        assert_eq!(summary.resolved, 0);
    }

    #[test]
    fn test_orphan_not_resolved_is_silent() {
        let matcher = TraceMatcher::new().unwrap();
        let mut tracker = ResolutionTracker::new(&matcher);
        let mut sink = MockImportSink::new();
        sink.expect_accept().times(0);

        tracker.apply(not_resolved("never-asked"), &mut sink).unwrap();
    }

    #[test]
    fn test_resolved_without_query_is_inconsistent() {
        let matcher = TraceMatcher::new().unwrap();
        let mut tracker = ResolutionTracker::new(&matcher);
        let mut sink = MockImportSink::new();
        sink.expect_accept().times(0);

        let err = tracker.apply(resolved("x", "f2"), &mut sink).unwrap_err();
        assert!(err.is_state_inconsistency());
        assert!(matches!(err, TraceError::ResolvedWithoutQuery { .. }));
    }

    #[test]
    fn test_duplicate_resolving_is_inconsistent() {
        let matcher = TraceMatcher::new().unwrap();
        let mut tracker = ResolutionTracker::new(&matcher);
        let mut sink = MockImportSink::new();

        tracker.apply(resolving("x", "a.ts"), &mut sink).unwrap();
        let err = tracker.apply(resolving("x", "b.ts"), &mut sink).unwrap_err();
        match err {
            TraceError::DuplicateQuery { module, from_file } => {
                assert_eq!(module, "x");
                assert_eq!(from_file, "a.ts");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_sink_error_propagates() {
        let matcher = TraceMatcher::new().unwrap();
        let mut tracker = ResolutionTracker::new(&matcher);
        let mut sink = MockImportSink::new();
        sink.expect_accept()
            .times(1)
            .returning(|_| Err(anyhow::anyhow!("sink is full")));

        tracker.apply(resolving("x", "a.ts"), &mut sink).unwrap();
        let err = tracker.apply(resolved("x", "b.ts"), &mut sink).unwrap_err();
        assert!(matches!(err, TraceError::Sink(_)));
        assert!(!err.is_state_inconsistency());
        assert_eq!(err.to_string(), "sink is full");
    }

    #[test]
    fn test_specifier_can_be_queried_again_after_outcome() {
        let matcher = TraceMatcher::new().unwrap();
        let mut tracker = ResolutionTracker::new(&matcher);
        let mut seen = Vec::new();
        let mut sink = |q: &ImportQuery| -> anyhow::Result<()> {
            seen.push(q.from_file.clone());
            Ok(())
        };

        tracker.apply(resolving("x", "a.ts"), &mut sink).unwrap();
        tracker.apply(resolved("x", "x.ts"), &mut sink).unwrap();
        tracker.apply(resolving("x", "b.ts"), &mut sink).unwrap();
        tracker.apply(resolved("x", "x.ts"), &mut sink).unwrap();

        assert_eq!(seen, vec!["a.ts".to_string(), "b.ts".to_string()]);
    }

    #[test]
    fn test_finish_reports_pending_sorted() {
        let matcher = TraceMatcher::new().unwrap();
        let mut tracker = ResolutionTracker::new(&matcher);
        let mut sink = |_: &ImportQuery| -> anyhow::Result<()> { Ok(()) };

        tracker.apply(resolving("zeta", "a.ts"), &mut sink).unwrap();
        tracker.apply(resolving("alpha", "a.ts"), &mut sink).unwrap();
        assert_eq!(tracker.pending().count(), 2);

        let summary = tracker.finish();
        let modules: Vec<&str> = summary.pending.iter().map(|q| q.module.as_str()).collect();
        assert_eq!(modules, vec!["alpha", "zeta"]);
        assert_eq!(summary.events, 2);
    }

    #[test]
    fn test_feed_line_skips_unmatched_lines() {
        let matcher = TraceMatcher::new().unwrap();
        let mut tracker = ResolutionTracker::new(&matcher);
        let mut sink = MockImportSink::new();
        sink.expect_accept().times(0);

        tracker
            .feed_line("File '/repo/a.ts' exists - use it as a name resolution result.", &mut sink)
            .unwrap();

        let summary = tracker.finish();
        assert_eq!(summary.lines, 1);
        assert_eq!(summary.events, 0);
    }
}
