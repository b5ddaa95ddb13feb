//! "Why is this module here" report

use anyhow::{Context, Result};
use serde::Serialize;
use std::io::Write;

use super::{ModulePattern, OutputFormat};
use crate::compiler::PathNormalizer;
use crate::graph::{ImportGraph, NodeId};
use crate::trace::{ImportQuery, ImportSink};

/// Builds the import graph from finalized queries
///
/// The root is the importing file of the first resolved import.
pub struct GraphBuilder<'n> {
    graph: ImportGraph,
    root: Option<NodeId>,
    normalizer: &'n PathNormalizer,
}

impl<'n> GraphBuilder<'n> {
    pub fn new(normalizer: &'n PathNormalizer) -> Self {
        Self {
            graph: ImportGraph::new(),
            root: None,
            normalizer,
        }
    }

    pub fn finish(self) -> (ImportGraph, Option<NodeId>) {
        (self.graph, self.root)
    }
}

impl ImportSink for GraphBuilder<'_> {
    fn accept(&mut self, query: &ImportQuery) -> Result<()> {
        let Some(resolved) = query.as_resolved() else {
            tracing::debug!(
                "'{}' from {} was not resolved, no edge added",
                query.module,
                query.from_file
            );
            return Ok(());
        };

        let from = self.normalizer.normalize(resolved.from_file);
        let to = self.normalizer.normalize(resolved.resolved_file);
        if self.root.is_none() {
            tracing::debug!("Root file: {}", from);
            self.root = Some(self.graph.node(from));
        }
        self.graph.add_edge(from, to);
        Ok(())
    }
}

/// One module matching the pattern
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WhyMatch {
    pub module: String,
    /// Labels from the root to this module; `None` when it is unreachable
    pub path: Option<Vec<String>>,
}

/// Paths from the root to every module matching a pattern
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WhyReport {
    pub pattern: String,
    pub root: Option<String>,
    pub matches: Vec<WhyMatch>,
}

impl WhyReport {
    /// Search a path from `root` to every node whose label matches `pattern`,
    /// visiting nodes in creation order
    pub fn build(graph: &ImportGraph, root: Option<NodeId>, pattern: &ModulePattern) -> Self {
        let matches = graph
            .nodes()
            .filter(|&id| pattern.matches(graph.label(id)))
            .map(|id| {
                let path = root.and_then(|root| graph.find_path(root, id)).map(|p| {
                    p.labels(graph)
                        .into_iter()
                        .map(str::to_string)
                        .collect::<Vec<_>>()
                });
                if path.is_none() {
                    tracing::debug!("'{}' is not reachable from the root", graph.label(id));
                }
                WhyMatch {
                    module: graph.label(id).to_string(),
                    path,
                }
            })
            .collect();

        Self {
            pattern: pattern.as_str().to_string(),
            root: root.map(|id| graph.label(id).to_string()),
            matches,
        }
    }

    /// Number of matching modules, reachable or not
    pub fn total(&self) -> usize {
        self.matches.len()
    }

    pub fn reachable(&self) -> impl Iterator<Item = &WhyMatch> {
        self.matches.iter().filter(|m| m.path.is_some())
    }

    pub fn render<W: Write>(&self, out: &mut W, format: OutputFormat) -> Result<()> {
        match format {
            OutputFormat::Text => self.render_text(out),
            OutputFormat::Json => {
                serde_json::to_writer_pretty(&mut *out, self)
                    .context("Failed to serialize why report")?;
                writeln!(out).context("Failed to write why report")
            }
        }
    }

    fn render_text<W: Write>(&self, out: &mut W) -> Result<()> {
        for path in self.matches.iter().filter_map(|m| m.path.as_ref()) {
            write!(out, "{}\n\n", path.join(" ->\n")).context("Failed to write path")?;
        }
        writeln!(
            out,
            "total modules matching {:?}: {}",
            self.pattern,
            self.total()
        )
        .context("Failed to write summary")?;
        Ok(())
    }
}
