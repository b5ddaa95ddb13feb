//! Streaming dump of resolved import edges

use anyhow::{Context, Result};
use serde::Serialize;
use std::io::Write;

use super::OutputFormat;
use crate::compiler::PathNormalizer;
use crate::trace::{ImportQuery, ImportSink};

/// One resolved import, with normalized paths
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImportEdge<'a> {
    pub from: &'a str,
    pub module: &'a str,
    pub to: &'a str,
}

/// Writes each resolved import as soon as the tracker finalizes it
pub struct EdgePrinter<'n, W: Write> {
    out: W,
    normalizer: &'n PathNormalizer,
    format: OutputFormat,
    printed: usize,
}

impl<'n, W: Write> EdgePrinter<'n, W> {
    pub fn new(out: W, normalizer: &'n PathNormalizer, format: OutputFormat) -> Self {
        Self {
            out,
            normalizer,
            format,
            printed: 0,
        }
    }

    /// Number of edges written so far
    pub fn printed(&self) -> usize {
        self.printed
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> ImportSink for EdgePrinter<'_, W> {
    fn accept(&mut self, query: &ImportQuery) -> Result<()> {
        let Some(resolved) = query.as_resolved() else {
            tracing::debug!(
                "Skipping unresolved '{}' from {}",
                query.module,
                query.from_file
            );
            return Ok(());
        };

        let edge = ImportEdge {
            from: self.normalizer.normalize(resolved.from_file),
            module: resolved.module,
            to: self.normalizer.normalize(resolved.resolved_file),
        };

        let written = match self.format {
            OutputFormat::Text => writeln!(self.out, "{} -> {}", edge.from, edge.to),
            OutputFormat::Json => {
                let line = serde_json::to_string(&edge).context("Failed to serialize edge")?;
                writeln!(self.out, "{}", line)
            }
        };
        written.context("Failed to write import edge")?;

        self.printed += 1;
        Ok(())
    }
}
