//! tswhy library
//!
//! Parses the module resolution trace printed by `tsc --traceResolution`,
//! builds the resulting import graph, and explains how a module was reached.
//! It can be used both as a binary and as a library for testing.

pub mod cli;
pub mod compiler;
pub mod config;
pub mod graph;
pub mod report;
pub mod trace;

// Re-export commonly used types for convenience
pub use graph::{ImportGraph, ImportPath, NodeId};
pub use trace::{ImportQuery, ImportSink, ResolutionTracker, TraceError, TraceEvent, TraceMatcher};
