//! Dump and why command execution

use anyhow::Result;
use std::path::Path;

use crate::compiler::{self, PathNormalizer, TraceInput};
use crate::config::Config;
use crate::report::{EdgePrinter, GraphBuilder, ModulePattern, OutputFormat, WhyReport};
use crate::trace::TraceMatcher;

/// Options shared by the dump and why modes
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Pattern of module paths to explain; dump mode when `None`
    pub why: Option<String>,
    pub input: TraceInput,
    pub format: OutputFormat,
    /// Overrides `compiler.project`
    pub project: Option<String>,
}

/// Run the compiler (or replay a trace) and print the requested report
pub async fn run(options: RunOptions, config: &Config, working_dir: &Path) -> Result<()> {
    let matcher = TraceMatcher::new()?;
    let normalizer = PathNormalizer::new(working_dir, &config.paths);

    let mut compiler_config = config.compiler.clone();
    if let Some(project) = options.project {
        compiler_config.project = Some(project);
    }

    match options.why {
        Some(pattern) => {
            let pattern = ModulePattern::parse(&pattern);
            let mut builder = GraphBuilder::new(&normalizer);
            compiler::collect_trace(
                &options.input,
                &compiler_config,
                working_dir,
                &matcher,
                &mut builder,
            )
            .await?;

            let (graph, root) = builder.finish();
            tracing::info!(
                "Import graph built: {} files, {} edges",
                graph.len(),
                graph.edge_count()
            );

            let report = WhyReport::build(&graph, root, &pattern);
            tracing::info!(
                "{} modules match {:?}, {} reachable from the root",
                report.total(),
                report.pattern,
                report.reachable().count()
            );
            report.render(&mut std::io::stdout(), options.format)?;
        }
        None => {
            let mut printer = EdgePrinter::new(std::io::stdout(), &normalizer, options.format);
            compiler::collect_trace(
                &options.input,
                &compiler_config,
                working_dir,
                &matcher,
                &mut printer,
            )
            .await?;
            tracing::info!("Printed {} import edges", printer.printed());
        }
    }

    Ok(())
}
