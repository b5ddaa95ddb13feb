//! Compiler driver
//!
//! Runs the TypeScript compiler with resolution tracing enabled and streams
//! its stdout through the trace parser, or replays a previously captured
//! trace from a file or stdin.

mod normalize;

pub use normalize::PathNormalizer;

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::io::BufReader;
use tokio::process::Command;

use crate::config::CompilerConfig;
use crate::trace::{self, ImportSink, TraceMatcher, TraceSummary};

/// Where trace lines come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TraceInput {
    /// Spawn the configured compiler and read its stdout
    Compiler,
    /// Read a captured trace from a file
    File(PathBuf),
    /// Read a captured trace from stdin
    Stdin,
}

impl TraceInput {
    /// Map the `--input` argument; `-` means stdin
    pub fn from_arg(arg: Option<PathBuf>) -> Self {
        match arg {
            None => TraceInput::Compiler,
            Some(path) if path.as_os_str() == "-" => TraceInput::Stdin,
            Some(path) => TraceInput::File(path),
        }
    }
}

/// Feed the chosen input through the trace parser
pub async fn collect_trace<S>(
    input: &TraceInput,
    config: &CompilerConfig,
    working_dir: &Path,
    matcher: &TraceMatcher,
    sink: &mut S,
) -> Result<TraceSummary>
where
    S: ImportSink + ?Sized,
{
    let summary = match input {
        TraceInput::Compiler => run_compiler(config, working_dir, matcher, sink).await?,
        TraceInput::File(path) => {
            tracing::debug!("Reading trace from file: {}", path.display());
            let file = tokio::fs::File::open(path)
                .await
                .with_context(|| format!("Failed to open trace file: {}", path.display()))?;
            trace::parse_trace(BufReader::new(file), matcher, sink)
                .await
                .with_context(|| format!("Failed to parse trace file: {}", path.display()))?
        }
        TraceInput::Stdin => {
            tracing::debug!("Reading trace from stdin");
            trace::parse_trace(BufReader::new(tokio::io::stdin()), matcher, sink)
                .await
                .context("Failed to parse trace from stdin")?
        }
    };

    for query in &summary.pending {
        tracing::info!(
            "No outcome for '{}' imported from {}",
            query.module,
            query.from_file
        );
    }

    Ok(summary)
}

/// Spawn the compiler and parse its trace as it is produced
///
/// The tracker runs inline on each stdout line. If parsing fails the
/// compiler is killed and the parse error is returned.
pub async fn run_compiler<S>(
    config: &CompilerConfig,
    working_dir: &Path,
    matcher: &TraceMatcher,
    sink: &mut S,
) -> Result<TraceSummary>
where
    S: ImportSink + ?Sized,
{
    let mut command = build_command(config, working_dir);
    tracing::info!("Running compiler: {:?}", command.as_std());

    let mut child = command.spawn().with_context(|| {
        format!(
            "Failed to start `{}`; is it installed and on PATH?",
            config.command
        )
    })?;

    let stdout = child
        .stdout
        .take()
        .context("Compiler stdout was not captured")?;

    let summary = match trace::parse_trace(BufReader::new(stdout), matcher, sink).await {
        Ok(summary) => summary,
        Err(e) => {
            if let Err(kill_err) = child.kill().await {
                tracing::warn!("Failed to stop compiler after parse error: {}", kill_err);
            }
            return Err(e).context("Failed to parse compiler trace");
        }
    };

    let status = child
        .wait()
        .await
        .context("Failed to wait for compiler")?;

    if !status.success() {
        if config.ignore_exit_status {
            tracing::warn!("`{}` exited with {}, ignoring", config.command, status);
        } else {
            anyhow::bail!(
                "`{}` exited with {} (set compiler.ignoreExitStatus to accept this)",
                config.command,
                status
            );
        }
    }

    Ok(summary)
}

fn build_command(config: &CompilerConfig, working_dir: &Path) -> Command {
    let mut command = Command::new(&config.command);
    command.args(&config.args);
    if let Some(project) = &config.project {
        command.arg("--project").arg(project);
    }
    command
        .current_dir(working_dir)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::inherit())
        .kill_on_drop(true);
    command
}
