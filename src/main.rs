//! tswhy - explain why a module ended up in a TypeScript program
//!
//! Runs `tsc --traceResolution`, reconstructs the resolved import graph from
//! the trace, and prints either every import edge or the path from the root
//! file to each module matching a pattern.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use tswhy::cli::{self, ConfigSubcommand, RunOptions};
use tswhy::compiler::TraceInput;
use tswhy::config::ConfigLoader;
use tswhy::report::OutputFormat;

/// tswhy - explain why a module ended up in a TypeScript program
#[derive(Parser, Debug)]
#[command(name = "tswhy")]
#[command(about = "Explain why a module was imported, from tsc --traceResolution output", long_about = None)]
struct Args {
    /// Regex pattern for a module path to explain why it was imported
    #[arg(long, value_name = "PATTERN")]
    why: Option<String>,

    /// Read a captured trace from a file ("-" for stdin) instead of running the compiler
    #[arg(long, short = 'i', value_name = "FILE")]
    input: Option<PathBuf>,

    /// Project passed to the compiler as --project
    #[arg(long, short = 'p')]
    project: Option<String>,

    /// Output format
    #[arg(long, short = 'f', value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Enable debug logging
    #[arg(long, short = 'd')]
    debug: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

/// Main commands
#[derive(Subcommand, Debug)]
enum Command {
    /// Configuration management
    Config {
        #[command(subcommand)]
        subcommand: ConfigSubcommand,
    },
    /// Show version information
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let working_dir = std::env::current_dir().context("Failed to determine working directory")?;

    match args.command {
        Some(Command::Config { subcommand }) => {
            return cli::handle_config_command(subcommand, &working_dir);
        }
        Some(Command::Version) => {
            cli::display_version();
            return Ok(());
        }
        None => {}
    }

    // Invalid config is reported, not fatal: defaults still let the run proceed
    let config = ConfigLoader::load(&working_dir).unwrap_or_else(|e| {
        eprintln!("Ignoring invalid configuration: {:#}", e);
        ConfigLoader::load_defaults()
    });

    let log_file = cli::init_logging(args.debug, &config.logger.level)?;
    if let Some(ref log_path) = log_file {
        eprintln!(
            "Debug logging enabled. Logs written to: {}",
            log_path.display()
        );
    }

    // Config is loaded before the subscriber exists, so its layers are logged here
    for layer in ConfigLoader::layers(&working_dir) {
        tracing::debug!("Merged config layer: {}", layer.display());
    }
    tracing::debug!(
        "Configuration loaded: compiler={}, args={:?}, project={:?}",
        config.compiler.command,
        config.compiler.args,
        config.compiler.project
    );

    let options = RunOptions {
        why: args.why,
        input: TraceInput::from_arg(args.input),
        format: args.format,
        project: args.project,
    };

    cli::run(options, &config, &working_dir).await
}
