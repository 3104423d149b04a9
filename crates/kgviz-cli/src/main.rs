//! KGViz CLI
//!
//! Serves the Cypher read / PxLSViz transform API and runs one-off queries
//! and transforms from the command line.

use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    fmt::writer::BoxMakeWriter, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter,
};

mod commands;
mod output;

use commands::{Cli, Commands, LogFormat};

/// Build the log filter: `RUST_LOG`, then `LOG_LEVEL`, then crate defaults.
fn env_filter(verbose: bool) -> EnvFilter {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return filter;
    }
    if let Ok(level) = std::env::var("LOG_LEVEL") {
        if let Ok(filter) = EnvFilter::try_new(level.to_lowercase()) {
            return filter;
        }
    }

    let level = if verbose { "debug" } else { "info" };
    EnvFilter::new(format!(
        "kgviz={level},kgviz_core={level},kgviz_graph={level},kgviz_web={level},tower_http=info"
    ))
}

/// Initialize tracing.
///
/// Console output goes to stdout for `serve` and to stderr for the one-off
/// commands, whose stdout carries JSON. With a log directory, JSON lines are
/// also written to a daily-rotated file; the returned guard flushes it on drop.
fn init_tracing(
    format: LogFormat,
    log_dir: Option<&Path>,
    verbose: bool,
    to_stderr: bool,
) -> Result<Option<WorkerGuard>> {
    let console_writer = || {
        if to_stderr {
            BoxMakeWriter::new(std::io::stderr)
        } else {
            BoxMakeWriter::new(std::io::stdout)
        }
    };

    let (json_console, pretty_console) = match format {
        LogFormat::Json => (
            Some(tracing_subscriber::fmt::layer().json().with_writer(console_writer())),
            None,
        ),
        LogFormat::Pretty => (
            None,
            Some(tracing_subscriber::fmt::layer().with_writer(console_writer())),
        ),
    };

    let (file_layer, guard) = match log_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create log directory {}", dir.display()))?;
            let appender = tracing_appender::rolling::daily(dir, "kgviz.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = tracing_subscriber::fmt::layer()
                .json()
                .with_writer(writer)
                .with_ansi(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(env_filter(verbose))
        .with(json_console)
        .with(pretty_console)
        .with(file_layer)
        .init();

    Ok(guard)
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    let cli = Cli::parse();

    let to_stderr = !matches!(cli.command, Commands::Serve(_));
    let _guard = init_tracing(cli.log_format, cli.log_dir.as_deref(), cli.verbose, to_stderr)?;

    cli.execute().await
}
