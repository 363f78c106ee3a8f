//! Binary entry point for `issue-labeler`.
//!
//! This module provides the command-line interface with options for the
//! configuration file, the event context and logging verbosity. It runs the
//! hook once and records any failure for the workflow runner.

use std::process::ExitCode;

use clap::Parser;
use issue_labeler::base::{
    config::Config,
    context::ContextOverrides,
    types::{Err, Res, Void},
    workflow,
};
use opentelemetry::trace::TracerProvider;
use opentelemetry_otlp::{Protocol, WithExportConfig};
use tracing::{error, warn};
use tracing_subscriber::{fmt::format::FmtSpan, layer::SubscriberExt, util::SubscriberInitExt};

/// Issue-labeler – labels new GitHub issues and clears triage labels.
///
/// Inputs come from `INPUT_*` environment variables (as set by GitHub Actions)
/// or a `config.toml`. The repository and issue are taken from
/// `GITHUB_REPOSITORY` and the payload at `GITHUB_EVENT_PATH` unless given here.
#[derive(Parser, Debug)]
#[command(version, author, about, long_about = None)]
struct Args {
    /// Override the config file path (optional).
    ///
    /// By default, the hook will look for a config file at `.hidden/config.toml`
    /// in the current directory.
    #[arg(short, long)]
    config: Option<std::path::PathBuf>,
    /// The repository to act on, as `owner/repo`.
    #[arg(long)]
    repository: Option<String>,
    /// The issue number to act on.
    #[arg(long)]
    issue: Option<u64>,
    /// Export spans over OTLP/HTTP.
    #[arg(long)]
    otlp: bool,
    /// Increase log verbosity (-v, -vv, etc.).
    ///
    /// Use multiple times to increase verbosity:
    /// - No flag: INFO level (DEBUG when `RUNNER_DEBUG=1`)
    /// - -v: DEBUG level
    /// - -vv or more: TRACE level
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Main entry point for the issue-labeler binary.
///
/// Sets up logging, loads configuration, runs the hook, and reports failure
/// through an `::error::` workflow command and a non-zero exit code.
#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    if let Err(err) = init_tracing(&args) {
        eprintln!("Failed to initialize logging: {err:#}");
    }

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{:#}", err);
            println!("{}", workflow::error_command(&format!("{err:#}")));
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> Void {
    let config = Config::load(args.config.as_deref())?;

    let overrides = ContextOverrides {
        repository: args.repository,
        issue_number: args.issue,
    };

    issue_labeler::start(config, overrides).await
}

fn init_tracing(args: &Args) -> Void {
    // Construct the level filter.

    let runner_debug = std::env::var("RUNNER_DEBUG").is_ok_and(|v| v == "1");

    let level = match args.verbose {
        0 if runner_debug => tracing::Level::DEBUG,
        0 => tracing::Level::INFO,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    let level_filter = tracing_subscriber::filter::LevelFilter::from_level(level);

    // Prepare the log layer.

    let stdout = tracing_subscriber::fmt::layer()
        .without_time()
        .with_ansi(true)
        .with_level(true)
        .with_file(false)
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_span_events(FmtSpan::NEW | FmtSpan::CLOSE);

    // Prepare the otlp layer, if asked for.

    let (otel, otel_err) = optional_layer(args.otlp, || {
        let exporter = opentelemetry_otlp::SpanExporter::builder().with_http().with_protocol(Protocol::HttpBinary).build()?;
        let tracer = opentelemetry_sdk::trace::SdkTracerProvider::builder().with_simple_exporter(exporter).build().tracer("issue-labeler");
        Ok(tracing_opentelemetry::layer().with_tracer(tracer))
    });

    tracing_subscriber::registry().with(otel).with(level_filter).with(stdout).try_init()?;

    // Reported only now so the message reaches the stdout layer.
    if let Some(err) = otel_err {
        warn!("OTLP export disabled: {}", err);
    }

    Ok(())
}

/// Build an optional layer; a failed build leaves the layer out and hands back the error.
fn optional_layer<L>(enabled: bool, build: impl FnOnce() -> Res<L>) -> (Option<L>, Option<Err>) {
    if !enabled {
        return (None, None);
    }

    match build() {
        Ok(layer) => (Some(layer), None),
        Err(err) => (None, Some(err)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disabled_layer_is_never_built() {
        let (layer, err) = optional_layer::<u8>(false, || panic!("should not build"));

        assert!(layer.is_none());
        assert!(err.is_none());
    }

    #[test]
    fn failed_layer_build_is_reported_not_raised() {
        let (layer, err) = optional_layer::<u8>(true, || Err(anyhow::anyhow!("no exporter")));

        assert!(layer.is_none());
        assert_eq!(err.unwrap().to_string(), "no exporter");
    }

    #[test]
    fn built_layer_is_kept() {
        let (layer, err) = optional_layer(true, || Ok(7u8));

        assert_eq!(layer, Some(7));
        assert!(err.is_none());
    }
}
