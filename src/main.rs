//! Sougou-Search command-line entry point
//!
//! Prints the JSON (or Markdown) envelope to stdout in every case. Logs go
//! to stderr.

use anyhow::Context;
use clap::Parser;
use sougou_search::{
    config, render, Envelope, ErrorResponse, OutputFormat, SearchClient, SearchError,
    SearchRequest,
};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// Sougou AI Search
#[derive(Debug, Parser)]
#[command(name = "sougou-search", version, about)]
struct Cli {
    /// Search keywords
    #[arg(short, long)]
    query: String,

    /// Number of results (clamped to 1..=30) [default: 10]
    #[arg(short = 'n', long, allow_negative_numbers = true)]
    max_results: Option<i64>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
    format: OutputFormat,

    /// Request timeout in seconds [default: 20]
    #[arg(long)]
    timeout: Option<f64>,

    /// Path to settings.yml
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable debug logging on stderr
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    info!("Starting sougou-search v{}", sougou_search::VERSION);

    let envelope = run(&cli).await;
    println!("{}", render::render(&envelope, cli.format));

    if envelope.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

async fn run(cli: &Cli) -> Envelope {
    let settings = match config::load(cli.config.as_deref()).context("failed to load settings") {
        Ok(settings) => settings,
        Err(e) => {
            let err = SearchError::Unknown(format!("{:#}", e));
            return Envelope::Failure(ErrorResponse::from_error(cli.query.clone(), &err));
        }
    };
    debug!("Endpoint: {}", settings.upstream.endpoint());

    let request = SearchRequest::new(cli.query.clone())
        .with_max_results(cli.max_results.unwrap_or(settings.defaults.max_results))
        .with_timeout(cli.timeout.unwrap_or(settings.defaults.timeout))
        .with_format(cli.format);

    let client = match SearchClient::new(&settings) {
        Ok(client) => client,
        Err(e) => return Envelope::Failure(ErrorResponse::from_error(cli.query.clone(), &e)),
    };

    client.execute(&request).await
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
