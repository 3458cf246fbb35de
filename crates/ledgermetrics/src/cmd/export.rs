//! The export command.
//!
//! Runs the hledger reports, derives every metric and writes them to stdout.
//! Nothing is written to stdout unless every step succeeds.

use crate::config::ExportConfig;
use crate::exposition::write_exposition;
use crate::metrics::{derive_metrics, fetch_reports};
use anyhow::{Context, Result};
use clap::Parser;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Export hledger balances, transactions, exchange rates and budgets as
/// OpenMetrics.
#[derive(Parser, Debug)]
#[command(name = "ledgermetrics", version, about)]
pub struct Args {
    /// Journal file passed to hledger (hledger's default otherwise).
    #[arg(short, long, value_name = "FILE")]
    pub file: Option<PathBuf>,
}

/// Main entry point.
pub fn main() -> ExitCode {
    let args = Args::parse();

    // Logs go to stderr; stdout carries the exposition
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::from(1)
        }
    }
}

/// Run the export with the given arguments.
pub fn run(args: &Args) -> Result<()> {
    let config = ExportConfig::from_env(args.file.clone())?;
    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());
    export(&config, &mut out)?;
    out.flush().context("failed to write metrics")
}

/// Export everything `config` describes to `out`.
pub fn export<W: Write>(config: &ExportConfig, out: &mut W) -> Result<()> {
    let reports = fetch_reports(&config.source())?;
    let metrics = derive_metrics(&reports, &config.resolver())?;
    write_exposition(out, &metrics).context("failed to write metrics")
}
