//! duwalk - Recursive Disk-Usage Reporter
//!
//! Entry point for the CLI application.

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use duwalk::config::{CliArgs, DuConfig};
use duwalk::walker::Walker;
use std::io::{self, Write};
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    // More than two non-program arguments is a usage request, not an
    // error: show help and exit cleanly.
    if std::env::args_os().count() > 3 {
        let _ = CliArgs::command().print_help();
        return ExitCode::SUCCESS;
    }

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    // Parse CLI arguments
    let args = CliArgs::parse();

    // Setup logging
    setup_logging(args.verbose);

    // Validate and create config
    let config = DuConfig::from_args(args).context("Invalid configuration")?;

    // Report lines stream to stdout as the tree is visited; diagnostics
    // go to stderr so the two-column output stays machine readable.
    let stdout = io::stdout().lock();
    let mut out = io::BufWriter::new(stdout);

    let (total, stats) = {
        let mut walker = Walker::new(config.all_files, &mut out);
        let total = walker
            .run(&config.root, &config.display_path)
            .context("Walk failed")?;
        (total, walker.stats())
    };

    out.flush().context("Failed to flush output")?;

    info!(
        total,
        dirs = stats.dirs,
        files = stats.files,
        deduped = stats.deduped,
        errors = stats.errors,
        "walk complete"
    );

    Ok(())
}

fn setup_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("duwalk=debug,warn")
    } else {
        EnvFilter::new("duwalk=warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}
