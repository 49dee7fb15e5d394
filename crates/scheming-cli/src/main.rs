//! # scheming CLI Entry Point
//!
//! Parses arguments, initializes tracing, and maps the check report to an
//! exit code: 0 when every document matches, 1 otherwise.

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

/// Match JSON and YAML documents against a scheming schema.
#[derive(Parser, Debug)]
#[command(name = "scheming", version, about)]
struct Cli {
    #[command(flatten)]
    check: scheming_cli::check::CheckArgs,

    /// Log matching decisions at debug level (overrides RUST_LOG).
    #[arg(long, short = 'v')]
    verbose: bool,

    /// Emit logs as JSON lines.
    #[arg(long)]
    log_json: bool,
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if cli.log_json {
        subscriber.json().init();
    } else {
        subscriber.init();
    }

    let report = scheming_cli::check::run(&cli.check)?;

    if cli.check.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else if !cli.check.quiet {
        print!("{}", report.render_text());
    }

    Ok(if report.all_matched() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
