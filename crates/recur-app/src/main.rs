//! `recur`: prints the occurrences of a recurrence rule inside a window.
//!
//! ```text
//! recur --after 2024-01-01 --before 2024-04-01 'FREQ=MONTHLY;BYDAY=2TU'
//! {"occurrences":["2024-01-09","2024-02-13","2024-03-12"]}
//! ```
//!
//! The result is a single JSON object on stdout; logs go to stderr. The exit
//! status is 1 when the object carries an `error`.

use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use recur_core::config::load_config;
use recur_core::constants::DEFAULT_LOG_LEVEL;
use recur_rfc::rfc::rrule::expand::ExpansionLimits;
use recur_service::occurrence::{OccurrenceResponse, occurrences_between};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, reload, util::SubscriberInitExt};

/// Recurrence rule occurrence generator
#[derive(Debug, Parser)]
#[command(name = "recur")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Configuration file path (defaults to `recur.toml` when present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log filter, overriding `logging.level` from the configuration
    #[arg(long)]
    log_level: Option<String>,

    /// Inclusive window start (YYYY-MM-DD or YYYY-MM-DDTHH:MM:SS)
    #[arg(long)]
    after: String,

    /// Exclusive window end (YYYY-MM-DD or YYYY-MM-DDTHH:MM:SS)
    #[arg(long)]
    before: String,

    /// Rule body, or DTSTART/RRULE/RDATE/EXDATE lines; `-` reads stdin
    rule: String,
}

fn main() -> anyhow::Result<ExitCode> {
    let (filter_layer, filter_handle) = reload::Layer::new(EnvFilter::new(DEFAULT_LOG_LEVEL));

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_file(true)
                .with_line_number(true),
        )
        .init();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;

    tracing::debug!(config = ?config, "Configuration loaded");

    let level = cli
        .log_level
        .as_deref()
        .unwrap_or(config.logging.level.as_str());
    if let Ok(filter) = EnvFilter::try_new(level) {
        if let Err(e) = filter_handle.modify(|current| *current = filter) {
            tracing::warn!(error = %e, "Failed to update log filter from config");
        }
    } else {
        tracing::warn!(level = %level, "Invalid log level, keeping {DEFAULT_LOG_LEVEL}");
    }

    let rule = if cli.rule == "-" {
        let mut rule = String::new();
        std::io::stdin().read_to_string(&mut rule)?;
        rule
    } else {
        cli.rule
    };

    let limits = ExpansionLimits::from(&config.limits);
    let response = OccurrenceResponse::from(occurrences_between(
        &rule,
        &cli.after,
        &cli.before,
        &limits,
    ));

    println!("{}", response.to_json()?);

    Ok(if response.is_error() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}
