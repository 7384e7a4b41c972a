//! Ghostmask CLI
//!
//! Redacts personal data from a text or JSON stream.

mod cli;
mod process;

use anyhow::Context;
use clap::Parser;
use ghostmask_config_file::load_custom_patterns;
use ghostmask_pii::RedactionEngine;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use tracing::{Level, debug, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use cli::{Cli, Format, file_path};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let settings = cli.settings().context("error loading settings")?;

    // Initialize tracing on stderr; stdout carries redacted data
    let log_level = match settings.logging.level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::WARN,
    };
    let filter = EnvFilter::new(format!("{}", log_level));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    debug!(
        mode = %settings.mode,
        types = %settings.types,
        locale = %settings.locale,
        threads = settings.threads,
        "Resolved settings"
    );

    let custom_patterns = match &settings.custom {
        Some(path) => load_custom_patterns(path).context("custom patterns error")?,
        None => Vec::new(),
    };

    let mut engine = RedactionEngine::new(&settings.redaction_config(custom_patterns))
        .context("invalid redaction configuration")?;

    let input: Box<dyn BufRead> = match file_path(cli.input.as_deref()) {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("error opening input {}", path.display()))?;
            Box::new(BufReader::new(file))
        }
        None => Box::new(io::stdin().lock()),
    };

    let mut output: Box<dyn Write> = match file_path(cli.output.as_deref()) {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("error creating output {}", path.display()))?;
            Box::new(BufWriter::new(file))
        }
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };

    match cli.format {
        Format::Text => {
            let lines =
                process::process_text(&mut engine, input, &mut output, settings.threads).await?;
            info!(lines, threads = settings.threads, "Processed text input");
        }
        Format::Json => {
            process::process_json(&mut engine, input, &mut output)?;
            info!("Processed JSON document");
        }
    }
    output.flush()?;

    let counts = engine.snapshot_counts();
    info!(
        redactions = counts.values().sum::<u64>(),
        kinds = counts.len(),
        "Redaction complete"
    );

    if let Some(report) = &cli.report {
        process::write_report(&counts, report).context("report error")?;
    }

    Ok(())
}
