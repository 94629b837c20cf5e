use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use chrono::Utc;
use clap::{Args, Parser, Subcommand};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use jobflow_core::{import_document, BatchSubmitter, ImportSettings, SubmitSettings};
use jobflow_mapper::{map_document, DatePolicy, MapperOptions};

mod decode;
mod submit;

use submit::{DryRunSubmitter, HttpSubmitter};

#[derive(Parser, Debug)]
#[command(author, version, about = "Jobflow booking-record import pipeline", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Import a booking-platform CSV export into the backing store.
    Import(ImportArgs),
    /// Map a CSV export and report what would be imported, without
    /// submitting anything.
    Preview(PreviewArgs),
}

#[derive(Args, Debug)]
struct ImportArgs {
    /// CSV export from a supported booking platform.
    file: PathBuf,

    /// Import endpoint URL; falls back to JOBFLOW_IMPORT_URL, else dry run.
    #[arg(long)]
    endpoint: Option<String>,

    #[arg(long, default_value_t = jobflow_core::MAX_BATCH_SIZE)]
    batch_size: usize,

    /// Milliseconds to pause between batch submissions.
    #[arg(long, default_value_t = 250)]
    batch_delay_ms: u64,

    /// Update records whose import key already exists instead of skipping.
    #[arg(long)]
    update_existing: bool,

    /// Submit records even when their import key already exists downstream.
    #[arg(long)]
    allow_duplicates: bool,

    /// Keep suspiciously far-future dates instead of re-deriving the year.
    #[arg(long)]
    strict_dates: bool,
}

#[derive(Args, Debug)]
struct PreviewArgs {
    file: PathBuf,

    #[arg(long)]
    strict_dates: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    match cli.command {
        Command::Import(args) => run_import(args).await,
        Command::Preview(args) => run_preview(args),
    }
}

async fn run_import(args: ImportArgs) -> Result<()> {
    let rows = decode::read_rows(&args.file)?;

    let mut settings = ImportSettings::new(Utc::now().date_naive());
    if args.strict_dates {
        settings.mapper = settings.mapper.with_date_policy(DatePolicy::Strict);
    }
    settings.coordinator.batch_size = args.batch_size;
    settings.coordinator.batch_delay = Duration::from_millis(args.batch_delay_ms);
    settings.coordinator.submit = SubmitSettings {
        skip_duplicates: !args.allow_duplicates,
        update_existing: args.update_existing,
    };

    let endpoint = args
        .endpoint
        .or_else(|| std::env::var("JOBFLOW_IMPORT_URL").ok());
    let submitter: Box<dyn BatchSubmitter> = match endpoint {
        Some(url) => {
            info!(%url, "submitting batches to import endpoint");
            Box::new(HttpSubmitter::new(url))
        }
        None => {
            warn!("no import endpoint configured; running as a dry run");
            Box::new(DryRunSubmitter)
        }
    };

    let result = import_document(&rows, submitter.as_ref(), &settings, |progress| {
        info!(
            current = progress.current,
            total = progress.total,
            percentage = progress.percentage,
            batch = progress.batch_index,
            batches = progress.batch_count,
            "import progress"
        );
    })
    .await?;

    println!("imported: {}", result.imported);
    println!("updated:  {}", result.updated);
    println!("skipped:  {}", result.skipped);
    for warning in &result.warnings {
        match warning.row {
            Some(row) => println!("warning (row {row}): {}", warning.message),
            None => println!("warning: {}", warning.message),
        }
    }
    for error in &result.errors {
        match error.row {
            Some(row) => eprintln!("error (row {row}): {}", error.message),
            None => eprintln!("error: {}", error.message),
        }
    }
    Ok(())
}

fn run_preview(args: PreviewArgs) -> Result<()> {
    let rows = decode::read_rows(&args.file)?;
    if rows.is_empty() {
        anyhow::bail!("document contained no rows");
    }

    let mut options = MapperOptions::new(Utc::now().date_naive());
    if args.strict_dates {
        options = options.with_date_policy(DatePolicy::Strict);
    }
    let mapped = map_document(&rows, &options);

    println!("rows:    {}", rows.len());
    println!("records: {}", mapped.records.len());
    println!("skipped: {}", mapped.skipped.len());
    for skip in &mapped.skipped {
        println!("  row {}: {}", skip.row, skip.reason);
    }
    for warning in &mapped.warnings {
        println!("  row {}: {}", warning.row, warning.message);
    }
    Ok(())
}
