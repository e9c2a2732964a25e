mod error;
mod logging;
mod menu;
mod report;
mod settings;

use std::error::Error as _;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use storeseed_core::Table;
use storeseed_generate::{SeedEngine, Selection};
use storeseed_store::{ConnectOptions, Engine, open_store};

use error::CliError;
use logging::init_logging;
use settings::{SeedOverrides, Settings};

#[derive(Parser, Debug)]
#[command(
    name = "storeseed",
    version,
    about = "Seed an e-commerce database with fake data"
)]
struct Cli {
    /// Target database (`postgres://...`, or `memory://` for a dry run).
    #[arg(long, env = "DATABASE_URL", value_name = "URL")]
    database_url: Option<String>,
    /// Settings file, read only if it exists.
    #[arg(long, default_value = "storeseed.toml")]
    config: PathBuf,
    /// Menu choice (1-7); prompts when absent.
    #[arg(long)]
    choice: Option<String>,
    /// Records per selected table; prompts when absent.
    #[arg(long)]
    count: Option<String>,
    /// Records generated per storage write.
    #[arg(long)]
    chunk_size: Option<usize>,
    /// Orders handled per relation flush.
    #[arg(long)]
    relation_batch_size: Option<usize>,
    /// Upper bound of products linked to one order.
    #[arg(long)]
    max_products_per_order: Option<usize>,
    /// Seed for a reproducible dataset.
    #[arg(long)]
    seed: Option<u64>,
    /// Append JSON log lines to this file.
    #[arg(long)]
    log_file: Option<PathBuf>,
    /// Write the run report as JSON to this path.
    #[arg(long)]
    report: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            if let Some(source) = err.source() {
                eprintln!("caused by: {source}");
            }
            ExitCode::from(err.exit_code())
        }
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let settings = Settings::load(&cli.config)?;
    let log_file = cli.log_file.clone().or_else(|| settings.log_file.clone());
    init_logging(log_file.as_deref())?;

    let options = settings.seed_options(&SeedOverrides {
        chunk_size: cli.chunk_size,
        relation_batch_size: cli.relation_batch_size,
        max_products_per_order: cli.max_products_per_order,
        seed: cli.seed,
    });
    options.validate().map_err(CliError::Options)?;

    let database_url = cli
        .database_url
        .clone()
        .or_else(|| settings.database_url.clone())
        .ok_or(CliError::MissingDatabaseUrl)?;
    let engine = Engine::detect(&database_url).map_err(CliError::Store)?;

    let (selection, count) = read_request(&cli)?;

    tracing::info!(event = "engine_detected", engine = engine.as_str());
    let mut store = open_store(&database_url, &ConnectOptions::default())
        .await
        .map_err(CliError::Store)?;

    let report = SeedEngine::new(store.as_mut(), options)
        .run(selection, count)
        .await
        .map_err(CliError::Seed)?;

    let report_path = cli.report.clone().or_else(|| settings.report.clone());
    if let Some(path) = &report_path {
        report::write_report(path, &report)?;
        tracing::info!(event = "report_written", path = %path.display());
    }

    for table in Table::ALL {
        let rows = report.rows(table);
        if rows > 0 {
            println!("{table}: {rows}");
        }
    }
    println!(
        "Done: {} rows committed in {} ms.",
        report.total_rows(),
        report.duration_ms
    );
    Ok(())
}

/// Selection and record count from flags, prompting for whichever is missing.
fn read_request(cli: &Cli) -> Result<(Selection, usize), CliError> {
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stdout();

    let selection = match &cli.choice {
        Some(choice) => choice.parse().map_err(CliError::Choice)?,
        None => menu::prompt_selection(&mut input, &mut output)?,
    };
    let count = match &cli.count {
        Some(count) => menu::parse_count(count)?,
        None => menu::prompt_count(&mut input, &mut output)?,
    };
    Ok((selection, count))
}
