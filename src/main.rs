use anyhow::Context;
use chrono::Utc;
use clap::Parser;
use std::path::{Path, PathBuf};
use tracing::{error, info};

use ufo_import::app::import_use_case::ImportUseCase;
use ufo_import::app::ports::InvestigationSinkPort;
use ufo_import::config::{Credentials, FileConfig, ImportConfig};
use ufo_import::constants::{DEFAULT_CONFIG_FILE, DEFAULT_OUTPUT_DIR, ENV_SERVICE_KEY, ENV_URL};
use ufo_import::infra::{FileSink, SupabaseSink};
use ufo_import::logging;
use ufo_import::metrics;
use ufo_import::pipeline::ingestion::expand_home;

#[derive(Parser)]
#[command(name = "ufo_import")]
#[command(about = "Import high-signal UFO sightings as Aletheia investigations")]
#[command(version = "0.1.0")]
struct Cli {
    /// Enriched sightings JSON file
    /// (defaults to ~/Desktop/ufo-data-prep/outputs/ufo_sightings_enriched.json)
    #[arg(long)]
    input: Option<String>,

    /// TOML file with run settings (defaults to ./ufo_import.toml when present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Target table
    #[arg(long)]
    table: Option<String>,

    /// Rows per insert call
    #[arg(long)]
    batch_size: Option<usize>,

    /// Maximum number of records to import
    #[arg(long)]
    max_records: Option<usize>,

    /// Write investigations to a local NDJSON file instead of the database
    #[arg(long)]
    dry_run: bool,

    /// Dry-run output file (defaults to output/ufo_investigations_<timestamp>.ndjson)
    #[arg(long, requires = "dry_run")]
    output: Option<PathBuf>,

    /// Print the run summary as JSON after the report
    #[arg(long)]
    summary_json: bool,

    /// Write run metrics in Prometheus text format to this file
    #[arg(long)]
    metrics_file: Option<PathBuf>,
}

fn build_config(cli: &Cli) -> anyhow::Result<ImportConfig> {
    let mut config = ImportConfig::default();

    let config_path = match &cli.config {
        Some(path) => Some(path.clone()),
        None => Some(PathBuf::from(DEFAULT_CONFIG_FILE)).filter(|p| p.exists()),
    };
    if let Some(path) = config_path {
        info!("Reading settings from {}", path.display());
        let file = FileConfig::load(&path).with_context(|| format!("loading {}", path.display()))?;
        config = config.merge_file(file);
    }

    if let Some(input) = &cli.input {
        config.input_file = expand_home(input);
    }
    if let Some(table) = &cli.table {
        config.table = table.clone();
    }
    if let Some(batch_size) = cli.batch_size {
        config.batch_size = batch_size;
    }
    if let Some(max_records) = cli.max_records {
        config.max_records = max_records;
    }

    config.validate()?;
    Ok(config)
}

fn dry_run_sink(output: Option<&Path>) -> anyhow::Result<Box<dyn InvestigationSinkPort>> {
    let path = match output {
        Some(path) => path.to_path_buf(),
        None => {
            let timestamp = Utc::now().format("%Y%m%d_%H%M%S");
            Path::new(DEFAULT_OUTPUT_DIR).join(format!("ufo_investigations_{}.ndjson", timestamp))
        }
    };
    println!("Dry run: writing investigations to {}", path.display());
    let sink = FileSink::new(&path).with_context(|| format!("creating {}", path.display()))?;
    Ok(Box::new(sink))
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let guard = logging::init_logging();

    let cli = Cli::parse();
    let config = build_config(&cli)?;
    let metrics_handle = match &cli.metrics_file {
        Some(_) => Some(metrics::init_metrics()?),
        None => None,
    };

    let sink: Box<dyn InvestigationSinkPort> = if cli.dry_run {
        dry_run_sink(cli.output.as_deref())?
    } else {
        match Credentials::from_env() {
            Ok(credentials) => Box::new(SupabaseSink::new(credentials)?),
            Err(e) => {
                error!("{}", e);
                println!("Error: Missing {} or {}", ENV_URL, ENV_SERVICE_KEY);
                println!("Set these environment variables and try again");
                drop(guard);
                std::process::exit(1);
            }
        }
    };

    let use_case = ImportUseCase::new(config, sink)?;
    let summary = use_case
        .run_from_file()
        .await
        .with_context(|| format!("loading {}", use_case.config().input_file.display()))?;

    summary.print_report();
    if cli.summary_json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    }
    if let (Some(handle), Some(path)) = (&metrics_handle, &cli.metrics_file) {
        metrics::write_snapshot(handle, path)
            .with_context(|| format!("writing {}", path.display()))?;
    }

    info!(imported = summary.imported, failed = summary.failed, "Import finished");
    Ok(())
}
