//! Command execution for the trips processor CLI
//!
//! Translates parsed arguments into a pipeline run: logging setup,
//! configuration resolution, loader invocation, and dispatch of either the
//! full persistence orchestration or the reduced stations-only mode.

use crate::app::services::artifact_writer::{
    ParquetOutcome, PersistOptions, persist_clean_data, persist_station_names, run_timestamp,
};
use crate::app::services::trip_loader::load_clean_data;
use crate::cli::args::Args;
use crate::config::Config;
use crate::{Error, Result};
use indicatif::HumanDuration;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info};

/// Summary of a completed run, for reporting
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    /// Number of cleaned trips loaded
    pub trips_loaded: usize,
    /// Number of distinct stations in the name mapping
    pub stations_mapped: usize,
    /// Primary artifact paths written
    pub artifacts: Vec<PathBuf>,
    /// Outcome of the Parquet write, when the full pipeline ran
    pub parquet: Option<ParquetOutcome>,
    /// Total processing time
    pub processing_time: std::time::Duration,
}

/// Main command runner
///
/// Orchestrates the whole workflow:
/// 1. Set up logging and validate arguments
/// 2. Resolve the project root and default directories from configuration
/// 3. Invoke the loader
/// 4. Persist either the full artifact set or only the station names binaries
pub fn run(args: Args) -> Result<RunSummary> {
    let start_time = Instant::now();

    setup_logging(&args);

    info!("Starting trips processor");
    debug!("Command line arguments: {:?}", args);

    args.validate()?;

    let project_root = match &args.project_root {
        Some(path) => path.clone(),
        None => std::env::current_dir()
            .map_err(|e| Error::io("Failed to resolve current directory", e))?,
    };

    let (csv_dir, output_dir) = resolve_directories(&args, &project_root)?;
    info!("Using CSV dir: {}", csv_dir.display());
    info!("Using output dir: {}", output_dir.display());

    let timestamp = args.timestamp_output().then(run_timestamp);

    let (mut df, stations) = load_clean_data(&csv_dir, args.num_files, None, args.show_progress())?;

    let mut summary = RunSummary {
        trips_loaded: df.height(),
        stations_mapped: stations.station_count(),
        ..Default::default()
    };

    if args.only_station_names {
        info!("Building only station names binaries (no cleaned data will be written)");
        let (primary, latest) =
            persist_station_names(&stations, &output_dir, timestamp.as_deref())?;
        summary.artifacts = vec![primary, latest];
    } else {
        let options = PersistOptions {
            write_parquet: args.write_parquet(),
            timestamp,
        };
        let artifacts = persist_clean_data(&mut df, &stations, &output_dir, &options)?;

        summary.artifacts.push(artifacts.cleaned_data_path);
        if let Some(parquet_path) = artifacts.parquet.path() {
            summary.artifacts.push(parquet_path.to_path_buf());
        }
        summary.artifacts.push(artifacts.station_map_json_path);
        summary.parquet = Some(artifacts.parquet);
    }

    summary.processing_time = start_time.elapsed();

    if args.show_progress() {
        print_summary(&summary);
    }

    Ok(summary)
}

/// Set up structured logging based on CLI arguments
///
/// Uses `try_init` so the command layer stays callable from tests that run
/// multiple commands in one process.
fn setup_logging(args: &Args) {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("trips_processor={}", args.get_log_level())));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_level(true)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .try_init();
}

/// Resolve the input and output directories
///
/// CLI overrides win; the configuration file is only read when a default is
/// actually needed, so fully-overridden runs do not depend on it.
fn resolve_directories(args: &Args, project_root: &Path) -> Result<(PathBuf, PathBuf)> {
    if let (Some(csv_dir), Some(output_dir)) = (&args.csv_dir, &args.output_dir) {
        return Ok((csv_dir.clone(), output_dir.clone()));
    }

    let config = match &args.config_file {
        Some(path) => Config::load(path)?,
        None => Config::load_from_root(project_root)?,
    };

    let csv_dir = args
        .csv_dir
        .clone()
        .unwrap_or_else(|| config.default_csv_dir(project_root));
    let output_dir = args
        .output_dir
        .clone()
        .unwrap_or_else(|| config.data_root_dir(project_root));

    Ok((csv_dir, output_dir))
}

/// Print the human-readable run summary
fn print_summary(summary: &RunSummary) {
    println!("\nProcessing complete in {}", HumanDuration(summary.processing_time));
    println!("  Trips loaded:    {}", summary.trips_loaded);
    println!("  Stations mapped: {}", summary.stations_mapped);

    if let Some(ParquetOutcome::Skipped { reason }) = &summary.parquet {
        println!("  Parquet skipped: {reason}");
    }

    if !summary.artifacts.is_empty() {
        println!("  Artifacts:");
        for path in &summary.artifacts {
            println!("    {}", path.display());
        }
    }
}
