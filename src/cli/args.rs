//! Command-line argument definitions for the trips processor
//!
//! This module defines the CLI interface using the clap derive API. The tool
//! is a single-command batch job, so all options live on one struct.

use crate::{Error, Result};
use clap::Parser;
use std::path::PathBuf;

/// CLI arguments for the bicycle-share trips processor
///
/// Converts raw bicycle-share trip CSV files into a cleaned dataset and a
/// station-ID-to-name lookup table, written in timestamped and "latest"
/// copies under the output directory.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "trips-processor",
    version,
    about = "Create the cleaned bicycle-share trip dataset and station name artifacts",
    long_about = "Reads raw bicycle-share trip CSV exports, normalizes and cleans them into a \
                  single trip table, and persists the table (Arrow IPC snapshot plus optional \
                  Parquet) together with JSON and binary forms of the station-ID-to-name \
                  mapping. Each artifact is written under a timestamped name and a stable \
                  '_latest' name."
)]
pub struct Args {
    /// Directory containing raw trip CSVs
    ///
    /// Defaults to `data.relative_paths.csvs_dir` from the configuration
    /// file, resolved against the data root.
    #[arg(
        long = "csv-dir",
        value_name = "PATH",
        help = "Directory containing raw trip CSVs (default from config)"
    )]
    pub csv_dir: Option<PathBuf>,

    /// Directory to write cleaned outputs
    ///
    /// Defaults to `data.root_dir` from the configuration file, resolved
    /// against the project root. Created recursively if absent.
    #[arg(
        long = "output-dir",
        value_name = "PATH",
        help = "Directory to write cleaned outputs (default from config)"
    )]
    pub output_dir: Option<PathBuf>,

    /// Limit on the number of CSV files to process, for quick runs
    #[arg(
        long = "num-files",
        value_name = "COUNT",
        help = "Limit the number of CSV files processed"
    )]
    pub num_files: Option<usize>,

    /// Disable the columnar Parquet output
    #[arg(long = "no-parquet", help = "Disable writing parquet output")]
    pub no_parquet: bool,

    /// Disable timestamped file names (only bare and '_latest' files written)
    #[arg(
        long = "no-timestamp",
        help = "Disable timestamped filenames (only write '*_latest.*' alongside bare names)"
    )]
    pub no_timestamp: bool,

    /// Only (re)create the station names binaries; skip all other artifacts
    #[arg(
        long = "only-station-names",
        help = "Only write the station names binary artifacts"
    )]
    pub only_station_names: bool,

    /// Project root used to resolve the configuration file and default paths
    ///
    /// Defaults to the current working directory.
    #[arg(
        long = "project-root",
        value_name = "PATH",
        help = "Project root for config and default path resolution"
    )]
    pub project_root: Option<PathBuf>,

    /// Path to configuration file
    ///
    /// If not specified, `config.toml` under the project root is used when a
    /// default path needs to be resolved.
    #[arg(
        short = 'c',
        long = "config",
        value_name = "FILE",
        help = "Path to configuration file (TOML format)"
    )]
    pub config_file: Option<PathBuf>,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Suppress output (quiet mode)
    #[arg(
        short = 'q',
        long = "quiet",
        help = "Suppress output except errors",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,
}

impl Args {
    /// Validate the arguments for consistency
    pub fn validate(&self) -> Result<()> {
        if let Some(csv_dir) = &self.csv_dir {
            if !csv_dir.exists() {
                return Err(Error::configuration(format!(
                    "CSV directory does not exist: {}",
                    csv_dir.display()
                )));
            }
            if !csv_dir.is_dir() {
                return Err(Error::configuration(format!(
                    "CSV path is not a directory: {}",
                    csv_dir.display()
                )));
            }
        }

        if self.num_files == Some(0) {
            return Err(Error::configuration(
                "Number of files must be greater than 0".to_string(),
            ));
        }

        if let Some(config_file) = &self.config_file {
            if !config_file.exists() {
                return Err(Error::configuration(format!(
                    "Config file does not exist: {}",
                    config_file.display()
                )));
            }
        }

        Ok(())
    }

    /// Whether the Parquet form should be written
    pub fn write_parquet(&self) -> bool {
        !self.no_parquet
    }

    /// Whether primary artifact names carry the run timestamp
    pub fn timestamp_output(&self) -> bool {
        !self.no_timestamp
    }

    /// Determine the appropriate log level based on verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "info",
                1 => "debug",
                _ => "trace",
            }
        }
    }

    /// Check if we should show progress output (not in quiet mode)
    pub fn show_progress(&self) -> bool {
        !self.quiet
    }
}

impl Default for Args {
    fn default() -> Self {
        Self {
            csv_dir: None,
            output_dir: None,
            num_files: None,
            no_parquet: false,
            no_timestamp: false,
            only_station_names: false,
            project_root: None,
            config_file: None,
            verbose: 0,
            quiet: false,
        }
    }
}
