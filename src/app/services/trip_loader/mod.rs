//! Trip loading and cleaning service
//!
//! Converts a folder of raw bicycle-share trip CSV exports into a cleaned
//! trip table plus the mapping from station identifier to every name variant
//! observed in the data. This is the single entry point the persistence layer
//! builds on; see [`load_clean_data`].

pub mod cleaning;
pub mod discovery;

use crate::app::models::StationNameMap;
use crate::Result;
use indicatif::{ProgressBar, ProgressStyle};
use polars::prelude::DataFrame;
use std::path::{Path, PathBuf};
use tracing::info;

/// Load and clean raw trip data
///
/// Discovers CSV files under `csv_dir` (or uses `datapaths` verbatim when
/// provided), optionally capped at `num_files`, and returns the cleaned trip
/// table together with the station-ID-to-name-variants mapping. The per-file
/// progress bar is suppressed when `show_progress` is false.
pub fn load_clean_data(
    csv_dir: &Path,
    num_files: Option<usize>,
    datapaths: Option<&[PathBuf]>,
    show_progress: bool,
) -> Result<(DataFrame, StationNameMap)> {
    let files = discovery::select_input_files(csv_dir, num_files, datapaths)?;
    info!(
        "Loading {} raw trip files from {}",
        files.len(),
        csv_dir.display()
    );

    let progress = create_progress_bar(files.len() as u64, "Reading trip files", show_progress);

    let mut frames = Vec::with_capacity(files.len());
    for path in &files {
        if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
            progress.set_message(name.to_string());
        }
        let raw = cleaning::read_trip_file(path)?;
        frames.push(cleaning::normalize_columns(raw, path)?);
        progress.inc(1);
    }
    progress.finish_with_message("Files read");

    let df = cleaning::clean_trips(frames)?;
    let stations = cleaning::extract_station_names(&df)?;

    info!(
        "Cleaned {} trips across {} stations",
        df.height(),
        stations.station_count()
    );

    Ok((df, stations))
}

/// Create a progress bar with appropriate styling, or a hidden one in quiet mode
fn create_progress_bar(total: u64, message: &str, show: bool) -> ProgressBar {
    if !show {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new(total);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap()
            .progress_chars("#>-"),
    );
    pb.set_message(message.to_string());
    pb
}
