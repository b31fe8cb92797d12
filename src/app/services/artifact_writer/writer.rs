//! Persistence orchestration for cleaned trip data and station mappings
//!
//! Writes every artifact of a run to disk in a fixed order: the primary
//! (timestamped) copies first, then the stable `_latest` copies. The Arrow
//! IPC snapshot and the mapping files are required and fail the run on error;
//! the Parquet form is best-effort and degrades to a skipped outcome so the
//! remaining artifacts still land.

use super::naming::{Artifact, ArtifactLayout};
use crate::app::models::StationNameMap;
use crate::{Error, Result};
use polars::prelude::*;
use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Options controlling a persistence run
#[derive(Debug, Clone)]
pub struct PersistOptions {
    /// Attempt to write the columnar Parquet form of the trip table
    pub write_parquet: bool,
    /// Run timestamp embedded in primary file names; `None` disables
    /// timestamped names and writes bare base names instead
    pub timestamp: Option<String>,
}

impl Default for PersistOptions {
    fn default() -> Self {
        Self {
            write_parquet: true,
            timestamp: None,
        }
    }
}

/// Outcome of the optional Parquet write
///
/// Modeled explicitly so callers can distinguish "feature disabled" from
/// "feature failed" without parsing log output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParquetOutcome {
    /// Parquet file written to the given path
    Written(PathBuf),
    /// Write was attempted and failed; the run continued without it
    Skipped { reason: String },
    /// Parquet output was not requested
    Disabled,
}

impl ParquetOutcome {
    /// Path of the written file, if any
    pub fn path(&self) -> Option<&Path> {
        match self {
            ParquetOutcome::Written(path) => Some(path),
            _ => None,
        }
    }

    /// Whether the Parquet file was written
    pub fn is_written(&self) -> bool {
        matches!(self, ParquetOutcome::Written(_))
    }
}

/// Paths of the primary artifacts produced by [`persist_clean_data`]
#[derive(Debug, Clone)]
pub struct PersistedArtifacts {
    /// Binary dataframe snapshot (Arrow IPC)
    pub cleaned_data_path: PathBuf,
    /// Columnar form outcome
    pub parquet: ParquetOutcome,
    /// Station mapping JSON
    pub station_map_json_path: PathBuf,
}

/// Persist the cleaned trip table and station mapping to the output directory
///
/// Writes, in order: the IPC snapshot, the optional Parquet form, the three
/// station-mapping serializations (JSON sorted-list, binary sorted-list,
/// binary set-valued), then the `_latest` copy of each. Latest copies are
/// written unconditionally so downstream consumers always have a stable
/// filename to read.
pub fn persist_clean_data(
    df: &mut DataFrame,
    stations: &StationNameMap,
    output_dir: &Path,
    options: &PersistOptions,
) -> Result<PersistedArtifacts> {
    ensure_output_dir(output_dir)?;

    let layout = ArtifactLayout::new(output_dir, options.timestamp.clone());
    let sorted_map = stations.to_sorted_lists();

    // Primary copies
    let cleaned_data_path = layout.primary_path(Artifact::CleanedData);
    info!("Writing cleaned data snapshot: {}", cleaned_data_path.display());
    write_snapshot(df, &cleaned_data_path)?;

    let parquet = if options.write_parquet {
        write_parquet_or_skip(df, &layout.primary_path(Artifact::CleanedDataParquet))
    } else {
        ParquetOutcome::Disabled
    };

    let station_map_json_path = layout.primary_path(Artifact::StationMapJson);
    info!(
        "Writing station ID->names map: {}",
        station_map_json_path.display()
    );
    write_json(&sorted_map, &station_map_json_path)?;

    let station_map_bin_path = layout.primary_path(Artifact::StationMapBinary);
    info!(
        "Writing station ID->names binary: {}",
        station_map_bin_path.display()
    );
    write_binary(&sorted_map, &station_map_bin_path)?;

    let station_names_path = layout.primary_path(Artifact::StationNamesBinary);
    info!(
        "Writing raw station names binary (set-valued): {}",
        station_names_path.display()
    );
    write_binary(stations, &station_names_path)?;

    // Latest copies, written unconditionally after the primaries
    let latest_snapshot = layout.latest_path(Artifact::CleanedData);
    info!("Writing latest snapshot: {}", latest_snapshot.display());
    write_snapshot(df, &latest_snapshot)?;

    if options.write_parquet && parquet.is_written() {
        // Latest parquet is best-effort too; a failure here leaves the
        // primary outcome untouched.
        write_parquet_or_skip(df, &layout.latest_path(Artifact::CleanedDataParquet));
    }

    let latest_json = layout.latest_path(Artifact::StationMapJson);
    info!("Writing latest station map: {}", latest_json.display());
    write_json(&sorted_map, &latest_json)?;

    let latest_map_bin = layout.latest_path(Artifact::StationMapBinary);
    info!(
        "Writing latest station map binary: {}",
        latest_map_bin.display()
    );
    write_binary(&sorted_map, &latest_map_bin)?;

    let latest_names = layout.latest_path(Artifact::StationNamesBinary);
    info!(
        "Writing latest raw station names binary: {}",
        latest_names.display()
    );
    write_binary(stations, &latest_names)?;

    Ok(PersistedArtifacts {
        cleaned_data_path,
        parquet,
        station_map_json_path,
    })
}

/// Persist only the set-valued station names binary (primary and latest)
///
/// Used by the reduced stations-only mode; no trip table or other mapping
/// forms are written.
pub fn persist_station_names(
    stations: &StationNameMap,
    output_dir: &Path,
    timestamp: Option<&str>,
) -> Result<(PathBuf, PathBuf)> {
    ensure_output_dir(output_dir)?;

    let layout = ArtifactLayout::new(output_dir, timestamp.map(|ts| ts.to_string()));

    let primary = layout.primary_path(Artifact::StationNamesBinary);
    info!(
        "Writing raw station names binary (set-valued): {}",
        primary.display()
    );
    write_binary(stations, &primary)?;

    let latest = layout.latest_path(Artifact::StationNamesBinary);
    info!(
        "Writing latest raw station names binary: {}",
        latest.display()
    );
    write_binary(stations, &latest)?;

    Ok((primary, latest))
}

/// Create the output directory recursively; a no-op when it already exists
fn ensure_output_dir(output_dir: &Path) -> Result<()> {
    std::fs::create_dir_all(output_dir).map_err(|e| {
        Error::io(
            format!(
                "Failed to create output directory '{}'",
                output_dir.display()
            ),
            e,
        )
    })
}

/// Write the trip table as an Arrow IPC snapshot
fn write_snapshot(df: &mut DataFrame, path: &Path) -> Result<()> {
    let mut file = File::create(path)
        .map_err(|e| Error::io(format!("Failed to create '{}'", path.display()), e))?;
    IpcWriter::new(&mut file)
        .finish(df)
        .map_err(|e| Error::dataframe(format!("Failed to write '{}'", path.display()), e))?;
    Ok(())
}

/// Attempt the Parquet write, degrading to a skipped outcome on failure
fn write_parquet_or_skip(df: &mut DataFrame, path: &Path) -> ParquetOutcome {
    info!("Writing parquet: {}", path.display());
    match write_parquet_file(df, path) {
        Ok(_) => ParquetOutcome::Written(path.to_path_buf()),
        Err(e) => {
            warn!("Failed to write parquet '{}', skipping: {}", path.display(), e);
            ParquetOutcome::Skipped {
                reason: e.to_string(),
            }
        }
    }
}

fn write_parquet_file(df: &mut DataFrame, path: &Path) -> Result<u64> {
    let file = File::create(path)
        .map_err(|e| Error::io(format!("Failed to create '{}'", path.display()), e))?;
    let size = ParquetWriter::new(file)
        .with_compression(ParquetCompression::Snappy)
        .finish(df)
        .map_err(|e| Error::dataframe(format!("Failed to write '{}'", path.display()), e))?;
    Ok(size)
}

/// Write a value as pretty-printed UTF-8 JSON
fn write_json<T: Serialize>(value: &T, path: &Path) -> Result<()> {
    let file = File::create(path)
        .map_err(|e| Error::io(format!("Failed to create '{}'", path.display()), e))?;
    serde_json::to_writer_pretty(BufWriter::new(file), value).map_err(|e| {
        Error::json_serialization(format!("Failed to write '{}'", path.display()), e)
    })?;
    Ok(())
}

/// Write a value in the binary mapping format
fn write_binary<T: Serialize>(value: &T, path: &Path) -> Result<()> {
    let file = File::create(path)
        .map_err(|e| Error::io(format!("Failed to create '{}'", path.display()), e))?;
    bincode::serialize_into(BufWriter::new(file), value)
        .map_err(|e| Error::binary_encoding(format!("Failed to write '{}'", path.display()), e))?;
    Ok(())
}
