//! Artifact persistence service
//!
//! Turns one loader result into the full on-disk artifact set: a required
//! Arrow IPC snapshot of the cleaned trip table, an optional Parquet form,
//! and three serializations of the station mapping, each in a primary
//! (timestamped) copy and a stable `_latest` copy.
//!
//! # Example
//!
//! ```no_run
//! use trips_processor::app::services::artifact_writer::{
//!     persist_clean_data, run_timestamp, PersistOptions,
//! };
//! use trips_processor::app::services::trip_loader::load_clean_data;
//! use std::path::Path;
//!
//! # fn main() -> trips_processor::Result<()> {
//! let (mut df, stations) = load_clean_data(Path::new("data/csvs"), None, None, true)?;
//! let options = PersistOptions {
//!     write_parquet: true,
//!     timestamp: Some(run_timestamp()),
//! };
//! let artifacts = persist_clean_data(&mut df, &stations, Path::new("data"), &options)?;
//! println!("snapshot at {}", artifacts.cleaned_data_path.display());
//! # Ok(())
//! # }
//! ```

pub mod naming;
pub mod writer;

pub use naming::{Artifact, ArtifactLayout, run_timestamp};
pub use writer::{
    ParquetOutcome, PersistOptions, PersistedArtifacts, persist_clean_data, persist_station_names,
};
