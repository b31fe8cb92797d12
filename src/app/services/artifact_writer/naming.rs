//! Output naming policy for persisted artifacts
//!
//! Derives every artifact file name for a run from three inputs: the output
//! directory, an optional run timestamp, and the artifact kind. Each artifact
//! has a primary name (timestamped when a timestamp is supplied, bare
//! otherwise) and a `_latest` name that is produced for every run regardless
//! of the timestamp toggle. Pure string and path composition; no error
//! conditions.

use crate::constants::{
    BINARY_EXTENSION, CLEANED_DATA_BASE_NAME, JSON_EXTENSION, LATEST_TAG, PARQUET_EXTENSION,
    RUN_TIMESTAMP_FORMAT, SNAPSHOT_EXTENSION, STATION_MAP_BASE_NAME, STATION_NAMES_BASE_NAME,
};
use std::path::{Path, PathBuf};

/// Logical artifacts produced by a persistence run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Artifact {
    /// Binary dataframe snapshot of the cleaned trip table (Arrow IPC)
    CleanedData,
    /// Columnar form of the cleaned trip table
    CleanedDataParquet,
    /// Station mapping with sorted-list values, JSON
    StationMapJson,
    /// Station mapping with sorted-list values, binary
    StationMapBinary,
    /// Station mapping with the original set-valued structure, binary
    StationNamesBinary,
}

impl Artifact {
    /// All artifacts in their write order
    pub const ALL: [Artifact; 5] = [
        Artifact::CleanedData,
        Artifact::CleanedDataParquet,
        Artifact::StationMapJson,
        Artifact::StationMapBinary,
        Artifact::StationNamesBinary,
    ];

    /// Base name shared by the primary and latest copies
    pub fn base_name(&self) -> &'static str {
        match self {
            Artifact::CleanedData | Artifact::CleanedDataParquet => CLEANED_DATA_BASE_NAME,
            Artifact::StationMapJson | Artifact::StationMapBinary => STATION_MAP_BASE_NAME,
            Artifact::StationNamesBinary => STATION_NAMES_BASE_NAME,
        }
    }

    /// File extension for this artifact
    pub fn extension(&self) -> &'static str {
        match self {
            Artifact::CleanedData => SNAPSHOT_EXTENSION,
            Artifact::CleanedDataParquet => PARQUET_EXTENSION,
            Artifact::StationMapJson => JSON_EXTENSION,
            Artifact::StationMapBinary | Artifact::StationNamesBinary => BINARY_EXTENSION,
        }
    }

    /// Primary file name: `<base>_<ts>.<ext>`, or `<base>.<ext>` without a timestamp
    pub fn file_name(&self, timestamp: Option<&str>) -> String {
        match timestamp {
            Some(ts) => format!("{}_{}.{}", self.base_name(), ts, self.extension()),
            None => format!("{}.{}", self.base_name(), self.extension()),
        }
    }

    /// Stable file name: `<base>_latest.<ext>`
    pub fn latest_file_name(&self) -> String {
        format!("{}_{}.{}", self.base_name(), LATEST_TAG, self.extension())
    }
}

/// Resolves artifact paths for a single persistence run
#[derive(Debug, Clone)]
pub struct ArtifactLayout {
    output_dir: PathBuf,
    timestamp: Option<String>,
}

impl ArtifactLayout {
    /// Create a layout for the given output directory and optional run timestamp
    pub fn new(output_dir: &Path, timestamp: Option<String>) -> Self {
        Self {
            output_dir: output_dir.to_path_buf(),
            timestamp,
        }
    }

    /// Path of the primary (timestamped or bare) copy of an artifact
    pub fn primary_path(&self, artifact: Artifact) -> PathBuf {
        self.output_dir
            .join(artifact.file_name(self.timestamp.as_deref()))
    }

    /// Path of the `_latest` copy of an artifact
    pub fn latest_path(&self, artifact: Artifact) -> PathBuf {
        self.output_dir.join(artifact.latest_file_name())
    }

    /// Output directory this layout resolves against
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }
}

/// Format the current local wall-clock time as a run timestamp
pub fn run_timestamp() -> String {
    chrono::Local::now().format(RUN_TIMESTAMP_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timestamped_file_names() {
        let ts = Some("20240131_0905");
        assert_eq!(
            Artifact::CleanedData.file_name(ts),
            "cleaned_data_20240131_0905.ipc"
        );
        assert_eq!(
            Artifact::CleanedDataParquet.file_name(ts),
            "cleaned_data_20240131_0905.parquet"
        );
        assert_eq!(
            Artifact::StationMapJson.file_name(ts),
            "station_id_to_names_20240131_0905.json"
        );
        assert_eq!(
            Artifact::StationMapBinary.file_name(ts),
            "station_id_to_names_20240131_0905.bin"
        );
        assert_eq!(
            Artifact::StationNamesBinary.file_name(ts),
            "station_names_20240131_0905.bin"
        );
    }

    #[test]
    fn test_bare_file_names_without_timestamp() {
        assert_eq!(Artifact::CleanedData.file_name(None), "cleaned_data.ipc");
        assert_eq!(
            Artifact::StationNamesBinary.file_name(None),
            "station_names.bin"
        );
    }

    #[test]
    fn test_latest_names_ignore_timestamp() {
        for artifact in Artifact::ALL {
            let name = artifact.latest_file_name();
            assert!(name.contains("_latest."), "unexpected name: {name}");
            assert!(!name.contains("2024"));
        }
        assert_eq!(
            Artifact::CleanedData.latest_file_name(),
            "cleaned_data_latest.ipc"
        );
    }

    #[test]
    fn test_layout_resolves_against_output_dir() {
        let layout = ArtifactLayout::new(Path::new("/tmp/out"), Some("20240131_0905".to_string()));

        assert_eq!(
            layout.primary_path(Artifact::StationMapJson),
            PathBuf::from("/tmp/out/station_id_to_names_20240131_0905.json")
        );
        assert_eq!(
            layout.latest_path(Artifact::StationMapJson),
            PathBuf::from("/tmp/out/station_id_to_names_latest.json")
        );
    }

    #[test]
    fn test_run_timestamp_format() {
        let ts = run_timestamp();
        // YYYYMMDD_HHMM
        assert_eq!(ts.len(), 13);
        assert_eq!(ts.as_bytes()[8], b'_');
        assert!(ts[..8].chars().all(|c| c.is_ascii_digit()));
        assert!(ts[9..].chars().all(|c| c.is_ascii_digit()));
    }
}
