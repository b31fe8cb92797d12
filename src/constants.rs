//! Application constants for the trips processor
//!
//! This module contains artifact naming constants, canonical column names,
//! and default configuration values used throughout the application.

// =============================================================================
// Artifact Naming
// =============================================================================

/// Base name for the cleaned trip table artifacts (IPC snapshot and Parquet)
pub const CLEANED_DATA_BASE_NAME: &str = "cleaned_data";

/// Base name for the station-ID-to-names mapping artifacts (JSON and binary)
pub const STATION_MAP_BASE_NAME: &str = "station_id_to_names";

/// Base name for the raw set-valued station names binary artifact
pub const STATION_NAMES_BASE_NAME: &str = "station_names";

/// Tag used for the stable, always-overwritten artifact copies
pub const LATEST_TAG: &str = "latest";

/// Extension for the binary dataframe snapshot (Arrow IPC)
pub const SNAPSHOT_EXTENSION: &str = "ipc";

/// Extension for the columnar trip table output
pub const PARQUET_EXTENSION: &str = "parquet";

/// Extension for the JSON station mapping
pub const JSON_EXTENSION: &str = "json";

/// Extension for the binary station mappings
pub const BINARY_EXTENSION: &str = "bin";

/// Wall-clock format for run timestamps embedded in artifact names
pub const RUN_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M";

// =============================================================================
// Input Data
// =============================================================================

/// Extension of raw trip data files
pub const CSV_EXTENSION: &str = "csv";

/// Datetime formats observed in bike-share trip exports, tried in order
pub const TRIP_DATETIME_FORMATS: &[&str] = &[
    "%d/%m/%Y %H:%M",
    "%d/%m/%Y %H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// Canonical trip table column names
pub mod columns {
    pub const TRIP_ID: &str = "trip_id";
    pub const RENTAL_ID: &str = "rental_id";
    pub const BIKE_ID: &str = "bike_id";
    pub const DURATION: &str = "duration";
    pub const START_DATE: &str = "start_date";
    pub const END_DATE: &str = "end_date";
    pub const START_STATION_ID: &str = "start_station_id";
    pub const START_STATION_NAME: &str = "start_station_name";
    pub const END_STATION_ID: &str = "end_station_id";
    pub const END_STATION_NAME: &str = "end_station_name";

    /// Columns every input file must provide after header normalization
    pub const REQUIRED: &[&str] = &[
        DURATION,
        START_DATE,
        END_DATE,
        START_STATION_ID,
        START_STATION_NAME,
        END_STATION_ID,
        END_STATION_NAME,
    ];
}

/// Number of CSV rows sampled for schema inference
pub const CSV_INFER_SCHEMA_LENGTH: usize = 100;

// =============================================================================
// Configuration Defaults
// =============================================================================

/// Name of the configuration file under the project root
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Default output directory, relative to the project root
pub const DEFAULT_DATA_ROOT_DIR: &str = "data";

/// Default raw CSV directory, relative to the data root
pub const DEFAULT_CSVS_DIR: &str = "csvs";
