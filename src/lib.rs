//! Trips Processor Library
//!
//! A Rust library for converting raw bicycle-share trip CSV files into a
//! cleaned, persisted dataset plus a station-ID-to-name lookup table.
//!
//! This library provides tools for:
//! - Discovering and reading heterogeneous bike-share trip CSV exports
//! - Normalizing column names that drifted across publication years
//! - Cleaning trips (timestamp parsing, identifier casts, bad-row removal)
//! - Collecting every name variant observed for each station identifier
//! - Persisting timestamped and "latest" artifact copies in Arrow IPC,
//!   Parquet, JSON, and binary mapping formats

pub mod config;
pub mod constants;

// Core application modules
pub mod app {
    pub mod models;
    pub mod services {
        pub mod artifact_writer;
        pub mod trip_loader;
    }
}

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use app::models::StationNameMap;
pub use app::services::artifact_writer::{ParquetOutcome, PersistOptions, PersistedArtifacts};
pub use config::Config;

/// Result type alias for the trips processor
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for trip processing operations
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// I/O operation failed
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// CSV loading error
    #[error("CSV loading error in file '{file}': {message}")]
    CsvLoad { file: String, message: String },

    /// DataFrame processing error
    #[error("DataFrame error: {message}")]
    DataFrame {
        message: String,
        #[source]
        source: polars::prelude::PolarsError,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Configuration file parsing error
    #[error("Failed to parse configuration file '{path}'")]
    ConfigParse {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    /// JSON serialization error
    #[error("JSON serialization error: {message}")]
    JsonSerialization {
        message: String,
        #[source]
        source: serde_json::Error,
    },

    /// Binary encoding error
    #[error("Binary encoding error: {message}")]
    BinaryEncoding {
        message: String,
        #[source]
        source: bincode::Error,
    },

    /// Data validation error
    #[error("Data validation error: {message}")]
    DataValidation { message: String },

    /// File not found
    #[error("File not found: {path}")]
    FileNotFound { path: String },

    /// Directory traversal error
    #[error("Directory traversal error: {message}")]
    DirectoryTraversal {
        message: String,
        #[source]
        source: walkdir::Error,
    },
}

impl Error {
    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create a CSV loading error with context
    pub fn csv_load(file: impl Into<String>, message: impl Into<String>) -> Self {
        Self::CsvLoad {
            file: file.into(),
            message: message.into(),
        }
    }

    /// Create a DataFrame processing error
    pub fn dataframe(message: impl Into<String>, source: polars::prelude::PolarsError) -> Self {
        Self::DataFrame {
            message: message.into(),
            source,
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a JSON serialization error
    pub fn json_serialization(message: impl Into<String>, source: serde_json::Error) -> Self {
        Self::JsonSerialization {
            message: message.into(),
            source,
        }
    }

    /// Create a binary encoding error
    pub fn binary_encoding(message: impl Into<String>, source: bincode::Error) -> Self {
        Self::BinaryEncoding {
            message: message.into(),
            source,
        }
    }

    /// Create a data validation error
    pub fn data_validation(message: impl Into<String>) -> Self {
        Self::DataValidation {
            message: message.into(),
        }
    }

    /// Create a file not found error
    pub fn file_not_found(path: impl Into<String>) -> Self {
        Self::FileNotFound { path: path.into() }
    }

    /// Create a directory traversal error
    pub fn directory_traversal(message: impl Into<String>, source: walkdir::Error) -> Self {
        Self::DirectoryTraversal {
            message: message.into(),
            source,
        }
    }
}

// Automatic conversions from common error types
impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: "I/O operation failed".to_string(),
            source: error,
        }
    }
}

impl From<polars::prelude::PolarsError> for Error {
    fn from(error: polars::prelude::PolarsError) -> Self {
        Self::DataFrame {
            message: "DataFrame operation failed".to_string(),
            source: error,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Self::JsonSerialization {
            message: "JSON serialization failed".to_string(),
            source: error,
        }
    }
}

impl From<bincode::Error> for Error {
    fn from(error: bincode::Error) -> Self {
        Self::BinaryEncoding {
            message: "Binary encoding failed".to_string(),
            source: error,
        }
    }
}

impl From<walkdir::Error> for Error {
    fn from(error: walkdir::Error) -> Self {
        Self::DirectoryTraversal {
            message: "Directory traversal failed".to_string(),
            source: error,
        }
    }
}
