//! Configuration management and validation.
//!
//! Provides the settings source consumed by the CLI: a small TOML file under
//! the project root that names the default output directory and the default
//! raw CSV directory. The project root itself is never derived from the
//! running executable; callers resolve it once and pass it in explicitly.

use crate::constants::{CONFIG_FILE_NAME, DEFAULT_CSVS_DIR, DEFAULT_DATA_ROOT_DIR};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Top-level configuration for the trips processor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Data layout settings
    pub data: DataSettings,
}

/// Data layout settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataSettings {
    /// Base output directory, relative to the project root
    pub root_dir: PathBuf,

    /// Paths relative to the data root
    pub relative_paths: RelativePaths,
}

/// Paths resolved relative to the data root directory
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelativePaths {
    /// Directory containing the raw trip CSV files
    pub csvs_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data: DataSettings {
                root_dir: PathBuf::from(DEFAULT_DATA_ROOT_DIR),
                relative_paths: RelativePaths {
                    csvs_dir: PathBuf::from(DEFAULT_CSVS_DIR),
                },
            },
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::file_not_found(path.display().to_string()));
        }

        let contents = std::fs::read_to_string(path).map_err(|e| {
            Error::io(
                format!("Failed to read configuration file '{}'", path.display()),
                e,
            )
        })?;

        let config: Config = toml::from_str(&contents).map_err(|e| Error::ConfigParse {
            path: path.display().to_string(),
            source: e,
        })?;

        config.validate()?;
        debug!("Loaded configuration from {}", path.display());

        Ok(config)
    }

    /// Load configuration from `config.toml` under the given project root
    pub fn load_from_root(project_root: &Path) -> Result<Self> {
        Self::load(&project_root.join(CONFIG_FILE_NAME))
    }

    /// Resolve the base output directory against the project root
    pub fn data_root_dir(&self, project_root: &Path) -> PathBuf {
        project_root.join(&self.data.root_dir)
    }

    /// Resolve the default raw CSV directory against the project root
    pub fn default_csv_dir(&self, project_root: &Path) -> PathBuf {
        self.data_root_dir(project_root)
            .join(&self.data.relative_paths.csvs_dir)
    }

    /// Validate configuration values for consistency
    pub fn validate(&self) -> Result<()> {
        if self.data.root_dir.as_os_str().is_empty() {
            return Err(Error::configuration(
                "data.root_dir must not be empty".to_string(),
            ));
        }

        if self.data.relative_paths.csvs_dir.as_os_str().is_empty() {
            return Err(Error::configuration(
                "data.relative_paths.csvs_dir must not be empty".to_string(),
            ));
        }

        Ok(())
    }
}
