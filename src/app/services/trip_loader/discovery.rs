//! Input file discovery for raw trip CSVs

use crate::constants::CSV_EXTENSION;
use crate::{Error, Result};
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

/// Discover CSV files under the input directory
///
/// Walks the directory recursively, keeps regular files with a `.csv`
/// extension, and sorts the result for a deterministic processing order.
pub fn discover_csv_files(csv_dir: &Path) -> Result<Vec<PathBuf>> {
    if !csv_dir.exists() {
        return Err(Error::file_not_found(csv_dir.display().to_string()));
    }

    let mut csv_files = Vec::new();
    for entry in WalkDir::new(csv_dir).follow_links(false) {
        let entry = entry?;
        let path = entry.path();
        if path.is_file() && path.extension().and_then(|s| s.to_str()) == Some(CSV_EXTENSION) {
            csv_files.push(path.to_path_buf());
        }
    }

    csv_files.sort();

    debug!(
        "Discovered {} CSV files in {}",
        csv_files.len(),
        csv_dir.display()
    );

    Ok(csv_files)
}

/// Select the input files for a run
///
/// Explicit `datapaths` override discovery; `num_files` caps the selection in
/// either case. An empty selection is an error since the pipeline has nothing
/// to produce.
pub fn select_input_files(
    csv_dir: &Path,
    num_files: Option<usize>,
    datapaths: Option<&[PathBuf]>,
) -> Result<Vec<PathBuf>> {
    let mut files = match datapaths {
        Some(paths) => paths.to_vec(),
        None => discover_csv_files(csv_dir)?,
    };

    if let Some(cap) = num_files {
        files.truncate(cap);
    }

    if files.is_empty() {
        return Err(Error::data_validation(format!(
            "No CSV files to process in '{}'",
            csv_dir.display()
        )));
    }

    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn touch(path: &Path) {
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, "header\n").unwrap();
    }

    #[test]
    fn test_discovery_is_recursive_and_sorted() {
        let temp_dir = TempDir::new().unwrap();
        touch(&temp_dir.path().join("2023/02-feb.csv"));
        touch(&temp_dir.path().join("2023/01-jan.csv"));
        touch(&temp_dir.path().join("readme.txt"));

        let files = discover_csv_files(temp_dir.path()).unwrap();
        assert_eq!(files.len(), 2);
        assert!(files[0].ends_with("2023/01-jan.csv"));
        assert!(files[1].ends_with("2023/02-feb.csv"));
    }

    #[test]
    fn test_missing_directory_is_an_error() {
        let result = discover_csv_files(Path::new("/nonexistent/csvs"));
        assert!(matches!(result, Err(Error::FileNotFound { .. })));
    }

    #[test]
    fn test_num_files_caps_selection() {
        let temp_dir = TempDir::new().unwrap();
        touch(&temp_dir.path().join("a.csv"));
        touch(&temp_dir.path().join("b.csv"));
        touch(&temp_dir.path().join("c.csv"));

        let files = select_input_files(temp_dir.path(), Some(2), None).unwrap();
        assert_eq!(files.len(), 2);
        assert!(files[0].ends_with("a.csv"));
    }

    #[test]
    fn test_explicit_datapaths_override_discovery() {
        let temp_dir = TempDir::new().unwrap();
        touch(&temp_dir.path().join("ignored.csv"));
        let explicit = vec![PathBuf::from("x.csv"), PathBuf::from("y.csv")];

        let files = select_input_files(temp_dir.path(), None, Some(&explicit)).unwrap();
        assert_eq!(files, explicit);
    }

    #[test]
    fn test_empty_selection_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let result = select_input_files(temp_dir.path(), None, None);
        assert!(matches!(result, Err(Error::DataValidation { .. })));
    }
}
