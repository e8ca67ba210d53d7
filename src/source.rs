//! Dataset loading from JSON files
//!
//! Datasets live in JSON files shaped like the crate's [`Dataset`]
//! structure; the legacy field names (`data` for the series sequence,
//! `label` for a series identifier) are accepted transparently through
//! serde aliases. Directories of dataset files are walked in file-name
//! order so repeated runs report in a stable sequence.

use std::fs;
use std::path::Path;

use crate::dataset::Dataset;
use crate::error::SourceError;

/// Load one dataset from a JSON file
pub fn load_dataset(path: impl AsRef<Path>) -> Result<Dataset, SourceError> {
    let contents = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&contents)?)
}

/// Load every `*.json` dataset in a directory, sorted by file name
///
/// Returns `(file stem, dataset)` pairs. Non-JSON directory entries are
/// skipped; a JSON file that fails to parse aborts the walk with the
/// parse error.
pub fn load_dir(path: impl AsRef<Path>) -> Result<Vec<(String, Dataset)>, SourceError> {
    let path = path.as_ref();
    if !path.is_dir() {
        return Err(SourceError::NotADataset(path.display().to_string()));
    }

    let mut files: Vec<_> = fs::read_dir(path)?
        .collect::<std::io::Result<Vec<_>>>()?
        .into_iter()
        .map(|entry| entry.path())
        .filter(|p| p.extension().map(|ext| ext == "json").unwrap_or(false))
        .collect();
    files.sort();

    let mut datasets = Vec::with_capacity(files.len());
    for file in files {
        datasets.push((stem_of(&file), load_dataset(&file)?));
    }
    Ok(datasets)
}

/// Load a dataset file, or every dataset in a directory
pub fn load_path(path: impl AsRef<Path>) -> Result<Vec<(String, Dataset)>, SourceError> {
    let path = path.as_ref();
    if path.is_dir() {
        load_dir(path)
    } else if path.is_file() {
        Ok(vec![(stem_of(path), load_dataset(path)?)])
    } else {
        Err(SourceError::NotADataset(path.display().to_string()))
    }
}

fn stem_of(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}
