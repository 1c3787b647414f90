//! JSON documents in the index directory.

use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;

use rxcensus_analysis::statistics::StatisticsTable;
use rxcensus_core::errors::{PipelineError, StorageError};
use rxcensus_core::types::{AllowList, OperatorCatalog, UsageTable};

pub fn read_text(path: &Path) -> Result<String, StorageError> {
    fs::read_to_string(path).map_err(|source| StorageError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Write `contents`, creating parent directories. Existing files are replaced.
pub fn write_text(path: &Path, contents: &str) -> Result<(), StorageError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| StorageError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    fs::write(path, contents).map_err(|source| StorageError::Io {
        path: path.to_path_buf(),
        source,
    })
}

pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, StorageError> {
    let text = read_text(path)?;
    serde_json::from_str(&text).map_err(|e| StorageError::Json {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Pretty-printed, trailing newline.
pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), StorageError> {
    let mut text = serde_json::to_string_pretty(value).map_err(|e| StorageError::Json {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    text.push('\n');
    write_text(path, &text)
}

pub fn load_catalog(path: &Path) -> Result<OperatorCatalog, PipelineError> {
    let text = read_text(path)?;
    let catalog = OperatorCatalog::from_json_str(&text, &path.display().to_string())?;
    tracing::debug!(path = %path.display(), operators = catalog.len(), "catalog loaded");
    Ok(catalog)
}

pub fn load_allow_list(path: &Path) -> Result<AllowList, PipelineError> {
    let text = read_text(path)?;
    Ok(AllowList::from_json_str(&text, &path.display().to_string())?)
}

pub fn save_allow_list(path: &Path, allow_list: &AllowList) -> Result<(), StorageError> {
    write_json(path, allow_list)
}

pub fn load_usage(path: &Path) -> Result<UsageTable, StorageError> {
    read_json(path)
}

pub fn save_usage(path: &Path, table: &UsageTable) -> Result<(), StorageError> {
    write_json(path, table)
}

pub fn save_statistics(path: &Path, stats: &StatisticsTable) -> Result<(), StorageError> {
    write_json(path, stats)
}
