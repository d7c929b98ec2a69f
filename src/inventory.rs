use anyhow::{Context, Result};
use chrono::NaiveDate;
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum InventoryError {
    #[error("downloaded file '{0}' does not start with a YYYYMMDD date")]
    BadFileName(String),
}

/// A file already present in the download folder, keyed by the date embedded
/// in its name.
#[derive(Debug, Clone)]
pub struct DownloadedFile {
    pub file_name: String,
    pub date: NaiveDate,
}

impl DownloadedFile {
    /// Parse the first 8 characters of the filename as `YYYYMMDD`.
    pub fn from_name(file_name: &str) -> Result<Self, InventoryError> {
        let date = file_name
            .get(..8)
            .and_then(|prefix| NaiveDate::parse_from_str(prefix, "%Y%m%d").ok())
            .ok_or_else(|| InventoryError::BadFileName(file_name.to_string()))?;

        Ok(Self {
            file_name: file_name.to_string(),
            date,
        })
    }
}

/// Enumerate already-downloaded episodes: every `*.<extension>` file directly
/// inside the download folder. Non-recursive, so in-progress files under the
/// `tmp` subfolder are never counted.
pub fn list_downloaded(folder: &Path, extension: &str) -> Result<Vec<DownloadedFile>> {
    debug!("Listing downloaded episodes in {:?}", folder);

    let entries = fs::read_dir(folder)
        .with_context(|| format!("Failed to read download folder: {:?}", folder))?;

    let mut downloads = Vec::new();
    for entry in entries {
        let entry = entry.with_context(|| format!("Failed to read entry in {:?}", folder))?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        if path.extension().and_then(|e| e.to_str()) != Some(extension) {
            continue;
        }

        let file_name = entry.file_name().to_string_lossy().into_owned();
        downloads.push(DownloadedFile::from_name(&file_name)?);
    }

    debug!("Found {} downloads in the folder", downloads.len());
    Ok(downloads)
}
