use anyhow::{Context, Result};
use directories::UserDirs;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const CONFIG_FILE_NAME: &str = ".global_radio_downloader.cfg";

const DEFAULT_FILE_FORMAT: &str = "m4a";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required config key '{0}'")]
    MissingKey(&'static str),
}

/// Show selection and download destination, loaded once at startup and passed
/// by reference through the rest of the run.
#[derive(Debug, Clone)]
pub struct ShowConfig {
    pub station_catchup_url: String,
    pub show_id: String,
    pub file_format: String,
    pub download_folder: PathBuf,
}

impl ShowConfig {
    /// Load the config from an INI-style file with a single `[radio-station]`
    /// section. Creates the download folder (and parents) if missing.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        let values = parse_ini(&content);

        let station_catchup_url = values
            .get("station_catchup_url")
            .filter(|v| !v.is_empty())
            .ok_or(ConfigError::MissingKey("station_catchup_url"))?
            .clone();

        let show_id = values
            .get("show_id")
            .filter(|v| !v.is_empty())
            .ok_or(ConfigError::MissingKey("show_id"))?
            .clone();

        let file_format = values
            .get("file_format")
            .filter(|v| !v.is_empty())
            .cloned()
            .unwrap_or_else(|| DEFAULT_FILE_FORMAT.to_string());

        let download_folder = match values.get("download_folder").filter(|v| !v.is_empty()) {
            Some(folder) => expand_home(folder.trim())?,
            None => default_download_folder()?,
        };

        fs::create_dir_all(&download_folder)
            .with_context(|| format!("Failed to create download folder: {:?}", download_folder))?;

        Ok(Self {
            station_catchup_url,
            show_id,
            file_format,
            download_folder,
        })
    }
}

/// Path of the config file in the user's home directory.
pub fn default_config_path() -> Result<PathBuf> {
    let user_dirs = UserDirs::new().context("Failed to determine home directory")?;
    Ok(user_dirs.home_dir().join(CONFIG_FILE_NAME))
}

fn default_download_folder() -> Result<PathBuf> {
    let user_dirs = UserDirs::new().context("Failed to determine home directory")?;
    Ok(match user_dirs.download_dir() {
        Some(dir) => dir.to_path_buf(),
        None => user_dirs.home_dir().join("Downloads"),
    })
}

fn expand_home(path: &str) -> Result<PathBuf> {
    if path == "~" || path.starts_with("~/") {
        let user_dirs = UserDirs::new().context("Failed to determine home directory")?;
        let home = user_dirs.home_dir();
        Ok(match path.strip_prefix("~/") {
            Some(rest) => home.join(rest),
            None => home.to_path_buf(),
        })
    } else {
        Ok(PathBuf::from(path))
    }
}

/// Single-section INI: `key = value` lines, `[section]` headers and
/// `#`/`;` comment lines ignored.
fn parse_ini(content: &str) -> HashMap<String, String> {
    let mut values = HashMap::new();

    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
            continue;
        }
        if line.starts_with('[') {
            continue;
        }
        if let Some((key, value)) = line.split_once('=') {
            values.insert(key.trim().to_string(), value.trim().to_string());
        }
    }

    values
}
