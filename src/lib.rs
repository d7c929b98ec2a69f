pub mod catalog;
pub mod config;
pub mod download;
pub mod inventory;

// Re-export commonly used types for easier access in tests
pub use catalog::{CatalogClient, CatalogError, Episode, Show};
pub use config::ShowConfig;
pub use download::{BatchSummary, DownloadEngine, download_latest, episodes_to_download};
pub use inventory::{DownloadedFile, InventoryError, list_downloaded};
