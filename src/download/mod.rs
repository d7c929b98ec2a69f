pub mod engine;
pub mod manager;
pub mod progress;

pub use engine::DownloadEngine;
pub use manager::{BatchSummary, FailedDownload, download_latest, episodes_to_download};
