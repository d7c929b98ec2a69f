use anyhow::Result;
use console::{Term, style};
use std::collections::HashSet;
use std::path::Path;
use tracing::debug;

use super::engine::DownloadEngine;
use super::progress;
use crate::catalog::{self, CatalogClient, Episode, FAKE_RESPONSE_FILE};
use crate::config::ShowConfig;
use crate::inventory::{self, DownloadedFile};

#[derive(Debug, Clone)]
pub struct FailedDownload {
    pub title: String,
    pub error: String,
}

/// What happened to a batch: how many episodes landed in the download folder
/// and which ones failed. One failure does not abort the remaining downloads.
#[derive(Debug, Default)]
pub struct BatchSummary {
    pub downloaded: usize,
    pub failed: Vec<FailedDownload>,
}

impl BatchSummary {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Episodes whose broadcast date is absent from the local inventory, in
/// catalog order. Matching is by calendar date only.
pub fn episodes_to_download(
    episodes: Vec<Episode>,
    downloaded: &[DownloadedFile],
) -> Vec<Episode> {
    let downloaded_dates: HashSet<_> = downloaded.iter().map(|file| file.date).collect();

    episodes
        .into_iter()
        .filter(|episode| !downloaded_dates.contains(&episode.date))
        .collect()
}

async fn fetch_episodes(config: &ShowConfig, with_fake_response: bool) -> Result<Vec<Episode>> {
    let shows = if with_fake_response {
        catalog::read_fixture(Path::new(FAKE_RESPONSE_FILE))?
    } else {
        CatalogClient::new()?
            .fetch_catalog(&config.station_catchup_url)
            .await?
    };

    let show = catalog::find_show(shows, &config.show_id)?;
    Ok(catalog::parse_episodes(show)?)
}

/// Fetch the catalog, diff it against the download folder and pull every
/// pending episode sequentially. Under `with_fake_response` the transfers are
/// skipped and only the completed progress line is printed.
pub async fn download_latest(
    config: &ShowConfig,
    with_fake_response: bool,
) -> Result<BatchSummary> {
    let term = Term::stdout();
    debug!("Checking for latest episodes");

    let episodes = fetch_episodes(config, with_fake_response).await?;
    let downloaded = inventory::list_downloaded(&config.download_folder, &config.file_format)?;
    let pending = episodes_to_download(episodes, &downloaded);

    if pending.is_empty() {
        term.write_line("Nothing to download, all up to date 🙌")?;
        return Ok(BatchSummary::default());
    }

    term.write_line(&format!(
        "Found {} new episodes to download.",
        style(pending.len()).cyan()
    ))?;

    let engine = DownloadEngine::new()?;
    let mut summary = BatchSummary::default();

    for (index, episode) in pending.iter().enumerate() {
        term.write_line(&format!(
            "Downloading {} of {}:",
            index + 1,
            pending.len()
        ))?;

        if with_fake_response {
            progress::completed(&episode.title_with_date, 100);
            summary.downloaded += 1;
            continue;
        }

        match engine.download(episode, config).await {
            Ok(path) => {
                debug!("Saved {:?}", path);
                summary.downloaded += 1;
            }
            Err(e) => {
                term.write_line(&format!(
                    "{} {}: {:#}",
                    style("❌").red(),
                    episode.title_with_date,
                    e
                ))?;
                summary.failed.push(FailedDownload {
                    title: episode.title_with_date.clone(),
                    error: format!("{:#}", e),
                });
            }
        }
    }

    term.write_line("Downloads complete 🏁")?;

    if !summary.is_success() {
        term.write_line(&format!(
            "{} {} of {} downloads failed:",
            style("⚠️").yellow(),
            summary.failed.len(),
            pending.len()
        ))?;
        for failed in &summary.failed {
            term.write_line(&format!("   {}: {}", failed.title, failed.error))?;
        }
    }

    Ok(summary)
}
