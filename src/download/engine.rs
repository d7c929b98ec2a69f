use anyhow::{Context, Result, bail};
use futures_util::StreamExt;
use reqwest::Client;
use std::fs::{self, File};
use std::io::Write;
use std::path::PathBuf;
use tracing::debug;

use super::progress;
use crate::catalog::Episode;
use crate::config::ShowConfig;

pub struct DownloadEngine {
    client: Client,
}

impl DownloadEngine {
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("catchup/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { client })
    }

    /// Stream one episode to `<folder>/tmp/<YYYYMMDD>.<ext>`, then move it
    /// into the final folder under the same name. The rename happens only
    /// after the full body has been written, so a failed transfer leaves at
    /// most a partial file under `tmp`.
    pub async fn download(&self, episode: &Episode, config: &ShowConfig) -> Result<PathBuf> {
        let file_name = format!(
            "{}.{}",
            episode.date.format("%Y%m%d"),
            config.file_format
        );
        let tmp_dir = config.download_folder.join("tmp");
        let tmp_path = tmp_dir.join(&file_name);
        let final_path = config.download_folder.join(&file_name);

        fs::create_dir_all(&tmp_dir)
            .with_context(|| format!("Failed to create temp folder: {:?}", tmp_dir))?;

        debug!("Streaming {} to {:?}", episode.stream_url, tmp_path);

        let response = self
            .client
            .get(&episode.stream_url)
            .send()
            .await
            .with_context(|| format!("Failed to open stream for '{}'", episode.title_with_date))?;

        if !response.status().is_success() {
            bail!(
                "Stream request for '{}' returned HTTP status {}",
                episode.title_with_date,
                response.status()
            );
        }

        // The expected total comes from Content-Length; without it the bar
        // would render a misleading N/0 fraction, so refuse the stream.
        let total_size = response.content_length().with_context(|| {
            format!(
                "Stream response for '{}' has no Content-Length header",
                episode.title_with_date
            )
        })?;
        let pb = progress::episode_bar(&episode.title_with_date, total_size);

        let mut file = File::create(&tmp_path)
            .with_context(|| format!("Failed to create temp file: {:?}", tmp_path))?;

        let mut stream = response.bytes_stream();
        while let Some(chunk_result) = stream.next().await {
            let chunk = chunk_result.context("Failed to read chunk from response")?;
            file.write_all(&chunk)
                .context("Failed to write chunk to file")?;
            pb.inc(chunk.len() as u64);
        }

        file.flush().context("Failed to flush file")?;
        drop(file);

        fs::rename(&tmp_path, &final_path).with_context(|| {
            format!("Failed to move {:?} into {:?}", tmp_path, final_path)
        })?;

        progress::finish(&pb);
        Ok(final_path)
    }
}
