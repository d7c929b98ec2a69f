use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use reqwest::Client;
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;
use tracing::debug;

/// Catalog listing read from `fake-response.json` under `--with-fake-response`.
pub const FAKE_RESPONSE_FILE: &str = "fake-response.json";

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("show '{0}' not found in the station catalog")]
    ShowNotFound(String),
    #[error("episode '{id}' has a malformed start date '{start_date}'")]
    BadStartDate { id: String, start_date: String },
}

/// One show object as returned by the catch-up endpoint. Fields beyond the
/// show id and its episode list are ignored.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Show {
    pub show_id: String,
    pub episodes: Vec<RawEpisode>,
}

/// Episode exactly as it appears on the wire.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawEpisode {
    pub id: String,
    pub start_date: String,
    pub stream_url: String,
    pub title: String,
    pub title_with_date: String,
}

/// Episode with the broadcast date derived from the raw start timestamp.
/// Immutable once constructed from catalog data.
#[derive(Debug, Clone)]
pub struct Episode {
    pub id: String,
    pub start_date: String,
    pub date: NaiveDate,
    pub stream_url: String,
    pub title: String,
    pub title_with_date: String,
}

impl Episode {
    /// The broadcast date is the first 10 characters of the start timestamp,
    /// e.g. `2024-01-01T19:00:00` -> `2024-01-01`.
    fn from_raw(raw: RawEpisode) -> Result<Self, CatalogError> {
        let date = raw
            .start_date
            .get(..10)
            .and_then(|prefix| NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok())
            .ok_or_else(|| CatalogError::BadStartDate {
                id: raw.id.clone(),
                start_date: raw.start_date.clone(),
            })?;

        Ok(Self {
            id: raw.id,
            start_date: raw.start_date,
            date,
            stream_url: raw.stream_url,
            title: raw.title,
            title_with_date: raw.title_with_date,
        })
    }
}

pub struct CatalogClient {
    client: Client,
}

impl CatalogClient {
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("catchup/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { client })
    }

    /// Fetch the full station catalog from the catch-up endpoint.
    pub async fn fetch_catalog(&self, url: &str) -> Result<Vec<Show>> {
        debug!("Calling station catch-up endpoint {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .context("Failed to call the catch-up endpoint")?;

        if !response.status().is_success() {
            bail!(
                "Catch-up endpoint returned HTTP status {}",
                response.status()
            );
        }

        response
            .json()
            .await
            .context("Failed to decode the catch-up response as JSON")
    }
}

/// Read a catalog from a local fixture file instead of the network.
pub fn read_fixture(path: &Path) -> Result<Vec<Show>> {
    debug!("Reading a fake catch-up response from {:?}", path);

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read fixture file: {:?}", path))?;

    serde_json::from_str(&content)
        .with_context(|| format!("Failed to decode fixture file as JSON: {:?}", path))
}

/// Locate the configured show in the catalog.
pub fn find_show(catalog: Vec<Show>, show_id: &str) -> Result<Show, CatalogError> {
    catalog
        .into_iter()
        .find(|show| show.show_id == show_id)
        .ok_or_else(|| CatalogError::ShowNotFound(show_id.to_string()))
}

/// Map every catalog item to an Episode, in catalog order.
pub fn parse_episodes(show: Show) -> Result<Vec<Episode>, CatalogError> {
    let episodes = show
        .episodes
        .into_iter()
        .map(Episode::from_raw)
        .collect::<Result<Vec<_>, _>>()?;

    debug!("Found {} episodes in show response", episodes.len());
    Ok(episodes)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_catalog() -> Vec<Show> {
        serde_json::from_str(
            r#"[
                {
                    "showId": "other-show",
                    "episodes": []
                },
                {
                    "showId": "club-classics",
                    "episodes": [
                        {
                            "id": "ep-1",
                            "startDate": "2024-01-01T19:00:00",
                            "streamUrl": "https://example.com/ep-1.m4a",
                            "title": "Club Classics",
                            "titleWithDate": "Club Classics 01/01/2024"
                        },
                        {
                            "id": "ep-2",
                            "startDate": "2024-01-02T19:00:00",
                            "streamUrl": "https://example.com/ep-2.m4a",
                            "title": "Club Classics",
                            "titleWithDate": "Club Classics 02/01/2024"
                        }
                    ]
                }
            ]"#,
        )
        .unwrap()
    }

    #[test]
    fn test_find_show() {
        let show = find_show(sample_catalog(), "club-classics").unwrap();
        assert_eq!(show.show_id, "club-classics");
        assert_eq!(show.episodes.len(), 2);
    }

    #[test]
    fn test_find_show_missing_is_explicit_error() {
        let err = find_show(sample_catalog(), "does-not-exist").unwrap_err();
        assert!(matches!(err, CatalogError::ShowNotFound(_)));
        assert!(err.to_string().contains("does-not-exist"));
    }

    #[test]
    fn test_parse_episodes_in_catalog_order() {
        let show = find_show(sample_catalog(), "club-classics").unwrap();
        let episodes = parse_episodes(show).unwrap();

        assert_eq!(episodes.len(), 2);
        assert_eq!(episodes[0].id, "ep-1");
        assert_eq!(
            episodes[0].date,
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
        );
        assert_eq!(episodes[1].id, "ep-2");
        assert_eq!(
            episodes[1].date,
            NaiveDate::from_ymd_opt(2024, 1, 2).unwrap()
        );
    }

    #[test]
    fn test_date_derived_from_timestamp_prefix() {
        let raw = RawEpisode {
            id: "ep".into(),
            start_date: "2024-06-30T07:00:00+01:00".into(),
            stream_url: "https://example.com/ep.m4a".into(),
            title: "Show".into(),
            title_with_date: "Show 30/06/2024".into(),
        };

        let episode = Episode::from_raw(raw).unwrap();
        assert_eq!(
            episode.date,
            NaiveDate::from_ymd_opt(2024, 6, 30).unwrap()
        );
        assert_eq!(episode.start_date, "2024-06-30T07:00:00+01:00");
    }

    #[test]
    fn test_malformed_start_date_is_an_error() {
        let raw = RawEpisode {
            id: "ep-bad".into(),
            start_date: "soon".into(),
            stream_url: "https://example.com/ep.m4a".into(),
            title: "Show".into(),
            title_with_date: "Show ??".into(),
        };

        let err = Episode::from_raw(raw).unwrap_err();
        assert!(matches!(err, CatalogError::BadStartDate { .. }));
        assert!(err.to_string().contains("ep-bad"));
    }

    #[test]
    fn test_read_fixture() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("fake-response.json");
        std::fs::write(
            &path,
            r#"[{"showId": "x", "episodes": []}]"#,
        )
        .unwrap();

        let catalog = read_fixture(&path).unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog[0].show_id, "x");
    }
}
