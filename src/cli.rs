use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "catchup")]
#[command(about = "Download the latest episodes of a radio show from a station catch-up API")]
#[command(long_about = "
catchup checks a radio station's catch-up endpoint for newly published episodes
of a configured show and downloads any not already present locally. Files are
named by broadcast date (YYYYMMDD.<ext>), and an episode counts as downloaded
when a local file carries the same date.

Configuration is read from ~/.global_radio_downloader.cfg, an INI-style file
with a single [radio-station] section:

  [radio-station]
  station_catchup_url = https://example.com/catchup/my-station
  show_id = club-classics
  file_format = m4a
  download_folder = ~/Downloads/club-classics
")]
#[command(version)]
pub struct Cli {
    /// Read the catalog from a local fake-response.json instead of the
    /// network, and skip the actual audio transfers
    #[arg(long)]
    pub with_fake_response: bool,

    /// Enable diagnostic output
    #[arg(short, long)]
    pub verbose: bool,

    /// Override config file path
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<String>,
}
