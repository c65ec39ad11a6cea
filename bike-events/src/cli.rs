//! Command-line interface.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::Parser;

use crate::feed::FeedConfig;
use crate::finder::{DEFAULT_MAX_DISTANCE_M, FinderConfig, SearchMode};
use crate::report::ReportFormat;

/// Find events in the Barcelona agenda and the Bicing stations around them.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Search terms: 'term', ['all', 'of', 'these'] or ('any', 'of', 'these'), nested freely
    #[arg(short, long)]
    pub key: String,

    /// Max. distance to the Bicing stations, in meters
    #[arg(long, default_value_t = DEFAULT_MAX_DISTANCE_M)]
    pub distance: f64,

    /// Event date (dd/mm/yyyy). Searches the monthly agenda, without stations
    #[arg(long, value_parser = parse_date)]
    pub date: Option<NaiveDate>,

    /// Output file
    #[arg(short, long, default_value = "index.html")]
    pub output: PathBuf,

    /// Output format
    #[arg(long, value_enum, default_value_t = ReportFormat::Html)]
    pub format: ReportFormat,

    /// Read monthly.xml, today.xml and stations.xml from this directory
    /// instead of fetching the live feeds
    #[arg(long)]
    pub data_dir: Option<PathBuf>,

    /// Monthly agenda URL
    #[arg(long, env = "BIKE_EVENTS_MONTHLY_URL")]
    pub monthly_url: Option<String>,

    /// Today's agenda URL
    #[arg(long, env = "BIKE_EVENTS_TODAY_URL")]
    pub today_url: Option<String>,

    /// Bicing station list URL
    #[arg(long, env = "BIKE_EVENTS_STATIONS_URL")]
    pub stations_url: Option<String>,

    /// HTTP timeout in seconds
    #[arg(long, default_value_t = 30)]
    pub timeout: u64,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// What to search for, from `--date`.
    pub fn search_mode(&self) -> SearchMode {
        match self.date {
            Some(date) => SearchMode::OnDate(date),
            None => SearchMode::Today,
        }
    }

    /// Finder settings from `--distance`.
    pub fn finder_config(&self) -> FinderConfig {
        FinderConfig::new(self.distance)
    }

    /// Feed client settings, applying any URL overrides.
    pub fn feed_config(&self) -> FeedConfig {
        let mut config = FeedConfig::new().with_timeout(self.timeout);
        if let Some(url) = &self.monthly_url {
            config = config.with_monthly_events_url(url);
        }
        if let Some(url) = &self.today_url {
            config = config.with_today_events_url(url);
        }
        if let Some(url) = &self.stations_url {
            config = config.with_stations_url(url);
        }
        config
    }
}

/// Parse a `dd/mm/yyyy` date argument.
pub fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s, "%d/%m/%Y").map_err(|e| format!("expected dd/mm/yyyy: {e}"))
}
