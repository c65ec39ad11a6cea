//! HTTP client for the Barcelona agenda and Bicing feeds.

use tracing::{debug, info};

use crate::domain::{Event, Station};

use super::convert::{events_from_document, stations_from_document};
use super::error::FeedError;
use super::xml::Element;
use super::{FeedKind, FeedSource};

/// Agenda of events for the current month.
const DEFAULT_MONTHLY_EVENTS_URL: &str = "http://w10.bcn.es/APPS/asiasiacache/peticioXmlAsia?id=103";

/// Agenda of events for today.
const DEFAULT_TODAY_EVENTS_URL: &str = "http://w10.bcn.es/APPS/asiasiacache/peticioXmlAsia?id=199";

/// Live Bicing station list.
const DEFAULT_STATIONS_URL: &str = "https://wservice.viabicing.cat/v1/getstations.php?v=1";

/// The agenda feeds are served as Latin-1, usually without a charset header.
const EVENTS_CHARSET: &str = "iso-8859-1";

const STATIONS_CHARSET: &str = "utf-8";

/// Configuration for the feed client.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedConfig {
    /// URL of the monthly agenda
    pub monthly_events_url: String,
    /// URL of today's agenda
    pub today_events_url: String,
    /// URL of the station list
    pub stations_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl FeedConfig {
    /// Create a config pointing at the production feeds.
    pub fn new() -> Self {
        Self {
            monthly_events_url: DEFAULT_MONTHLY_EVENTS_URL.to_string(),
            today_events_url: DEFAULT_TODAY_EVENTS_URL.to_string(),
            stations_url: DEFAULT_STATIONS_URL.to_string(),
            timeout_secs: 30,
        }
    }

    /// Set a custom monthly agenda URL.
    pub fn with_monthly_events_url(mut self, url: impl Into<String>) -> Self {
        self.monthly_events_url = url.into();
        self
    }

    /// Set a custom today agenda URL.
    pub fn with_today_events_url(mut self, url: impl Into<String>) -> Self {
        self.today_events_url = url.into();
        self
    }

    /// Set a custom station list URL.
    pub fn with_stations_url(mut self, url: impl Into<String>) -> Self {
        self.stations_url = url.into();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// The agenda URL for a feed kind.
    pub fn events_url(&self, kind: FeedKind) -> &str {
        match kind {
            FeedKind::Monthly => &self.monthly_events_url,
            FeedKind::Today => &self.today_events_url,
        }
    }
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Client for the city agenda and Bicing feeds.
#[derive(Debug, Clone)]
pub struct BcnClient {
    http: reqwest::Client,
    config: FeedConfig,
}

impl BcnClient {
    /// Create a new feed client.
    pub fn new(config: FeedConfig) -> Result<Self, FeedError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { http, config })
    }

    /// The client's configuration.
    pub fn config(&self) -> &FeedConfig {
        &self.config
    }

    /// Fetch a document and decode it, falling back to `default_charset`
    /// when the response does not declare one.
    async fn fetch(&self, url: &str, default_charset: &str) -> Result<Element, FeedError> {
        debug!(url, "fetching feed");

        let response = self.http.get(url).send().await?;
        let status = response.status();

        if !status.is_success() {
            return Err(FeedError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.text_with_charset(default_charset).await?;
        Element::parse(&body)
    }
}

impl FeedSource for BcnClient {
    async fn events(&self, kind: FeedKind) -> Result<Vec<Event>, FeedError> {
        let root = self
            .fetch(self.config.events_url(kind), EVENTS_CHARSET)
            .await?;
        let events = events_from_document(&root);
        info!(?kind, count = events.len(), "loaded events");
        Ok(events)
    }

    async fn stations(&self) -> Result<Vec<Station>, FeedError> {
        let root = self
            .fetch(&self.config.stations_url, STATIONS_CHARSET)
            .await?;
        let stations = stations_from_document(&root);
        info!(count = stations.len(), "loaded stations");
        Ok(stations)
    }
}
