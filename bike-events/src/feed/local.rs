//! Feed source backed by XML files on disk.
//!
//! Useful for offline runs and tests. Expects a directory with
//! `monthly.xml`, `today.xml` and `stations.xml`, in the same format as the
//! live feeds but UTF-8 encoded.

use std::path::{Path, PathBuf};

use tracing::info;

use crate::domain::{Event, Station};

use super::convert::{events_from_document, stations_from_document};
use super::error::FeedError;
use super::xml::Element;
use super::{FeedKind, FeedSource};

/// Reads the feeds from files in a directory.
#[derive(Debug, Clone)]
pub struct LocalFeed {
    dir: PathBuf,
}

impl LocalFeed {
    /// Create a local feed reading from `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The directory the feeds are read from.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File name for an agenda feed.
    pub fn events_file(kind: FeedKind) -> &'static str {
        match kind {
            FeedKind::Monthly => "monthly.xml",
            FeedKind::Today => "today.xml",
        }
    }

    /// File name for the station list.
    pub const STATIONS_FILE: &'static str = "stations.xml";

    async fn load(&self, file: &str) -> Result<Element, FeedError> {
        let path = self.dir.join(file);
        let contents = tokio::fs::read_to_string(&path)
            .await
            .map_err(|source| FeedError::Io {
                path: path.clone(),
                source,
            })?;
        Element::parse(&contents)
    }
}

impl FeedSource for LocalFeed {
    async fn events(&self, kind: FeedKind) -> Result<Vec<Event>, FeedError> {
        let root = self.load(Self::events_file(kind)).await?;
        let events = events_from_document(&root);
        info!(?kind, count = events.len(), dir = %self.dir.display(), "loaded local events");
        Ok(events)
    }

    async fn stations(&self) -> Result<Vec<Station>, FeedError> {
        let root = self.load(Self::STATIONS_FILE).await?;
        let stations = stations_from_document(&root);
        info!(count = stations.len(), dir = %self.dir.display(), "loaded local stations");
        Ok(stations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const TODAY: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
        <response><acte>
            <nom>Concert Jove</nom>
            <lloc_simple><nom>Sala Apolo</nom>
                <adreca_simple><carrer>C Nou de la Rambla</carrer><numero>113</numero>
                <coordenades><googleMaps lat="41.3744" lon="2.1698"/></coordenades>
                </adreca_simple>
            </lloc_simple>
            <data><data_proper_acte>12/05/2018 20.00</data_proper_acte></data>
        </acte></response>"#;

    const STATIONS: &str = r#"<bicing_stations>
        <station><lat>41.3745</lat><long>2.1699</long><street>Paral·lel</street>
            <streetNumber>132</streetNumber><slots>4</slots><bikes>2</bikes></station>
        </bicing_stations>"#;

    #[tokio::test]
    async fn loads_events_and_stations() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("today.xml"), TODAY).unwrap();
        std::fs::write(dir.path().join("stations.xml"), STATIONS).unwrap();

        let feed = LocalFeed::new(dir.path());

        let events = feed.events(FeedKind::Today).await.unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].name, "Concert Jove");
        assert_eq!(events[0].address, "C Nou de la Rambla 113");

        let stations = feed.stations().await.unwrap();
        assert_eq!(stations.len(), 1);
        assert_eq!(stations[0].street, "Paral·lel");
    }

    #[tokio::test]
    async fn missing_file_is_io_error() {
        let dir = tempdir().unwrap();
        let feed = LocalFeed::new(dir.path());

        let err = feed.events(FeedKind::Monthly).await.unwrap_err();
        match err {
            FeedError::Io { path, .. } => assert!(path.ends_with("monthly.xml")),
            other => panic!("expected Io error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn malformed_file_is_xml_error() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("stations.xml"), "<bicing_stations><station>").unwrap();

        let feed = LocalFeed::new(dir.path());
        assert!(matches!(
            feed.stations().await,
            Err(FeedError::Xml { .. })
        ));
    }
}
