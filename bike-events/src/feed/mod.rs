//! City agenda and Bicing station feeds.
//!
//! Fetches the XML feeds (or reads them from disk) and converts their
//! records into domain [`Event`]s and [`Station`]s. Records that cannot be
//! converted are logged and skipped.

mod client;
mod convert;
mod error;
mod local;
mod xml;

use std::future::Future;

use crate::domain::{Event, Station};

pub use client::{BcnClient, FeedConfig};
pub use convert::{ConversionError, events_from_document, stations_from_document};
pub use error::FeedError;
pub use local::LocalFeed;
pub use xml::Element;

/// Which agenda to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedKind {
    /// Every event of the current month.
    Monthly,
    /// Events happening today.
    Today,
}

/// Trait for providing events and stations.
///
/// This abstraction allows the finder to be run against the live feeds,
/// local files, or in-memory test data.
pub trait FeedSource {
    /// Load every event of the given agenda, in feed order.
    fn events(&self, kind: FeedKind) -> impl Future<Output = Result<Vec<Event>, FeedError>>;

    /// Load every bike-share station, in feed order.
    fn stations(&self) -> impl Future<Output = Result<Vec<Station>, FeedError>>;
}
