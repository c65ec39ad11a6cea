//! Event search pipeline.
//!
//! Filters agenda events with a [`SearchExpression`] and, for today's
//! agenda, ranks the bike-share stations around each match.

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::info;

use crate::domain::{Event, Station};
use crate::feed::{FeedError, FeedKind, FeedSource};
use crate::query::SearchExpression;

use super::config::FinderConfig;
use super::rank::rank_stations;

/// Keep the events matching `query`, in feed order.
pub fn filter_events(events: Vec<Event>, query: &SearchExpression) -> Vec<Event> {
    events.into_iter().filter(|e| query.matches(e)).collect()
}

/// Keep the events on `date` matching `query`, in feed order.
///
/// No stations are ranked; the returned events have empty station lists.
pub fn find_on_date(events: Vec<Event>, query: &SearchExpression, date: NaiveDate) -> Vec<Event> {
    events
        .into_iter()
        .filter(|e| e.date == date && query.matches(e))
        .collect()
}

/// Keep the events matching `query` and rank `stations` around each one.
pub fn find_today(
    events: Vec<Event>,
    query: &SearchExpression,
    stations: &[Arc<Station>],
    config: &FinderConfig,
) -> Vec<Event> {
    let mut matched = filter_events(events, query);
    rank_stations(&mut matched, stations, config.max_distance_m);
    matched
}

/// Which events to look for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchMode {
    /// Today's agenda, with nearby stations.
    Today,
    /// The monthly agenda restricted to one date, without stations.
    OnDate(NaiveDate),
}

/// Runs searches against a feed source.
#[derive(Debug, Clone)]
pub struct Finder<S> {
    source: S,
    config: FinderConfig,
}

impl<S: FeedSource> Finder<S> {
    /// Create a finder over `source`.
    pub fn new(source: S, config: FinderConfig) -> Self {
        Self { source, config }
    }

    /// The finder's configuration.
    pub fn config(&self) -> &FinderConfig {
        &self.config
    }

    /// Load the feeds needed for `mode` and return the matching events.
    ///
    /// An empty result is not an error. Station data is only loaded for
    /// [`SearchMode::Today`].
    pub async fn run(
        &self,
        query: &SearchExpression,
        mode: SearchMode,
    ) -> Result<Vec<Event>, FeedError> {
        let found = match mode {
            SearchMode::OnDate(date) => {
                let events = self.source.events(FeedKind::Monthly).await?;
                find_on_date(events, query, date)
            }
            SearchMode::Today => {
                let events = self.source.events(FeedKind::Today).await?;
                let stations: Vec<Arc<Station>> = self
                    .source
                    .stations()
                    .await?
                    .into_iter()
                    .map(Arc::new)
                    .collect();
                find_today(events, query, &stations, &self.config)
            }
        };

        info!(%query, ?mode, count = found.len(), "search finished");
        Ok(found)
    }
}
