//! Event finder.
//!
//! Matches agenda events against a search query and, for today's events,
//! lists the bike-share stations within walking distance: those with free
//! slots to leave a bike and those with bikes to take, nearest first.

mod config;
mod rank;
mod search;

pub use config::{DEFAULT_MAX_DISTANCE_M, FinderConfig};
pub use rank::rank_stations;
pub use search::{Finder, SearchMode, filter_events, find_on_date, find_today};
