//! Event and bike-station finder.
//!
//! Searches the Barcelona city agenda for events matching a boolean query
//! and, for today's events, lists the Bicing stations nearby with bikes to
//! take or free slots to leave one. Results are written as a static HTML
//! report.

pub mod cli;
pub mod domain;
pub mod feed;
pub mod finder;
pub mod query;
pub mod report;
