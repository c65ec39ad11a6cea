//! Agenda events and the stations found around them.

use std::sync::Arc;

use chrono::{NaiveDate, NaiveTime};

use super::{Coordinate, Station};

/// A station within reach of an event, with its distance in meters.
#[derive(Debug, Clone, PartialEq)]
pub struct NearbyStation {
    pub station: Arc<Station>,
    pub distance_m: f64,
}

impl NearbyStation {
    /// Pairs a station with its distance from an event.
    pub fn new(station: Arc<Station>, distance_m: f64) -> Self {
        Self {
            station,
            distance_m,
        }
    }
}

/// A public event from the city agenda.
///
/// The two station lists start empty and are filled by
/// [`rank_stations`](crate::finder::rank_stations), sorted nearest first.
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    pub name: String,
    pub place: String,
    pub address: String,
    pub date: NaiveDate,
    pub hour: Option<NaiveTime>,
    /// Events without coordinates are never ranked.
    pub coordinates: Option<Coordinate>,
    pub stations_with_bikes: Vec<NearbyStation>,
    pub stations_with_slots: Vec<NearbyStation>,
}

impl Event {
    /// Creates an event with no hour, no coordinates and no stations.
    pub fn new(
        name: impl Into<String>,
        place: impl Into<String>,
        address: impl Into<String>,
        date: NaiveDate,
    ) -> Self {
        Self {
            name: name.into(),
            place: place.into(),
            address: address.into(),
            date,
            hour: None,
            coordinates: None,
            stations_with_bikes: Vec::new(),
            stations_with_slots: Vec::new(),
        }
    }

    /// Sets the starting hour.
    pub fn with_hour(mut self, hour: NaiveTime) -> Self {
        self.hour = Some(hour);
        self
    }

    /// Sets the event location.
    pub fn with_coordinates(mut self, coordinates: Coordinate) -> Self {
        self.coordinates = Some(coordinates);
        self
    }

    /// The fields a search term is matched against.
    pub fn searchable_text(&self) -> [&str; 3] {
        [&self.name, &self.place, &self.address]
    }
}
