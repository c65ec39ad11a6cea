//! Askama template and view models for the report.

use askama::Template;
use serde::Serialize;

use crate::domain::{Event, NearbyStation};

/// The full HTML report.
#[derive(Template)]
#[template(path = "report.html")]
pub struct ReportTemplate {
    pub events: Vec<EventView>,
}

impl ReportTemplate {
    /// Build the template from the finder's results.
    pub fn from_events(events: &[Event]) -> Self {
        Self {
            events: events.iter().map(EventView::from_event).collect(),
        }
    }
}

/// Event view model for templates and JSON output.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventView {
    pub name: String,
    pub address: String,
    pub place: String,
    /// `dd/mm/yyyy HH:MM`, or just the date when the hour is unknown.
    pub when: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub stations_with_bikes: Vec<StationView>,
    pub stations_with_slots: Vec<StationView>,
}

impl EventView {
    /// Create from a domain Event.
    pub fn from_event(event: &Event) -> Self {
        let mut when = event.date.format("%d/%m/%Y").to_string();
        if let Some(hour) = event.hour {
            when.push(' ');
            when.push_str(&hour.format("%H:%M").to_string());
        }

        Self {
            name: event.name.clone(),
            address: event.address.clone(),
            place: event.place.clone(),
            when,
            latitude: event.coordinates.map(|c| c.latitude),
            longitude: event.coordinates.map(|c| c.longitude),
            stations_with_bikes: event
                .stations_with_bikes
                .iter()
                .map(|n| StationView::from_nearby(n, n.station.bikes))
                .collect(),
            stations_with_slots: event
                .stations_with_slots
                .iter()
                .map(|n| StationView::from_nearby(n, n.station.slots))
                .collect(),
        }
    }
}

/// A nearby station as shown in one of an event's lists.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StationView {
    pub street: String,
    pub number: String,
    /// Bikes or slots, depending on the list the station is in.
    pub available: u32,
    pub distance_m: f64,
}

impl StationView {
    fn from_nearby(nearby: &NearbyStation, available: u32) -> Self {
        Self {
            street: nearby.station.street.clone(),
            number: nearby.station.number.clone(),
            available,
            distance_m: nearby.distance_m,
        }
    }

    /// e.g. "Gran Via, 760. Bikes: 7. Distance: 123.46m"
    pub fn label(&self, what: &str) -> String {
        format!(
            "{}, {}. {}: {}. Distance: {:.2}m",
            self.street, self.number, what, self.available, self.distance_m
        )
    }
}
