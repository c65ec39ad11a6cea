//! Bike-share stations.

use super::Coordinate;

/// A bike-share dock with its live availability counts.
///
/// Stations are immutable once built by the feed layer and are shared
/// between the events that list them.
#[derive(Debug, Clone, PartialEq)]
pub struct Station {
    pub street: String,
    pub number: String,
    /// Empty docks that can receive a returned bike.
    pub slots: u32,
    /// Bikes available to take.
    pub bikes: u32,
    pub coordinates: Coordinate,
}

/// What a nearby station is useful for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Availability {
    /// Has at least one free slot to leave a bike.
    Slots,
    /// Has no free slot but at least one bike to take.
    Bikes,
}

impl Station {
    /// Creates a station.
    pub fn new(
        street: impl Into<String>,
        number: impl Into<String>,
        slots: u32,
        bikes: u32,
        coordinates: Coordinate,
    ) -> Self {
        Self {
            street: street.into(),
            number: number.into(),
            slots,
            bikes,
            coordinates,
        }
    }

    /// Classifies the station, slots first.
    ///
    /// A station with both free slots and bikes counts only as
    /// [`Availability::Slots`]. A station with neither is `None`.
    pub fn availability(&self) -> Option<Availability> {
        if self.slots > 0 {
            Some(Availability::Slots)
        } else if self.bikes > 0 {
            Some(Availability::Bikes)
        } else {
            None
        }
    }
}
