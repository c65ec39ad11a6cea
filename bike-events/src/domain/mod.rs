//! Domain types for the event finder.
//!
//! Plain records produced by the feed layer and consumed by the finder and
//! the report. Coordinates carry the great-circle distance used to rank
//! stations around each event.

mod coordinate;
mod event;
mod station;

pub use coordinate::{Coordinate, EARTH_RADIUS_M, haversine_distance};
pub use event::{Event, NearbyStation};
pub use station::{Availability, Station};
