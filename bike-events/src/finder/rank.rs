//! Nearest-station ranking for events.
//!
//! For each located event, splits the stations within range into those
//! with free slots and those with bikes, nearest first.

use std::sync::Arc;

use tracing::{debug, trace};

use crate::domain::{Availability, Event, NearbyStation, Station};

/// Fill each event's station lists with the stations within `max_distance_m`.
///
/// Stations are classified slots first: one with free slots goes into
/// `stations_with_slots` even if it also has bikes, so it never appears in
/// both lists. Stations with neither are left out. Both lists are sorted
/// by ascending distance; the sort is stable, so ties keep the order of
/// `stations`.
///
/// Events without coordinates are skipped and keep empty lists. Any
/// previous contents of the lists are replaced.
pub fn rank_stations(events: &mut [Event], stations: &[Arc<Station>], max_distance_m: f64) {
    for event in events.iter_mut() {
        let Some(origin) = event.coordinates else {
            trace!(event = %event.name, "no coordinates, not ranking");
            continue;
        };

        let mut with_slots = Vec::new();
        let mut with_bikes = Vec::new();

        for station in stations {
            let distance_m = origin.distance_to(&station.coordinates);
            if distance_m <= max_distance_m {
                let nearby = NearbyStation::new(Arc::clone(station), distance_m);
                match station.availability() {
                    Some(Availability::Slots) => with_slots.push(nearby),
                    Some(Availability::Bikes) => with_bikes.push(nearby),
                    None => {}
                }
            }
        }

        sort_by_distance(&mut with_slots);
        sort_by_distance(&mut with_bikes);

        debug!(
            event = %event.name,
            slots = with_slots.len(),
            bikes = with_bikes.len(),
            "ranked nearby stations"
        );

        event.stations_with_slots = with_slots;
        event.stations_with_bikes = with_bikes;
    }
}

fn sort_by_distance(stations: &mut [NearbyStation]) {
    stations.sort_by(|a, b| a.distance_m.total_cmp(&b.distance_m));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Coordinate;
    use chrono::NaiveDate;

    const ORIGIN: Coordinate = Coordinate::new(41.3851, 2.1734);

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2018, 5, 12).unwrap()
    }

    fn event_at(coordinates: Coordinate) -> Event {
        Event::new("Festa Major", "Plaça", "C Major 1", date()).with_coordinates(coordinates)
    }

    /// Station `north_m` meters due north of the origin (approximately).
    fn station(street: &str, north_m: f64, slots: u32, bikes: u32) -> Arc<Station> {
        let lat = ORIGIN.latitude + north_m / 111_195.0;
        Arc::new(Station::new(
            street,
            "1",
            slots,
            bikes,
            Coordinate::new(lat, ORIGIN.longitude),
        ))
    }

    fn streets(list: &[NearbyStation]) -> Vec<&str> {
        list.iter().map(|n| n.station.street.as_str()).collect()
    }

    #[test]
    fn co_located_station_first_at_zero() {
        let a = Arc::new(Station::new("A", "1", 3, 0, ORIGIN));
        let far = station("Far", 250.0, 2, 0);
        let mut events = vec![event_at(ORIGIN)];

        rank_stations(&mut events, &[far, a], 300.0);

        let slots = &events[0].stations_with_slots;
        assert_eq!(streets(slots), vec!["A", "Far"]);
        assert_eq!(slots[0].distance_m, 0.0);
        assert!(events[0].stations_with_bikes.is_empty());
    }

    #[test]
    fn slots_station_never_in_bikes_list() {
        let mut events = vec![event_at(ORIGIN)];
        rank_stations(&mut events, &[station("S", 50.0, 5, 0)], 300.0);

        assert_eq!(streets(&events[0].stations_with_slots), vec!["S"]);
        assert!(events[0].stations_with_bikes.is_empty());
    }

    #[test]
    fn station_with_slots_and_bikes_counts_as_slots() {
        let mut events = vec![event_at(ORIGIN)];
        rank_stations(&mut events, &[station("Both", 50.0, 4, 6)], 300.0);

        assert_eq!(streets(&events[0].stations_with_slots), vec!["Both"]);
        assert!(events[0].stations_with_bikes.is_empty());
    }

    #[test]
    fn bikes_only_station_goes_to_bikes() {
        let mut events = vec![event_at(ORIGIN)];
        rank_stations(&mut events, &[station("Full", 50.0, 0, 7)], 300.0);

        assert!(events[0].stations_with_slots.is_empty());
        assert_eq!(streets(&events[0].stations_with_bikes), vec!["Full"]);
    }

    #[test]
    fn empty_station_is_dropped() {
        let mut events = vec![event_at(ORIGIN)];
        rank_stations(&mut events, &[station("Empty", 10.0, 0, 0)], 300.0);

        assert!(events[0].stations_with_slots.is_empty());
        assert!(events[0].stations_with_bikes.is_empty());
    }

    #[test]
    fn out_of_range_stations_excluded() {
        let mut events = vec![event_at(ORIGIN)];
        let stations = [station("Near", 100.0, 1, 0), station("Far", 400.0, 1, 0)];

        rank_stations(&mut events, &stations, 300.0);

        assert_eq!(streets(&events[0].stations_with_slots), vec!["Near"]);
    }

    #[test]
    fn sorted_by_distance() {
        let mut events = vec![event_at(ORIGIN)];
        let stations = [
            station("C", 200.0, 0, 1),
            station("A", 20.0, 0, 1),
            station("B", 120.0, 0, 1),
            station("Z", 150.0, 1, 0),
            station("Y", 10.0, 1, 0),
        ];

        rank_stations(&mut events, &stations, 300.0);

        assert_eq!(streets(&events[0].stations_with_bikes), vec!["A", "B", "C"]);
        assert_eq!(streets(&events[0].stations_with_slots), vec!["Y", "Z"]);
    }

    #[test]
    fn ties_keep_station_order() {
        let mut events = vec![event_at(ORIGIN)];
        let stations = [
            station("First", 80.0, 1, 0),
            station("Closer", 30.0, 1, 0),
            station("Second", 80.0, 1, 0),
            station("Third", 80.0, 1, 0),
        ];

        rank_stations(&mut events, &stations, 300.0);

        assert_eq!(
            streets(&events[0].stations_with_slots),
            vec!["Closer", "First", "Second", "Third"]
        );
    }

    #[test]
    fn event_without_coordinates_is_skipped() {
        let mut events = vec![Event::new("Sense lloc", "", "", date())];
        rank_stations(&mut events, &[station("A", 0.0, 1, 1)], 300.0);

        assert!(events[0].stations_with_slots.is_empty());
        assert!(events[0].stations_with_bikes.is_empty());
    }

    #[test]
    fn zero_distance_without_co_located_station() {
        let mut events = vec![event_at(ORIGIN)];
        let stations = [station("A", 5.0, 1, 0), station("B", 1.0, 0, 1)];

        rank_stations(&mut events, &stations, 0.0);

        assert!(events[0].stations_with_slots.is_empty());
        assert!(events[0].stations_with_bikes.is_empty());
    }

    #[test]
    fn zero_distance_keeps_co_located_station() {
        let mut events = vec![event_at(ORIGIN)];
        let here = Arc::new(Station::new("Here", "2", 0, 3, ORIGIN));

        rank_stations(&mut events, &[here, station("Near", 5.0, 0, 3)], 0.0);

        assert_eq!(streets(&events[0].stations_with_bikes), vec!["Here"]);
    }

    #[test]
    fn events_ranked_independently() {
        let far_origin = Coordinate::new(41.40, 2.19);
        let mut events = vec![event_at(ORIGIN), event_at(far_origin)];
        let stations = [station("A", 10.0, 1, 0)];

        rank_stations(&mut events, &stations, 300.0);

        assert_eq!(events[0].stations_with_slots.len(), 1);
        assert!(events[1].stations_with_slots.is_empty());
    }

    #[test]
    fn ranking_twice_does_not_duplicate() {
        let mut events = vec![event_at(ORIGIN)];
        let stations = [station("A", 10.0, 1, 0)];

        rank_stations(&mut events, &stations, 300.0);
        rank_stations(&mut events, &stations, 300.0);

        assert_eq!(events[0].stations_with_slots.len(), 1);
    }

    #[test]
    fn shares_station_between_events() {
        let shared = station("Shared", 10.0, 1, 0);
        let mut events = vec![event_at(ORIGIN), event_at(ORIGIN)];

        rank_stations(&mut events, std::slice::from_ref(&shared), 300.0);

        assert!(Arc::ptr_eq(&events[0].stations_with_slots[0].station, &shared));
        assert!(Arc::ptr_eq(&events[1].stations_with_slots[0].station, &shared));
    }
}
