//! Conversion from feed XML to domain types.
//!
//! Each record is converted on its own. A malformed record is logged and
//! skipped rather than failing the whole feed.

use chrono::{NaiveDate, NaiveTime};
use tracing::warn;

use crate::domain::{Coordinate, Event, Station};

use super::xml::Element;

/// Error converting a single feed record.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConversionError {
    /// Missing required element
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// Date is not in dd/mm/yyyy form
    #[error("invalid date: {0:?}")]
    InvalidDate(String),

    /// Numeric field could not be parsed
    #[error("invalid {field}: {value:?}")]
    InvalidNumber { field: &'static str, value: String },
}

/// Convert every `acte` element in an agenda document, in document order.
pub fn events_from_document(root: &Element) -> Vec<Event> {
    let records = root.find_all("acte");
    let mut events = Vec::with_capacity(records.len());

    for record in records {
        match convert_event(record) {
            Ok(event) => events.push(event),
            Err(e) => warn!(
                name = record.child_text("nom").unwrap_or_default(),
                "skipping event: {e}"
            ),
        }
    }

    events
}

/// Convert every `station` element in a stations document, in document order.
pub fn stations_from_document(root: &Element) -> Vec<Station> {
    let records = root.find_all("station");
    let mut stations = Vec::with_capacity(records.len());

    for record in records {
        match convert_station(record) {
            Ok(station) => stations.push(station),
            Err(e) => warn!(
                id = record.child_text("id").unwrap_or_default(),
                "skipping station: {e}"
            ),
        }
    }

    stations
}

/// Convert one `acte` element to an [`Event`].
pub fn convert_event(record: &Element) -> Result<Event, ConversionError> {
    let name = record
        .child_text("nom")
        .ok_or(ConversionError::MissingField("nom"))?;

    let venue = record
        .child("lloc_simple")
        .ok_or(ConversionError::MissingField("lloc_simple"))?;
    let place = venue
        .child_text("nom")
        .ok_or(ConversionError::MissingField("lloc_simple/nom"))?;

    let data = record
        .child("data")
        .ok_or(ConversionError::MissingField("data"))?;
    let when = data
        .child_text("data_proper_acte")
        .ok_or(ConversionError::MissingField("data/data_proper_acte"))?;
    let date = parse_date(when)?;
    let hour = parse_hour(data.child_text("hora_inici"), when);

    let address_element = venue.child("adreca_simple");
    let address = address_element.map(address_text).unwrap_or_default();
    let coordinates = address_element.and_then(parse_coordinates);

    Ok(Event {
        hour,
        coordinates,
        ..Event::new(
            decode_html(name),
            decode_html(place),
            decode_html(&address),
            date,
        )
    })
}

/// Convert one `station` element to a [`Station`].
pub fn convert_station(record: &Element) -> Result<Station, ConversionError> {
    let slots = parse_field(record, "slots")?;
    let bikes = parse_field(record, "bikes")?;
    let latitude = parse_field(record, "lat")?;
    let longitude = parse_field(record, "long")?;

    let street = record
        .child_text("street")
        .ok_or(ConversionError::MissingField("street"))?;
    let number = record.child_text("streetNumber").unwrap_or_default();

    Ok(Station::new(
        decode_html(street),
        number,
        slots,
        bikes,
        Coordinate::new(latitude, longitude),
    ))
}

fn parse_field<T: std::str::FromStr>(
    record: &Element,
    field: &'static str,
) -> Result<T, ConversionError> {
    let value = record
        .child_text(field)
        .ok_or(ConversionError::MissingField(field))?;
    value.parse().map_err(|_| ConversionError::InvalidNumber {
        field,
        value: value.to_string(),
    })
}

/// Parse the leading `dd/mm/yyyy` of a date field such as
/// `"12/05/2018 de 10.00 a 14.00 h"`.
fn parse_date(when: &str) -> Result<NaiveDate, ConversionError> {
    let invalid = || ConversionError::InvalidDate(when.to_string());
    let prefix = when.get(..10).ok_or_else(invalid)?;
    let bytes = prefix.as_bytes();
    let well_formed = bytes.iter().enumerate().all(|(i, b)| match i {
        2 | 5 => *b == b'/',
        _ => b.is_ascii_digit(),
    });
    if !well_formed {
        return Err(invalid());
    }
    NaiveDate::parse_from_str(prefix, "%d/%m/%Y").map_err(|_| invalid())
}

/// The starting hour: `hora_inici` if the element is present, else the
/// first `HH.MM` in the date field. Unparseable hours are treated as
/// unknown, including an empty `hora_inici`.
fn parse_hour(start: Option<&str>, when: &str) -> Option<NaiveTime> {
    let raw = start.or_else(|| find_hour_pattern(when))?;
    NaiveTime::parse_from_str(raw, "%H.%M").ok()
}

/// First occurrence of two digits, a dot and two digits.
fn find_hour_pattern(text: &str) -> Option<&str> {
    let bytes = text.as_bytes();
    bytes
        .windows(5)
        .position(|w| {
            w[0].is_ascii_digit()
                && w[1].is_ascii_digit()
                && w[2] == b'.'
                && w[3].is_ascii_digit()
                && w[4].is_ascii_digit()
        })
        .map(|start| &text[start..start + 5])
}

/// Texts under the address element in document order, skipping the
/// `coordenades` subtree, joined with single spaces.
fn address_text(address: &Element) -> String {
    let mut parts = Vec::new();
    collect_address_parts(address, &mut parts);
    parts.join(" ")
}

fn collect_address_parts<'a>(element: &'a Element, parts: &mut Vec<&'a str>) {
    if element.name == "coordenades" {
        return;
    }
    if !element.text().is_empty() {
        parts.push(element.text());
    }
    for child in element.children() {
        collect_address_parts(child, parts);
    }
}

fn parse_coordinates(address: &Element) -> Option<Coordinate> {
    let maps = address.path(&["coordenades", "googleMaps"])?;
    let latitude = maps.attr("lat")?.trim().parse().ok()?;
    let longitude = maps.attr("lon")?.trim().parse().ok()?;
    Some(Coordinate::new(latitude, longitude))
}

fn decode_html(text: &str) -> String {
    html_escape::decode_html_entities(text).into_owned()
}
