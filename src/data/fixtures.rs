//! Hand-built records for unit tests.

use chrono::NaiveDate;

use super::model::{FlightRecord, PartOfDay};

pub(crate) fn record(airline: &str, price: f64, hour: u32) -> FlightRecord {
    FlightRecord {
        airline: airline.to_string(),
        source: "Delhi".to_string(),
        destination: "Cochin".to_string(),
        departure_date: NaiveDate::from_ymd_opt(2019, 3, 24).unwrap(),
        journey_day: 24,
        journey_month: 3,
        departure_hour: hour,
        arrival_hour: None,
        duration_minutes: 0,
        total_stops: "non-stop".to_string(),
        price,
        part_of_day: PartOfDay::from_hour(hour),
    }
}

/// The three-flight table used throughout the engine tests:
/// A/4000/05h, B/9000/14h, A/15000/21h.
pub(crate) fn three_flights() -> super::model::FlightTable {
    super::model::FlightTable::from_records(vec![
        record("A", 4000.0, 5),
        record("B", 9000.0, 14),
        record("A", 15000.0, 21),
    ])
}
