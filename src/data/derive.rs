use std::sync::LazyLock;

use chrono::{Datelike, NaiveDate, NaiveTime, Timelike};
use regex::Regex;

use super::error::PrepareError;
use super::model::{FlightRecord, PartOfDay, RawFlightRow};

/// Label given to flights whose stop count is blank in the source.
pub const UNKNOWN_STOPS: &str = "unknown";

static HOURS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)h").unwrap_or_else(|_| unreachable!()));
static MINUTES_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)m").unwrap_or_else(|_| unreachable!()));

/// Day-first layouts tried in order, then ISO as a last resort (a Parquet
/// `Date32` column cast to text comes out as `YYYY-MM-DD`).
const DATE_FORMATS: [&str; 4] = ["%d/%m/%Y", "%d-%m-%Y", "%d.%m.%Y", "%Y-%m-%d"];

// ---------------------------------------------------------------------------
// Individual derivations
// ---------------------------------------------------------------------------

/// Parse a day-first journey date (`24/03/2019`, `1/3/2019`, ...).
pub fn parse_journey_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
}

/// Parse a strict `HH:MM` time and return the hour.
pub fn parse_hour(s: &str) -> Option<u32> {
    NaiveTime::parse_from_str(s.trim(), "%H:%M")
        .ok()
        .map(|t| t.hour())
}

/// Total minutes of a free-text duration like `2h 50m`, `19h` or `5m`.
///
/// Hours and minutes are extracted independently; a component that is
/// missing or does not fit in a `u32` contributes 0.
pub fn duration_to_minutes(s: &str) -> u32 {
    let component = |re: &Regex| -> u32 {
        re.captures(s)
            .and_then(|caps| caps[1].parse::<u32>().ok())
            .unwrap_or(0)
    };
    let hours = component(&HOURS_RE);
    let minutes = component(&MINUTES_RE);
    hours.saturating_mul(60).saturating_add(minutes)
}

/// Normalise the stop-count label; blank cells become [`UNKNOWN_STOPS`].
pub fn normalize_stops(s: Option<&str>) -> String {
    match s.map(str::trim) {
        Some(label) if !label.is_empty() => label.to_string(),
        _ => UNKNOWN_STOPS.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Row preparation
// ---------------------------------------------------------------------------

/// Turn one raw row into a [`FlightRecord`].
///
/// `row` is the 1-based data row number used in error messages. The
/// journey date, departure time and price are mandatory; the arrival hour
/// and duration degrade to absent / zero instead of failing.
pub fn prepare_record(row: usize, raw: &RawFlightRow) -> Result<FlightRecord, PrepareError> {
    let departure_date =
        parse_journey_date(&raw.date_of_journey).ok_or_else(|| PrepareError::InvalidDate {
            row,
            value: raw.date_of_journey.clone(),
        })?;

    let departure_hour =
        parse_hour(&raw.dep_time).ok_or_else(|| PrepareError::InvalidDepartureTime {
            row,
            value: raw.dep_time.clone(),
        })?;

    if !raw.price.is_finite() || raw.price < 0.0 {
        return Err(PrepareError::InvalidPrice {
            row,
            value: raw.price,
        });
    }

    Ok(FlightRecord {
        airline: raw.airline.trim().to_string(),
        source: raw.source.trim().to_string(),
        destination: raw.destination.trim().to_string(),
        departure_date,
        journey_day: departure_date.day(),
        journey_month: departure_date.month(),
        departure_hour,
        arrival_hour: raw.arrival_time.as_deref().and_then(parse_hour),
        duration_minutes: raw.duration.as_deref().map(duration_to_minutes).unwrap_or(0),
        total_stops: normalize_stops(raw.total_stops.as_deref()),
        price: raw.price,
        part_of_day: PartOfDay::from_hour(departure_hour),
    })
}

/// Prepare every row, stopping at the first fatal error.
pub fn prepare_all(rows: &[RawFlightRow]) -> Result<Vec<FlightRecord>, PrepareError> {
    rows.iter()
        .enumerate()
        .map(|(i, raw)| prepare_record(i + 1, raw))
        .collect()
}
