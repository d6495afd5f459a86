use std::collections::BTreeSet;
use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// RawFlightRow – one row exactly as it comes out of the source table
// ---------------------------------------------------------------------------

/// Raw columns of the flight-fare table, before any derivation.
///
/// Header names follow the source spreadsheet. `Route` and
/// `Additional_Info` are present in the source but unused, so they are
/// simply not deserialized.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct RawFlightRow {
    #[serde(rename = "Airline")]
    pub airline: String,
    #[serde(rename = "Date_of_Journey")]
    pub date_of_journey: String,
    #[serde(rename = "Source")]
    pub source: String,
    #[serde(rename = "Destination")]
    pub destination: String,
    #[serde(rename = "Dep_Time")]
    pub dep_time: String,
    #[serde(rename = "Arrival_Time", default)]
    pub arrival_time: Option<String>,
    #[serde(rename = "Duration", default)]
    pub duration: Option<String>,
    #[serde(rename = "Total_Stops", default)]
    pub total_stops: Option<String>,
    #[serde(rename = "Price")]
    pub price: f64,
}

/// Column names every source must provide.
pub const REQUIRED_COLUMNS: [&str; 6] = [
    "Airline",
    "Date_of_Journey",
    "Source",
    "Destination",
    "Dep_Time",
    "Price",
];

// ---------------------------------------------------------------------------
// PartOfDay – departure time bucket
// ---------------------------------------------------------------------------

/// Four fixed, non-overlapping buckets covering every hour of the day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PartOfDay {
    Morning,
    Afternoon,
    Evening,
    Night,
}

impl PartOfDay {
    /// Display order used by every grouped view.
    pub const ALL: [PartOfDay; 4] = [
        PartOfDay::Morning,
        PartOfDay::Afternoon,
        PartOfDay::Evening,
        PartOfDay::Night,
    ];

    /// Bucket an hour of the day: [4,12) morning, [12,16) afternoon,
    /// [16,20) evening, everything else night.
    pub fn from_hour(hour: u32) -> Self {
        match hour {
            4..=11 => PartOfDay::Morning,
            12..=15 => PartOfDay::Afternoon,
            16..=19 => PartOfDay::Evening,
            _ => PartOfDay::Night,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PartOfDay::Morning => "morning",
            PartOfDay::Afternoon => "afternoon",
            PartOfDay::Evening => "evening",
            PartOfDay::Night => "night",
        }
    }

    /// Position in [`PartOfDay::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for PartOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// FlightRecord – one row of the prepared table
// ---------------------------------------------------------------------------

/// A prepared flight: raw categories plus every derived field.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlightRecord {
    pub airline: String,
    pub source: String,
    pub destination: String,
    pub departure_date: NaiveDate,
    pub journey_day: u32,
    pub journey_month: u32,
    pub departure_hour: u32,
    /// `None` when the arrival time is not a plain `HH:MM`.
    pub arrival_hour: Option<u32>,
    pub duration_minutes: u32,
    pub total_stops: String,
    pub price: f64,
    pub part_of_day: PartOfDay,
}

// ---------------------------------------------------------------------------
// FlightTable – the complete prepared dataset
// ---------------------------------------------------------------------------

/// The prepared table with pre-computed column indices.
///
/// Built once at startup and shared read-only afterwards; the fields are
/// private so nothing downstream can mutate a record.
#[derive(Debug, Clone, Default)]
pub struct FlightTable {
    records: Vec<FlightRecord>,
    airlines: BTreeSet<String>,
    price_domain: Option<(f64, f64)>,
}

impl FlightTable {
    /// Build column indices from the prepared records.
    pub fn from_records(records: Vec<FlightRecord>) -> Self {
        let airlines: BTreeSet<String> = records.iter().map(|r| r.airline.clone()).collect();

        let price_domain = records.iter().fold(None, |acc: Option<(f64, f64)>, r| {
            Some(match acc {
                None => (r.price, r.price),
                Some((lo, hi)) => (lo.min(r.price), hi.max(r.price)),
            })
        });

        FlightTable {
            records,
            airlines,
            price_domain,
        }
    }

    pub fn records(&self) -> &[FlightRecord] {
        &self.records
    }

    /// Sorted set of distinct airline labels in the whole table.
    pub fn airlines(&self) -> &BTreeSet<String> {
        &self.airlines
    }

    /// Observed `(min, max)` price, `None` for an empty table.
    pub fn price_domain(&self) -> Option<(f64, f64)> {
        self.price_domain
    }

    /// Number of flights.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
