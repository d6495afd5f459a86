/// Data layer: preparation, filtering and aggregation.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  read rows → RawFlightRow
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  derive   │  dates, hours, duration, part of day → FlightTable
///   └──────────┘
///        │            (built once, shared read-only)
///        ▼
///   ┌──────────┐
///   │  filter   │  airlines + price range → matching indices
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ aggregate  │  KPIs, histograms, box plots, grids → Dashboard
///   └───────────┘
/// ```

pub mod aggregate;
pub mod derive;
pub mod error;
pub mod filter;
pub mod loader;
pub mod model;
pub mod stats;

#[cfg(test)]
pub(crate) mod fixtures;
