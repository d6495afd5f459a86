//! Filter-and-aggregate engine.
//!
//! [`compute_dashboard`] is a pure function of the prepared table and the
//! current filter. It is recomputed in full on every filter change; nothing
//! is cached between calls.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use super::filter::{filtered_indices, FlightFilter};
use super::model::{FlightRecord, FlightTable, PartOfDay};
use super::stats::{mean, min_max, FiveNumberSummary, Histogram};

/// Bins used by both histograms.
pub const HISTOGRAM_BINS: usize = 50;

/// Display label for journey months 1..=12.
pub const MONTH_LABELS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

// ---------------------------------------------------------------------------
// Output types
// ---------------------------------------------------------------------------

/// Scalar summaries. Means and extrema are NaN when nothing matches.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Kpis {
    pub flight_count: usize,
    pub total_flights: usize,
    /// Matching flights as a percentage of the unfiltered table.
    pub coverage_pct: f64,
    pub mean_price: f64,
    pub min_price: f64,
    pub max_price: f64,
    pub mean_duration_minutes: f64,
    pub mean_duration_hours: f64,
    pub selected_airlines: usize,
    pub total_airlines: usize,
}

/// One box of a grouped price distribution.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupSummary {
    pub label: String,
    pub summary: FiveNumberSummary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PartOfDayCount {
    pub part_of_day: PartOfDay,
    pub count: usize,
}

/// Mean price per (source, destination), dense over the labels seen in the
/// filtered flights. `mean_price[s][d]` is `None` when no flight flies
/// `sources[s]` → `destinations[d]`.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct RouteGrid {
    pub sources: Vec<String>,
    pub destinations: Vec<String>,
    pub mean_price: Vec<Vec<Option<f64>>>,
}

impl RouteGrid {
    pub fn get(&self, source: &str, destination: &str) -> Option<f64> {
        let s = self.sources.iter().position(|x| x == source)?;
        let d = self.destinations.iter().position(|x| x == destination)?;
        self.mean_price[s][d]
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyPrice {
    pub month: u32,
    pub label: &'static str,
    pub mean_price: f64,
}

/// Everything the presentation layer renders for one filter.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dashboard {
    /// The filter actually applied, after clamping.
    pub filter: FlightFilter,
    pub kpis: Kpis,
    pub price_histogram: Histogram,
    pub duration_histogram: Histogram,
    pub price_by_airline: Vec<GroupSummary>,
    pub price_by_stops: Vec<GroupSummary>,
    /// Always the four buckets, in display order.
    pub flights_by_part_of_day: Vec<PartOfDayCount>,
    pub route_prices: RouteGrid,
    /// Chronological; months without flights are left out.
    pub monthly_prices: Vec<MonthlyPrice>,
    /// Indices of the matching flights, in table order.
    #[serde(skip)]
    pub indices: Vec<usize>,
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

/// Apply `filter` to `table` and compute every KPI and aggregate view.
pub fn compute_dashboard(table: &FlightTable, filter: &FlightFilter) -> Dashboard {
    let filter = filter.normalized(table);
    let indices = filtered_indices(table, &filter);
    let matching: Vec<&FlightRecord> = indices.iter().map(|&i| &table.records()[i]).collect();

    log::debug!(
        "Recomputed dashboard: {} of {} flights match {} airlines in [{}, {}]",
        matching.len(),
        table.len(),
        filter.airlines.len(),
        filter.min_price,
        filter.max_price
    );

    let prices: Vec<f64> = matching.iter().map(|r| r.price).collect();
    let durations: Vec<f64> = matching
        .iter()
        .map(|r| f64::from(r.duration_minutes))
        .collect();

    Dashboard {
        kpis: kpis(table, &filter, &prices, &durations),
        price_histogram: Histogram::new(&prices, HISTOGRAM_BINS),
        duration_histogram: Histogram::new(&durations, HISTOGRAM_BINS),
        price_by_airline: price_by_airline(&matching),
        price_by_stops: price_by_stops(&matching),
        flights_by_part_of_day: flights_by_part_of_day(&matching),
        route_prices: route_prices(&matching),
        monthly_prices: monthly_prices(&matching),
        filter,
        indices,
    }
}

fn kpis(table: &FlightTable, filter: &FlightFilter, prices: &[f64], durations: &[f64]) -> Kpis {
    let (min_price, max_price) = min_max(prices);
    let mean_duration_minutes = mean(durations);
    let coverage_pct = if table.is_empty() {
        f64::NAN
    } else {
        prices.len() as f64 / table.len() as f64 * 100.0
    };

    Kpis {
        flight_count: prices.len(),
        total_flights: table.len(),
        coverage_pct,
        mean_price: mean(prices),
        min_price,
        max_price,
        mean_duration_minutes,
        mean_duration_hours: mean_duration_minutes / 60.0,
        selected_airlines: filter.airlines.len(),
        total_airlines: table.airlines().len(),
    }
}

/// Group prices by a label and summarise each group, in label order.
fn grouped_prices<'a>(
    matching: &[&'a FlightRecord],
    key: impl Fn(&'a FlightRecord) -> &'a str,
) -> BTreeMap<&'a str, Vec<f64>> {
    let mut groups: BTreeMap<&str, Vec<f64>> = BTreeMap::new();
    for rec in matching {
        groups.entry(key(*rec)).or_default().push(rec.price);
    }
    groups
}

fn summarise(groups: impl IntoIterator<Item = (String, Vec<f64>)>) -> Vec<GroupSummary> {
    groups
        .into_iter()
        .filter_map(|(label, prices)| {
            FiveNumberSummary::from_values(&prices).map(|summary| GroupSummary { label, summary })
        })
        .collect()
}

fn price_by_airline(matching: &[&FlightRecord]) -> Vec<GroupSummary> {
    summarise(
        grouped_prices(matching, |r| r.airline.as_str())
            .into_iter()
            .map(|(label, prices)| (label.to_string(), prices)),
    )
}

/// Ordinal rank of a stop label: `non-stop` is 0, `N stop(s)` is N, anything
/// else sorts last.
pub fn stops_rank(label: &str) -> u32 {
    let label = label.trim().to_ascii_lowercase();
    if label == "non-stop" || label == "nonstop" {
        return 0;
    }
    label
        .split_whitespace()
        .next()
        .filter(|_| label.contains("stop"))
        .and_then(|n| n.parse().ok())
        .unwrap_or(u32::MAX)
}

fn price_by_stops(matching: &[&FlightRecord]) -> Vec<GroupSummary> {
    let mut groups: Vec<(&str, Vec<f64>)> =
        grouped_prices(matching, |r| r.total_stops.as_str()).into_iter().collect();
    groups.sort_by(|(a, _), (b, _)| stops_rank(a).cmp(&stops_rank(b)).then_with(|| a.cmp(b)));
    summarise(
        groups
            .into_iter()
            .map(|(label, prices)| (label.to_string(), prices)),
    )
}

fn flights_by_part_of_day(matching: &[&FlightRecord]) -> Vec<PartOfDayCount> {
    let mut counts = [0usize; 4];
    for rec in matching {
        counts[rec.part_of_day.index()] += 1;
    }
    PartOfDay::ALL
        .iter()
        .map(|&part_of_day| PartOfDayCount {
            part_of_day,
            count: counts[part_of_day.index()],
        })
        .collect()
}

fn route_prices(matching: &[&FlightRecord]) -> RouteGrid {
    let sources: Vec<String> = matching
        .iter()
        .map(|r| r.source.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    let destinations: Vec<String> = matching
        .iter()
        .map(|r| r.destination.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    // (sum, count) per cell
    let mut cells = vec![vec![(0.0f64, 0usize); destinations.len()]; sources.len()];
    for rec in matching {
        let (Ok(s), Ok(d)) = (
            sources.binary_search(&rec.source),
            destinations.binary_search(&rec.destination),
        ) else {
            continue;
        };
        cells[s][d].0 += rec.price;
        cells[s][d].1 += 1;
    }

    let mean_price = cells
        .into_iter()
        .map(|row| {
            row.into_iter()
                .map(|(sum, n)| (n > 0).then(|| sum / n as f64))
                .collect()
        })
        .collect();

    RouteGrid {
        sources,
        destinations,
        mean_price,
    }
}

fn monthly_prices(matching: &[&FlightRecord]) -> Vec<MonthlyPrice> {
    let mut by_month: BTreeMap<u32, (f64, usize)> = BTreeMap::new();
    for rec in matching {
        let entry = by_month.entry(rec.journey_month).or_insert((0.0, 0));
        entry.0 += rec.price;
        entry.1 += 1;
    }
    by_month
        .into_iter()
        .filter_map(|(month, (sum, n))| {
            let label = *MONTH_LABELS.get(month.checked_sub(1)? as usize)?;
            Some(MonthlyPrice {
                month,
                label,
                mean_price: sum / n as f64,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::fixtures::{record, three_flights};
    use pretty_assertions::assert_eq;

    fn counts(d: &Dashboard) -> Vec<(PartOfDay, usize)> {
        d.flights_by_part_of_day
            .iter()
            .map(|c| (c.part_of_day, c.count))
            .collect()
    }

    #[test]
    fn test_three_flight_scenario() {
        let table = three_flights();
        let d = compute_dashboard(&table, &FlightFilter::new(["A"], 0.0, 10000.0));

        assert_eq!(d.kpis.flight_count, 1);
        assert_eq!(d.kpis.mean_price, 4000.0);
        assert_eq!((d.kpis.min_price, d.kpis.max_price), (4000.0, 4000.0));
        assert!((d.kpis.coverage_pct - 100.0 / 3.0).abs() < 1e-9);
        assert_eq!((d.kpis.selected_airlines, d.kpis.total_airlines), (1, 2));
        assert_eq!(
            counts(&d),
            vec![
                (PartOfDay::Morning, 1),
                (PartOfDay::Afternoon, 0),
                (PartOfDay::Evening, 0),
                (PartOfDay::Night, 0),
            ]
        );
        assert_eq!(d.indices, vec![0]);
    }

    #[test]
    fn test_empty_selection_is_well_defined() {
        let table = three_flights();
        let d = compute_dashboard(&table, &FlightFilter::new(["Z"], 0.0, 1e9));

        assert_eq!(d.kpis.flight_count, 0);
        assert_eq!(d.kpis.coverage_pct, 0.0);
        assert!(d.kpis.mean_price.is_nan());
        assert!(d.kpis.min_price.is_nan());
        assert!(d.kpis.mean_duration_hours.is_nan());
        assert!(d.price_histogram.is_empty());
        assert!(d.duration_histogram.is_empty());
        assert!(d.price_by_airline.is_empty());
        assert!(d.price_by_stops.is_empty());
        assert!(d.route_prices.is_empty());
        assert!(d.monthly_prices.is_empty());
        assert_eq!(counts(&d).iter().map(|(_, n)| n).sum::<usize>(), 0);
        assert_eq!(d.flights_by_part_of_day.len(), 4);
    }

    #[test]
    fn test_empty_table() {
        let table = FlightTable::default();
        let d = compute_dashboard(&table, &FlightFilter::new(["A"], 0.0, 1.0));
        assert_eq!(d.kpis.flight_count, 0);
        assert!(d.kpis.coverage_pct.is_nan());
    }

    #[test]
    fn test_recompute_is_idempotent() {
        let table = three_flights();
        for filter in [
            FlightFilter::new(["A", "B"], 0.0, 1e9),
            FlightFilter::new(["Z"], 0.0, 1e9),
        ] {
            let a = serde_json::to_string(&compute_dashboard(&table, &filter)).unwrap();
            let b = serde_json::to_string(&compute_dashboard(&table, &filter)).unwrap();
            assert_eq!(a, b);
        }
    }

    #[test]
    fn test_duration_kpis() {
        let mut short = record("A", 5000.0, 8);
        short.duration_minutes = 90;
        let mut long = record("A", 6000.0, 9);
        long.duration_minutes = 150;
        let table = FlightTable::from_records(vec![short, long]);

        let d = compute_dashboard(&table, &FlightFilter::new(["A"], 0.0, 1e9));
        assert_eq!(d.kpis.mean_duration_minutes, 120.0);
        assert_eq!(d.kpis.mean_duration_hours, 2.0);
        assert_eq!(d.duration_histogram.bins.len(), HISTOGRAM_BINS);
        assert_eq!(d.duration_histogram.total(), 2);
    }

    #[test]
    fn test_price_by_stops_is_ordinal() {
        let stops = ["2 stops", "non-stop", "unknown", "1 stop", "4 stops"];
        let records = stops
            .iter()
            .enumerate()
            .map(|(i, s)| {
                let mut r = record("A", 1000.0 * (i + 1) as f64, 10);
                r.total_stops = s.to_string();
                r
            })
            .collect();
        let table = FlightTable::from_records(records);

        let d = compute_dashboard(&table, &FlightFilter::new(["A"], 0.0, 1e9));
        let labels: Vec<&str> = d.price_by_stops.iter().map(|g| g.label.as_str()).collect();
        assert_eq!(labels, vec!["non-stop", "1 stop", "2 stops", "4 stops", "unknown"]);
    }

    #[test]
    fn test_price_by_airline_groups() {
        let table = FlightTable::from_records(vec![
            record("B", 100.0, 10),
            record("A", 300.0, 10),
            record("A", 100.0, 10),
            record("A", 200.0, 10),
        ]);
        let d = compute_dashboard(&table, &FlightFilter::new(["A", "B"], 0.0, 1e9));

        assert_eq!(d.price_by_airline.len(), 2);
        let a = &d.price_by_airline[0];
        assert_eq!(a.label, "A");
        assert_eq!(a.summary.count, 3);
        assert_eq!((a.summary.min, a.summary.median, a.summary.max), (100.0, 200.0, 300.0));
        assert_eq!(d.price_by_airline[1].label, "B");
    }

    #[test]
    fn test_route_grid_is_dense_with_gaps() {
        let mut r1 = record("A", 4000.0, 10);
        r1.source = "Delhi".to_string();
        r1.destination = "Cochin".to_string();
        let mut r2 = record("A", 6000.0, 10);
        r2.source = "Delhi".to_string();
        r2.destination = "Cochin".to_string();
        let mut r3 = record("A", 3000.0, 10);
        r3.source = "Banglore".to_string();
        r3.destination = "New Delhi".to_string();
        let table = FlightTable::from_records(vec![r1, r2, r3]);

        let grid = compute_dashboard(&table, &FlightFilter::new(["A"], 0.0, 1e9)).route_prices;
        assert_eq!(grid.sources, vec!["Banglore", "Delhi"]);
        assert_eq!(grid.destinations, vec!["Cochin", "New Delhi"]);
        assert_eq!(grid.get("Delhi", "Cochin"), Some(5000.0));
        assert_eq!(grid.get("Banglore", "New Delhi"), Some(3000.0));
        assert_eq!(grid.get("Delhi", "New Delhi"), None);
        assert_eq!(grid.mean_price[0][0], None);
    }

    #[test]
    fn test_monthly_prices_skip_empty_months() {
        let mut jan = record("A", 1000.0, 10);
        jan.journey_month = 1;
        let mut jun_a = record("A", 3000.0, 10);
        jun_a.journey_month = 6;
        let mut jun_b = record("A", 5000.0, 10);
        jun_b.journey_month = 6;
        let table = FlightTable::from_records(vec![jun_a, jan, jun_b]);

        let d = compute_dashboard(&table, &FlightFilter::new(["A"], 0.0, 1e9));
        let got: Vec<(u32, &str, f64)> = d
            .monthly_prices
            .iter()
            .map(|m| (m.month, m.label, m.mean_price))
            .collect();
        assert_eq!(got, vec![(1, "Jan", 1000.0), (6, "Jun", 4000.0)]);
    }

    #[test]
    fn test_out_of_domain_bounds_are_clamped() {
        let table = three_flights();
        let d = compute_dashboard(&table, &FlightFilter::new(["A", "B"], -1e6, 1e12));
        assert_eq!(d.kpis.flight_count, 3);
        assert_eq!((d.filter.min_price, d.filter.max_price), (4000.0, 15000.0));
    }

    #[test]
    fn test_stops_rank() {
        assert_eq!(stops_rank("non-stop"), 0);
        assert_eq!(stops_rank("1 stop"), 1);
        assert_eq!(stops_rank("3 stops"), 3);
        assert_eq!(stops_rank("unknown"), u32::MAX);
        assert_eq!(stops_rank("7"), u32::MAX);
    }
}
