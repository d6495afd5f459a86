use pretty_assertions::assert_eq;

use flight_dash::data::loader::load_csv_reader;
use flight_dash::{compute_dashboard, FlightFilter, FlightTable, PartOfDay};

const HEADER: &str =
    "Airline,Date_of_Journey,Source,Destination,Route,Dep_Time,Arrival_Time,Duration,Total_Stops,Additional_Info,Price\n";

fn table(rows: &[&str]) -> FlightTable {
    let mut csv = HEADER.to_string();
    for row in rows {
        csv.push_str(row);
        csv.push('\n');
    }
    load_csv_reader(csv.as_bytes()).unwrap()
}

fn three_flights() -> FlightTable {
    table(&[
        "A,24/03/2019,Delhi,Cochin,DEL → COK,05:00,08:10,3h 10m,non-stop,No info,4000",
        "B,01/05/2019,Kolkata,Banglore,CCU → BLR,14:30,17:05,2h 35m,non-stop,No info,9000",
        "A,09/06/2019,Delhi,Cochin,DEL → BOM → COK,21:15,09:25 10 Jun,12h 10m,1 stop,No info,15000",
    ])
}

fn sample() -> FlightTable {
    table(&[
        "IndiGo,24/03/2019,Banglore,New Delhi,BLR → DEL,22:20,01:10 22 Mar,2h 50m,non-stop,No info,3897",
        "Air India,1/05/2019,Kolkata,Banglore,CCU → IXR → BBI → BLR,05:50,13:15,7h 25m,2 stops,No info,7662",
        "Jet Airways,9/06/2019,Delhi,Cochin,DEL → LKO → BOM → COK,09:25,04:25 10 Jun,19h,2 stops,No info,13882",
        "IndiGo,12/05/2019,Kolkata,Banglore,CCU → NAG → BLR,18:05,23:30,5h 25m,1 stop,No info,6218",
        "IndiGo,01/03/2019,Banglore,New Delhi,BLR → NAG → DEL,16:50,21:35,4h 45m,1 stop,No info,13302",
        "SpiceJet,24/06/2019,Kolkata,Banglore,CCU → BLR,09:00,11:25,2h 25m,non-stop,No info,3873",
        "Jet Airways,12/03/2019,Banglore,New Delhi,BLR → BOM → DEL,18:55,10:25 13 Mar,15h 30m,1 stop,In-flight meal not included,11087",
        "Jet Airways,01/03/2019,Banglore,New Delhi,BLR → BOM → DEL,08:00,05:05 02 Mar,21h 5m,1 stop,No info,22270",
        "Multiple carriers,27/05/2019,Delhi,Cochin,DEL → BOM → COK,11:25,19:15,7h 50m,1 stop,No info,8625",
        "Air India,06/06/2019,Chennai,Kolkata,MAA → CCU,08:20,10:35,2h 15m,,No info,4667",
    ])
}

#[test]
fn test_three_flight_scenario() {
    let table = three_flights();
    let d = compute_dashboard(&table, &FlightFilter::new(["A"], 0.0, 10000.0));

    assert_eq!(d.kpis.flight_count, 1);
    assert_eq!(d.kpis.mean_price, 4000.0);
    assert!((d.kpis.coverage_pct - 33.333).abs() < 0.01);

    let counts: Vec<(PartOfDay, usize)> = d
        .flights_by_part_of_day
        .iter()
        .map(|c| (c.part_of_day, c.count))
        .collect();
    assert_eq!(
        counts,
        vec![
            (PartOfDay::Morning, 1),
            (PartOfDay::Afternoon, 0),
            (PartOfDay::Evening, 0),
            (PartOfDay::Night, 0),
        ]
    );
    assert_eq!(d.kpis.mean_duration_minutes, 190.0);
    assert_eq!(d.monthly_prices.len(), 1);
    assert_eq!(d.monthly_prices[0].label, "Mar");
}

#[test]
fn test_unknown_airline_scenario() {
    let table = three_flights();
    let d = compute_dashboard(&table, &FlightFilter::new(["Z"], 0.0, 20000.0));

    assert_eq!(d.kpis.flight_count, 0);
    assert!(d.kpis.mean_price.is_nan());
    assert!(d.price_by_airline.is_empty());
    assert!(d.price_by_stops.is_empty());
    assert!(d.route_prices.is_empty());
    assert!(d.monthly_prices.is_empty());
    assert!(d.flights_by_part_of_day.iter().all(|c| c.count == 0));

    // NaN goes out as null.
    let json = serde_json::to_value(&d).unwrap();
    assert!(json["kpis"]["mean_price"].is_null());
}

#[test]
fn test_filter_is_exact() {
    let table = sample();
    let airlines = ["IndiGo", "Jet Airways"];
    for (lo, hi) in [(0.0, 1e9), (4000.0, 12000.0), (6218.0, 6218.0), (13000.0, 14000.0)] {
        let d = compute_dashboard(&table, &FlightFilter::new(airlines, lo, hi));
        let expected: Vec<usize> = table
            .records()
            .iter()
            .enumerate()
            .filter(|(_, r)| airlines.contains(&r.airline.as_str()) && lo <= r.price && r.price <= hi)
            .map(|(i, _)| i)
            .collect();
        assert_eq!(d.indices, expected, "range [{lo}, {hi}]");
        for &i in &d.indices {
            let r = &table.records()[i];
            assert!(d.filter.min_price <= r.price && r.price <= d.filter.max_price);
        }
    }
}

#[test]
fn test_part_of_day_counts_sum_to_flight_count() {
    let table = sample();
    let all: Vec<String> = table.airlines().iter().cloned().collect();
    let d = compute_dashboard(&table, &FlightFilter::new(all, 0.0, 1e9));

    assert_eq!(d.flights_by_part_of_day.len(), 4);
    let order: Vec<PartOfDay> = d.flights_by_part_of_day.iter().map(|c| c.part_of_day).collect();
    assert_eq!(order, PartOfDay::ALL.to_vec());
    let total: usize = d.flights_by_part_of_day.iter().map(|c| c.count).sum();
    assert_eq!(total, d.kpis.flight_count);
    assert_eq!(d.kpis.flight_count, 10);
    assert_eq!(d.kpis.coverage_pct, 100.0);
}

#[test]
fn test_coverage_is_monotonic() {
    let table = sample();
    let coverage = |airlines: &[&str], hi: f64| {
        compute_dashboard(&table, &FlightFilter::new(airlines.iter().copied(), 0.0, hi))
            .kpis
            .coverage_pct
    };

    let mut last = 0.0;
    for hi in [4000.0, 8000.0, 12000.0, 16000.0, 25000.0] {
        let c = coverage(&["IndiGo", "Air India"], hi);
        assert!(c >= last, "price {hi}: {c} < {last}");
        last = c;
    }

    let mut last = 0.0;
    let mut selected: Vec<&str> = Vec::new();
    for airline in ["SpiceJet", "IndiGo", "Jet Airways", "Air India"] {
        selected.push(airline);
        let c = coverage(&selected, 1e9);
        assert!(c >= last);
        last = c;
    }
}

#[test]
fn test_recompute_is_bit_identical() {
    let table = sample();
    let filter = FlightFilter::new(["IndiGo", "Jet Airways", "Air India"], 3000.0, 15000.0);
    let a = serde_json::to_string(&compute_dashboard(&table, &filter)).unwrap();
    let b = serde_json::to_string(&compute_dashboard(&table, &filter)).unwrap();
    assert_eq!(a, b);
    assert_eq!(compute_dashboard(&table, &filter), compute_dashboard(&table, &filter));
}

#[test]
fn test_grouped_views() {
    let table = sample();
    let all: Vec<String> = table.airlines().iter().cloned().collect();
    let d = compute_dashboard(&table, &FlightFilter::new(all, 0.0, 1e9));

    let stops: Vec<&str> = d.price_by_stops.iter().map(|g| g.label.as_str()).collect();
    assert_eq!(stops, vec!["non-stop", "1 stop", "2 stops", "unknown"]);

    let jet = d
        .price_by_airline
        .iter()
        .find(|g| g.label == "Jet Airways")
        .unwrap();
    assert_eq!(jet.summary.count, 3);
    assert_eq!(jet.summary.median, 13882.0);
    assert_eq!((jet.summary.min, jet.summary.max), (11087.0, 22270.0));

    assert_eq!(
        d.route_prices.get("Banglore", "New Delhi"),
        Some((3897.0 + 13302.0 + 11087.0 + 22270.0) / 4.0)
    );
    assert_eq!(d.route_prices.get("Chennai", "Cochin"), None);

    let months: Vec<u32> = d.monthly_prices.iter().map(|m| m.month).collect();
    assert_eq!(months, vec![3, 5, 6]);

    assert_eq!(d.price_histogram.bins.len(), 50);
    assert_eq!(d.price_histogram.total(), 10);
    assert_eq!(d.duration_histogram.total(), 10);
}
