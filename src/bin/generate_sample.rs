//! Write a synthetic flight-fare table to `sample_flights.parquet`, with
//! the same columns and cell formats as the real source table.

use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

const ROWS: usize = 2000;

const MONTH_ABBR: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// (airline, price multiplier)
const AIRLINES: [(&str, f64); 6] = [
    ("IndiGo", 0.9),
    ("Air India", 1.1),
    ("Jet Airways", 1.4),
    ("SpiceJet", 0.8),
    ("Vistara", 1.2),
    ("GoAir", 0.85),
];

/// (source, destination, base flight minutes)
const ROUTES: [(&str, &str, u32); 5] = [
    ("Banglore", "New Delhi", 165),
    ("Delhi", "Cochin", 185),
    ("Kolkata", "Banglore", 155),
    ("Chennai", "Kolkata", 140),
    ("Mumbai", "Hyderabad", 85),
];

const STOPS: [&str; 4] = ["non-stop", "1 stop", "2 stops", "3 stops"];

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5)).rotate_left(7).wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Uniform index in `0..n`.
    fn below(&mut self, n: usize) -> usize {
        (self.next_f64() * n as f64) as usize % n
    }
}

/// Journey dates span March to June 2019, like the source table.
fn journey_date(rng: &mut SimpleRng) -> (u32, u32) {
    let month = 3 + rng.below(4) as u32;
    let day = 1 + rng.below(if month == 4 || month == 6 { 30 } else { 31 }) as u32;
    (day, month)
}

fn format_duration(minutes: u32) -> String {
    match (minutes / 60, minutes % 60) {
        (0, m) => format!("{m}m"),
        (h, 0) => format!("{h}h"),
        (h, m) => format!("{h}h {m}m"),
    }
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);

    let mut airline = Vec::with_capacity(ROWS);
    let mut date = Vec::with_capacity(ROWS);
    let mut source = Vec::with_capacity(ROWS);
    let mut destination = Vec::with_capacity(ROWS);
    let mut dep_time = Vec::with_capacity(ROWS);
    let mut arrival_time = Vec::with_capacity(ROWS);
    let mut duration = Vec::with_capacity(ROWS);
    let mut total_stops: Vec<Option<String>> = Vec::with_capacity(ROWS);
    let mut price = Vec::with_capacity(ROWS);

    for _ in 0..ROWS {
        let (name, multiplier) = AIRLINES[rng.below(AIRLINES.len())];
        let (from, to, base_minutes) = ROUTES[rng.below(ROUTES.len())];
        let stops = rng.below(STOPS.len());
        let (day, month) = journey_date(&mut rng);

        let dep_hour = rng.below(24) as u32;
        let dep_minute = 5 * rng.below(12) as u32;
        let minutes = base_minutes + stops as u32 * (90 + rng.below(600) as u32);
        let arrival = dep_hour * 60 + dep_minute + minutes;
        let (arr_hour, arr_minute) = ((arrival / 60) % 24, arrival % 60);

        // Overnight arrivals carry the arrival date, as in the source data.
        let arrival_text = if arrival >= 24 * 60 {
            format!(
                "{arr_hour:02}:{arr_minute:02} {:02} {}",
                day + 1,
                MONTH_ABBR[(month - 1) as usize]
            )
        } else {
            format!("{arr_hour:02}:{arr_minute:02}")
        };

        let fare = (3000.0 + 2500.0 * stops as f64 + 8000.0 * rng.next_f64()) * multiplier;

        airline.push(name.to_string());
        date.push(format!("{day}/{month:02}/2019"));
        source.push(from.to_string());
        destination.push(to.to_string());
        dep_time.push(format!("{dep_hour:02}:{dep_minute:02}"));
        arrival_time.push(arrival_text);
        duration.push(format_duration(minutes));
        // A handful of blank stop counts, like the source table.
        total_stops.push((rng.below(500) != 0).then(|| STOPS[stops].to_string()));
        price.push(fare.round() as i64);
    }

    let text = |name: &str, nullable: bool| Field::new(name, DataType::Utf8, nullable);
    let schema = Arc::new(Schema::new(vec![
        text("Airline", false),
        text("Date_of_Journey", false),
        text("Source", false),
        text("Destination", false),
        text("Dep_Time", false),
        text("Arrival_Time", false),
        text("Duration", false),
        text("Total_Stops", true),
        Field::new("Price", DataType::Int64, false),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(StringArray::from(airline)),
            Arc::new(StringArray::from(date)),
            Arc::new(StringArray::from(source)),
            Arc::new(StringArray::from(destination)),
            Arc::new(StringArray::from(dep_time)),
            Arc::new(StringArray::from(arrival_time)),
            Arc::new(StringArray::from(duration)),
            Arc::new(StringArray::from(total_stops)),
            Arc::new(Int64Array::from(price)),
        ],
    )
    .context("building record batch")?;

    let output_path = "sample_flights.parquet";
    let file = std::fs::File::create(output_path).context("creating output file")?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating parquet writer")?;
    writer.write(&batch).context("writing batch")?;
    writer.close().context("closing parquet writer")?;

    println!("Wrote {ROWS} flights to {output_path}");
    Ok(())
}
