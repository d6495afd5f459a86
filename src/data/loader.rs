use std::io::Read;
use std::path::Path;

use anyhow::{bail, Context, Result};
use arrow::array::{Array, ArrayRef, AsArray, StringArray};
use arrow::compute::cast;
use arrow::datatypes::{DataType, Float64Type};
use arrow::record_batch::RecordBatch;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

use super::derive::prepare_all;
use super::error::PrepareError;
use super::model::{FlightTable, RawFlightRow, REQUIRED_COLUMNS};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load and prepare the flight table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row with the source column names
/// * `.json`    – `[{ "Airline": "IndiGo", "Price": 3897, ... }, ...]`
/// * `.parquet` – one column per source column, any type castable to text
///   (`Price` castable to float)
///
/// Every error is fatal: a missing file, a missing column or a single
/// unparseable mandatory cell fails the whole load.
pub fn load_file(path: &Path) -> Result<FlightTable> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let table = match ext.as_str() {
        "csv" => {
            let file = std::fs::File::open(path)
                .with_context(|| format!("opening {}", path.display()))?;
            load_csv_reader(file)
        }
        "json" => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            load_json_str(&text)
        }
        "parquet" | "pq" => load_parquet(path),
        other => bail!("Unsupported file extension: .{other}"),
    }
    .with_context(|| format!("loading flight table from {}", path.display()))?;

    log::info!(
        "Loaded {} flights ({} airlines) from {}",
        table.len(),
        table.airlines().len(),
        path.display()
    );
    Ok(table)
}

/// Turn raw rows into the prepared table.
fn prepare(rows: Vec<RawFlightRow>) -> Result<FlightTable> {
    let records = prepare_all(&rows)?;
    let missing_arrival = records.iter().filter(|r| r.arrival_hour.is_none()).count();
    if missing_arrival > 0 {
        log::info!("{missing_arrival} flights have no parseable arrival hour");
    }
    Ok(FlightTable::from_records(records))
}

/// Fail with [`PrepareError::MissingColumn`] unless every required column
/// is among `columns`.
fn check_columns<'a>(columns: impl IntoIterator<Item = &'a str>) -> Result<(), PrepareError> {
    let present: Vec<&str> = columns.into_iter().map(str::trim).collect();
    match REQUIRED_COLUMNS.iter().find(|c| !present.contains(*c)) {
        Some(missing) => Err(PrepareError::MissingColumn(missing.to_string())),
        None => Ok(()),
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// Read a CSV flight table from any reader.
pub fn load_csv_reader<R: Read>(reader: R) -> Result<FlightTable> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::Headers)
        .from_reader(reader);

    let headers = reader.headers().context("reading CSV headers")?.clone();
    check_columns(headers.iter())?;

    let mut rows = Vec::new();
    for (row_no, result) in reader.deserialize::<RawFlightRow>().enumerate() {
        let row = result.with_context(|| format!("CSV row {}", row_no + 1))?;
        rows.push(row);
    }

    prepare(rows)
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Records-oriented JSON (the default `df.to_json(orient='records')`).
pub fn load_json_str(text: &str) -> Result<FlightTable> {
    let rows: Vec<RawFlightRow> = serde_json::from_str(text).context("parsing JSON records")?;
    prepare(rows)
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file written by Pandas, Polars or `generate_sample`.
///
/// Columns are cast rather than downcast, so dictionary-encoded categories,
/// large strings and date columns all work.
fn load_parquet(path: &Path) -> Result<FlightTable> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;

    let schema = builder.schema().clone();
    check_columns(schema.fields().iter().map(|f| f.name().as_str()))?;

    let reader = builder.build().context("building parquet reader")?;

    let mut rows = Vec::new();
    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        rows.extend(batch_to_rows(&batch)?);
    }

    prepare(rows)
}

// -- Parquet / Arrow helpers --

/// Cast a named column to UTF-8, `None` when the batch has no such column.
fn text_column(batch: &RecordBatch, name: &str) -> Result<Option<ArrayRef>> {
    batch
        .column_by_name(name)
        .map(|col| cast(col, &DataType::Utf8).with_context(|| format!("casting '{name}' to text")))
        .transpose()
}

fn required_text_column(batch: &RecordBatch, name: &str) -> Result<ArrayRef> {
    text_column(batch, name)?.ok_or_else(|| PrepareError::MissingColumn(name.to_string()).into())
}

fn cell(col: &StringArray, row: usize) -> Option<String> {
    if col.is_null(row) {
        None
    } else {
        Some(col.value(row).to_string())
    }
}

fn batch_to_rows(batch: &RecordBatch) -> Result<Vec<RawFlightRow>> {
    let airline = required_text_column(batch, "Airline")?;
    let date = required_text_column(batch, "Date_of_Journey")?;
    let source = required_text_column(batch, "Source")?;
    let destination = required_text_column(batch, "Destination")?;
    let dep_time = required_text_column(batch, "Dep_Time")?;
    let arrival_time = text_column(batch, "Arrival_Time")?;
    let duration = text_column(batch, "Duration")?;
    let total_stops = text_column(batch, "Total_Stops")?;

    let price_col = batch
        .column_by_name("Price")
        .ok_or_else(|| PrepareError::MissingColumn("Price".to_string()))?;
    let price = cast(price_col, &DataType::Float64).context("casting 'Price' to float")?;
    let price = price.as_primitive::<Float64Type>();

    let airline = airline.as_string::<i32>();
    let date = date.as_string::<i32>();
    let source = source.as_string::<i32>();
    let destination = destination.as_string::<i32>();
    let dep_time = dep_time.as_string::<i32>();
    let arrival_time = arrival_time.as_ref().map(|c| c.as_string::<i32>());
    let duration = duration.as_ref().map(|c| c.as_string::<i32>());
    let total_stops = total_stops.as_ref().map(|c| c.as_string::<i32>());

    let rows = (0..batch.num_rows())
        .map(|row| RawFlightRow {
            airline: cell(airline, row).unwrap_or_default(),
            date_of_journey: cell(date, row).unwrap_or_default(),
            source: cell(source, row).unwrap_or_default(),
            destination: cell(destination, row).unwrap_or_default(),
            dep_time: cell(dep_time, row).unwrap_or_default(),
            arrival_time: arrival_time.and_then(|c| cell(c, row)),
            duration: duration.and_then(|c| cell(c, row)),
            total_stops: total_stops.and_then(|c| cell(c, row)),
            price: if price.is_null(row) {
                f64::NAN
            } else {
                price.value(row)
            },
        })
        .collect();

    Ok(rows)
}
