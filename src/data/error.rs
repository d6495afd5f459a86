/// Errors raised while preparing the flight table
use thiserror::Error;

/// Fatal input-format errors. Any of these aborts the load: there is no
/// partial table. Row numbers are 1-based data rows (header excluded).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PrepareError {
    /// A mandatory column is not present in the source
    #[error("Missing required column '{0}'")]
    MissingColumn(String),

    /// `Date_of_Journey` is not a day-first date
    #[error("Row {row}: invalid journey date '{value}'")]
    InvalidDate { row: usize, value: String },

    /// `Dep_Time` is not `HH:MM`
    #[error("Row {row}: invalid departure time '{value}'")]
    InvalidDepartureTime { row: usize, value: String },

    /// `Price` is negative, NaN or infinite
    #[error("Row {row}: invalid price {value}")]
    InvalidPrice { row: usize, value: f64 },
}
