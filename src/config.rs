use std::path::PathBuf;

use clap::Parser;

use crate::data::filter::FlightFilter;
use crate::data::model::FlightTable;

/// Command-line configuration.
#[derive(Debug, Clone, Parser)]
#[command(name = "flight-dash", version, about = "Interactive flight-fare dashboard")]
pub struct Args {
    /// Flight table to load (.csv, .json or .parquet)
    #[arg(default_value = "Data_Train.csv")]
    pub data: PathBuf,

    /// Airline to pre-select; repeat for several (default: IndiGo, Air India, Jet Airways)
    #[arg(long = "airline", value_name = "NAME")]
    pub airlines: Vec<String>,

    /// Lower price bound (default: cheapest flight)
    #[arg(long, value_name = "PRICE")]
    pub min_price: Option<f64>,

    /// Upper price bound (default: most expensive flight)
    #[arg(long, value_name = "PRICE")]
    pub max_price: Option<f64>,

    /// Print the dashboard for the initial filter as JSON and exit
    #[arg(long)]
    pub json: bool,
}

impl Args {
    /// Opening filter: the table defaults overridden by whatever was passed.
    pub fn initial_filter(&self, table: &FlightTable) -> FlightFilter {
        let mut filter = FlightFilter::default_for(table);
        if !self.airlines.is_empty() {
            filter.airlines = self.airlines.iter().cloned().collect();
        }
        if let Some(min) = self.min_price {
            filter.min_price = min;
        }
        if let Some(max) = self.max_price {
            filter.max_price = max;
        }
        filter.normalized(table)
    }
}
