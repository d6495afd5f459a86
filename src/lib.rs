//! Flight-fare dashboard: a prepared in-memory flight table and a pure
//! filter → aggregate engine, with an optional egui front end in the binary.

pub mod config;
pub mod data;
pub mod state;

pub use data::aggregate::{compute_dashboard, Dashboard};
pub use data::filter::FlightFilter;
pub use data::model::{FlightRecord, FlightTable, PartOfDay};
