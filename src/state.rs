use std::sync::Arc;

use crate::data::aggregate::{compute_dashboard, Dashboard};
use crate::data::filter::FlightFilter;
use crate::data::model::{FlightRecord, FlightTable};

/// Rows per page of the flight table view.
pub const PAGE_SIZE: usize = 10;

// ---------------------------------------------------------------------------
// Dashboard state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
///
/// Every filter mutation recomputes the dashboard synchronously, so
/// `dashboard` always reflects `filter`.
pub struct DashboardState {
    /// Prepared table, loaded once at startup.
    table: Arc<FlightTable>,

    /// Current filter, as edited by the widgets.
    pub filter: FlightFilter,

    /// Result of the last recompute.
    pub dashboard: Dashboard,

    /// Zero-based page of the flight table view.
    pub page: usize,
}

impl DashboardState {
    pub fn new(table: Arc<FlightTable>, filter: FlightFilter) -> Self {
        let dashboard = compute_dashboard(&table, &filter);
        Self {
            filter: dashboard.filter.clone(),
            table,
            dashboard,
            page: 0,
        }
    }

    pub fn table(&self) -> &FlightTable {
        &self.table
    }

    /// Recompute the dashboard after a filter change.
    pub fn refilter(&mut self) {
        self.dashboard = compute_dashboard(&self.table, &self.filter);
        self.page = self.page.min(self.page_count().saturating_sub(1));
    }

    /// Toggle a single airline in the selection.
    pub fn toggle_airline(&mut self, airline: &str) {
        if !self.filter.airlines.remove(airline) {
            self.filter.airlines.insert(airline.to_string());
        }
        self.refilter();
    }

    /// Select every airline of the table.
    pub fn select_all(&mut self) {
        self.filter.airlines = self.table.airlines().clone();
        self.refilter();
    }

    /// Deselect every airline.
    pub fn select_none(&mut self) {
        self.filter.airlines.clear();
        self.refilter();
    }

    pub fn set_price_range(&mut self, min_price: f64, max_price: f64) {
        self.filter.min_price = min_price;
        self.filter.max_price = max_price;
        self.refilter();
    }

    /// Number of pages of matching flights (at least one).
    pub fn page_count(&self) -> usize {
        self.dashboard.indices.len().div_ceil(PAGE_SIZE).max(1)
    }

    /// Matching flights on the current page, with their table index.
    pub fn page_records(&self) -> impl Iterator<Item = (usize, &FlightRecord)> + '_ {
        self.dashboard
            .indices
            .iter()
            .skip(self.page * PAGE_SIZE)
            .take(PAGE_SIZE)
            .map(|&i| (i, &self.table.records()[i]))
    }
}
