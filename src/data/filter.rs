use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::model::{FlightRecord, FlightTable};

/// Airlines pre-selected when the dashboard opens, if the table has them.
pub const DEFAULT_AIRLINES: [&str; 3] = ["IndiGo", "Air India", "Jet Airways"];

// ---------------------------------------------------------------------------
// Filter predicate: selected airlines and an inclusive price range
// ---------------------------------------------------------------------------

/// The two dashboard inputs.
///
/// An empty airline set matches nothing; airlines absent from the table are
/// allowed and simply match nothing either.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlightFilter {
    pub airlines: BTreeSet<String>,
    pub min_price: f64,
    pub max_price: f64,
}

impl FlightFilter {
    pub fn new<I, S>(airlines: I, min_price: f64, max_price: f64) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        FlightFilter {
            airlines: airlines.into_iter().map(Into::into).collect(),
            min_price,
            max_price,
        }
    }

    /// The opening filter: the usual three carriers (whichever of them the
    /// table has, every airline if none) over the full price domain.
    pub fn default_for(table: &FlightTable) -> Self {
        let mut airlines: BTreeSet<String> = DEFAULT_AIRLINES
            .iter()
            .filter(|a| table.airlines().contains(**a))
            .map(|a| a.to_string())
            .collect();
        if airlines.is_empty() {
            airlines = table.airlines().clone();
        }
        let (min_price, max_price) = table.price_domain().unwrap_or((0.0, 0.0));
        FlightFilter {
            airlines,
            min_price,
            max_price,
        }
    }

    /// Bring the price bounds into the table's observed price domain.
    ///
    /// A reversed range is swapped and NaN bounds fall back to the domain
    /// edge; out-of-range values are clamped, never rejected.
    pub fn normalized(&self, table: &FlightTable) -> Self {
        let mut lo = self.min_price;
        let mut hi = self.max_price;
        if lo > hi {
            std::mem::swap(&mut lo, &mut hi);
        }

        if let Some((dom_lo, dom_hi)) = table.price_domain() {
            let clamp = |v: f64, fallback: f64| {
                if v.is_nan() {
                    fallback
                } else {
                    v.clamp(dom_lo, dom_hi)
                }
            };
            let (new_lo, new_hi) = (clamp(lo, dom_lo), clamp(hi, dom_hi));
            if new_lo != self.min_price || new_hi != self.max_price {
                log::warn!(
                    "Price range [{}, {}] adjusted to [{new_lo}, {new_hi}]",
                    self.min_price,
                    self.max_price
                );
            }
            lo = new_lo;
            hi = new_hi;
        }

        let unknown: Vec<&str> = self
            .airlines
            .iter()
            .filter(|a| !table.airlines().contains(*a))
            .map(String::as_str)
            .collect();
        if !unknown.is_empty() {
            log::warn!("Selected airlines not in the table: {unknown:?}");
        }

        FlightFilter {
            airlines: self.airlines.clone(),
            min_price: lo,
            max_price: hi,
        }
    }

    /// Whether one record passes the filter.
    pub fn matches(&self, record: &FlightRecord) -> bool {
        self.airlines.contains(&record.airline)
            && self.min_price <= record.price
            && record.price <= self.max_price
    }
}

/// Return indices of flights that pass the filter, in table order.
///
/// The filter is used as given; call [`FlightFilter::normalized`] first to
/// clamp it to the table.
pub fn filtered_indices(table: &FlightTable, filter: &FlightFilter) -> Vec<usize> {
    table
        .records()
        .iter()
        .enumerate()
        .filter(|(_, rec)| filter.matches(rec))
        .map(|(i, _)| i)
        .collect()
}
