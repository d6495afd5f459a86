//! Reductions over plain `f64` samples.
//!
//! Every function accepts an empty slice: means and extrema come back as
//! NaN, summaries and histograms come back empty.

use serde::Serialize;

/// Arithmetic mean, NaN for an empty sample.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// `(min, max)`, both NaN for an empty sample.
pub fn min_max(values: &[f64]) -> (f64, f64) {
    if values.is_empty() {
        return (f64::NAN, f64::NAN);
    }
    values.iter().fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
        (lo.min(v), hi.max(v))
    })
}

/// Quantile of an already sorted sample, linearly interpolated between the
/// two closest ranks.
pub fn quantile_sorted(sorted: &[f64], q: f64) -> f64 {
    match sorted.len() {
        0 => f64::NAN,
        1 => sorted[0],
        n => {
            let pos = q.clamp(0.0, 1.0) * (n - 1) as f64;
            let lo = pos.floor() as usize;
            let hi = pos.ceil() as usize;
            sorted[lo] + (sorted[hi] - sorted[lo]) * (pos - lo as f64)
        }
    }
}

// ---------------------------------------------------------------------------
// Five-number summary
// ---------------------------------------------------------------------------

/// Box-plot statistics for one group.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FiveNumberSummary {
    pub count: usize,
    pub mean: f64,
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
    /// Smallest observation no lower than `q1 - 1.5 * IQR`.
    pub lower_whisker: f64,
    /// Largest observation no higher than `q3 + 1.5 * IQR`.
    pub upper_whisker: f64,
    /// Observations beyond the whiskers, ascending.
    pub outliers: Vec<f64>,
}

impl FiveNumberSummary {
    /// `None` for an empty sample.
    pub fn from_values(values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }
        let mut sorted = values.to_vec();
        sorted.sort_by(f64::total_cmp);

        let q1 = quantile_sorted(&sorted, 0.25);
        let q3 = quantile_sorted(&sorted, 0.75);
        let iqr = q3 - q1;
        let lower_fence = q1 - 1.5 * iqr;
        let upper_fence = q3 + 1.5 * iqr;

        let within = |v: &f64| (lower_fence..=upper_fence).contains(v);
        let lower_whisker = sorted.iter().copied().find(|v| within(v)).unwrap_or(q1);
        let upper_whisker = sorted.iter().copied().rev().find(|v| within(v)).unwrap_or(q3);
        let outliers = sorted.iter().copied().filter(|v| !within(v)).collect();

        Some(FiveNumberSummary {
            count: sorted.len(),
            mean: mean(&sorted),
            min: sorted[0],
            q1,
            median: quantile_sorted(&sorted, 0.5),
            q3,
            max: sorted[sorted.len() - 1],
            lower_whisker,
            upper_whisker,
            outliers,
        })
    }
}

// ---------------------------------------------------------------------------
// Histogram
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistogramBin {
    pub start: f64,
    pub end: f64,
    pub count: usize,
}

/// Equal-width histogram with a fixed number of bins.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Histogram {
    pub bins: Vec<HistogramBin>,
}

impl Histogram {
    /// Spread `values` over `bin_count` equal-width bins spanning the
    /// sample's `[min, max]`; the last bin is closed on the right. A sample
    /// with a single distinct value gets unit-width bins starting at it.
    pub fn new(values: &[f64], bin_count: usize) -> Self {
        if values.is_empty() || bin_count == 0 {
            return Histogram::default();
        }
        let (lo, hi) = min_max(values);
        let width = if hi > lo {
            (hi - lo) / bin_count as f64
        } else {
            1.0
        };

        let mut counts = vec![0usize; bin_count];
        for &v in values {
            let idx = (((v - lo) / width) as usize).min(bin_count - 1);
            counts[idx] += 1;
        }

        let bins = counts
            .into_iter()
            .enumerate()
            .map(|(i, count)| HistogramBin {
                start: lo + width * i as f64,
                end: lo + width * (i + 1) as f64,
                count,
            })
            .collect();
        Histogram { bins }
    }

    /// Sum of all bin counts.
    pub fn total(&self) -> usize {
        self.bins.iter().map(|b| b.count).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.bins.is_empty()
    }
}
