//! egui presentation layer. Widgets read the [`DashboardState`] and mutate
//! its filter; they never compute aggregates themselves.
//!
//! [`DashboardState`]: flight_dash::state::DashboardState

pub mod charts;
pub mod panels;
pub mod table;

/// Height of every chart.
pub const CHART_HEIGHT: f32 = 240.0;

/// Round and group thousands: `12345.6` → `12,346`. NaN shows as a dash.
pub fn fmt_amount(v: f64) -> String {
    if !v.is_finite() {
        return "–".to_string();
    }
    let rounded = v.round() as i64;
    let digits = rounded.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if rounded < 0 {
        out.insert(0, '-');
    }
    out
}

/// Like [`fmt_amount`] with a fixed number of decimals and no grouping.
pub fn fmt_decimal(v: f64, decimals: usize) -> String {
    if v.is_finite() {
        format!("{v:.decimals$}")
    } else {
        "–".to_string()
    }
}
