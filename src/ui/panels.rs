use eframe::egui::{self, RichText, ScrollArea, Ui};

use flight_dash::data::aggregate::Kpis;
use flight_dash::state::DashboardState;

use super::{fmt_amount, fmt_decimal};
use crate::color::CategoryColors;

/// Price slider granularity.
const PRICE_STEP: f64 = 1000.0;

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut DashboardState, airline_colors: &CategoryColors) {
    ui.heading("Filters");
    ui.separator();

    if state.table().is_empty() {
        ui.label("The flight table is empty.");
        return;
    }

    // ---- Price range ----
    ui.strong("Price range");
    if let Some((lo, hi)) = state.table().price_domain() {
        let mut min = state.filter.min_price;
        let mut max = state.filter.max_price;
        let min_changed = ui
            .add(egui::Slider::new(&mut min, lo..=hi).step_by(PRICE_STEP).text("min"))
            .changed();
        let max_changed = ui
            .add(egui::Slider::new(&mut max, lo..=hi).step_by(PRICE_STEP).text("max"))
            .changed();
        if min_changed || max_changed {
            // Keep the handles from crossing: the one being dragged wins.
            if min > max {
                if min_changed {
                    max = min;
                } else {
                    min = max;
                }
            }
            state.set_price_range(min, max);
        }
    }
    ui.separator();

    // ---- Airline multi-select ----
    let airlines: Vec<String> = state.table().airlines().iter().cloned().collect();
    let n_selected = airlines
        .iter()
        .filter(|a| state.filter.airlines.contains(*a))
        .count();
    ui.strong(format!("Airlines  ({n_selected}/{})", airlines.len()));

    ui.horizontal(|ui: &mut Ui| {
        if ui.small_button("All").clicked() {
            state.select_all();
        }
        if ui.small_button("None").clicked() {
            state.select_none();
        }
    });

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            for airline in &airlines {
                let mut checked = state.filter.airlines.contains(airline);
                let text = RichText::new(airline.as_str()).color(airline_colors.color_for(airline));
                if ui.checkbox(&mut checked, text).changed() {
                    state.toggle_airline(airline);
                }
            }
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the title bar.
pub fn top_bar(ui: &mut Ui, state: &DashboardState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.strong("Flight fares dashboard");
        ui.separator();
        ui.label(format!(
            "{} flights loaded, {} visible",
            fmt_amount(state.table().len() as f64),
            fmt_amount(state.dashboard.kpis.flight_count as f64)
        ));
    });
}

// ---------------------------------------------------------------------------
// KPI row
// ---------------------------------------------------------------------------

fn kpi_box(ui: &mut Ui, title: &str, value: String, detail: String) {
    ui.group(|ui: &mut Ui| {
        ui.set_min_width(180.0);
        ui.vertical_centered(|ui: &mut Ui| {
            ui.label(title);
            ui.heading(RichText::new(value).strong());
            ui.weak(detail);
        });
    });
}

/// The four headline numbers.
pub fn kpi_row(ui: &mut Ui, kpis: &Kpis) {
    ui.horizontal_wrapped(|ui: &mut Ui| {
        kpi_box(
            ui,
            "Flights",
            fmt_amount(kpis.flight_count as f64),
            format!("{}% of total", fmt_decimal(kpis.coverage_pct, 1)),
        );
        kpi_box(
            ui,
            "Mean price",
            fmt_amount(kpis.mean_price),
            format!(
                "Min: {} | Max: {}",
                fmt_amount(kpis.min_price),
                fmt_amount(kpis.max_price)
            ),
        );
        kpi_box(
            ui,
            "Mean duration",
            format!("{}h", fmt_decimal(kpis.mean_duration_hours, 1)),
            format!("({} minutes)", fmt_decimal(kpis.mean_duration_minutes, 0)),
        );
        kpi_box(
            ui,
            "Airlines",
            kpis.selected_airlines.to_string(),
            format!("of {} total", kpis.total_airlines),
        );
    });
}
