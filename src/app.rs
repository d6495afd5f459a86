use eframe::egui::{self, Color32, ScrollArea, Ui};

use flight_dash::data::aggregate::stops_rank;
use flight_dash::data::model::PartOfDay;
use flight_dash::state::DashboardState;

use crate::color::CategoryColors;
use crate::ui::{charts, panels, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct FlightDashApp {
    pub state: DashboardState,
    airline_colors: CategoryColors,
    stop_colors: CategoryColors,
    part_of_day_colors: CategoryColors,
}

impl FlightDashApp {
    pub fn new(state: DashboardState) -> Self {
        let airline_colors = CategoryColors::new(state.table().airlines().iter().cloned());

        let mut stops: Vec<&str> = state
            .table()
            .records()
            .iter()
            .map(|r| r.total_stops.as_str())
            .collect();
        stops.sort_by(|a, b| stops_rank(a).cmp(&stops_rank(b)).then_with(|| a.cmp(b)));
        stops.dedup();
        let stop_colors = CategoryColors::new(stops);

        let part_of_day_colors = CategoryColors::new(PartOfDay::ALL.iter().map(|p| p.label()));

        Self {
            state,
            airline_colors,
            stop_colors,
            part_of_day_colors,
        }
    }

    fn charts(&self, ui: &mut Ui) {
        let d = &self.state.dashboard;

        ui.columns(2, |cols| {
            charts::histogram(
                &mut cols[0],
                "price_histogram",
                "Price distribution",
                "Price",
                &d.price_histogram,
                Color32::from_rgb(0x63, 0x6E, 0xFA),
            );
            charts::histogram(
                &mut cols[1],
                "duration_histogram",
                "Duration distribution (minutes)",
                "Duration (minutes)",
                &d.duration_histogram,
                Color32::from_rgb(0xEF, 0x55, 0x3B),
            );
        });
        ui.add_space(8.0);

        ui.columns(2, |cols| {
            charts::price_boxes(
                &mut cols[0],
                "price_by_airline",
                "Price by airline",
                &d.price_by_airline,
                &self.airline_colors,
            );
            charts::price_boxes(
                &mut cols[1],
                "price_by_stops",
                "Price by number of stops",
                &d.price_by_stops,
                &self.stop_colors,
            );
        });
        ui.add_space(8.0);

        ui.columns(2, |cols| {
            charts::part_of_day_bars(
                &mut cols[0],
                &d.flights_by_part_of_day,
                &self.part_of_day_colors,
            );
            charts::route_heatmap(&mut cols[1], &d.route_prices);
        });
        ui.add_space(8.0);

        charts::monthly_trend(ui, &d.monthly_prices);
    }
}

impl eframe::App for FlightDashApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: title bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &self.state);
        });

        // ---- Left side panel: filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state, &self.airline_colors);
            });

        // ---- Central panel: KPIs, charts, table ----
        egui::CentralPanel::default().show(ctx, |ui| {
            ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    panels::kpi_row(ui, &self.state.dashboard.kpis);
                    ui.separator();
                    self.charts(ui);
                    ui.separator();
                    table::flight_table(ui, &mut self.state);
                });
        });
    }
}
