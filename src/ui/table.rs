use eframe::egui::Ui;
use egui_extras::{Column, TableBuilder};

use flight_dash::data::model::FlightRecord;
use flight_dash::state::DashboardState;

use super::fmt_amount;

const HEADERS: [&str; 10] = [
    "Airline",
    "Date",
    "Source",
    "Destination",
    "Dep. hour",
    "Arr. hour",
    "Duration",
    "Stops",
    "Part of day",
    "Price",
];

fn cells(rec: &FlightRecord) -> [String; 10] {
    [
        rec.airline.clone(),
        rec.departure_date.format("%d/%m/%Y").to_string(),
        rec.source.clone(),
        rec.destination.clone(),
        rec.departure_hour.to_string(),
        rec.arrival_hour.map(|h| h.to_string()).unwrap_or_default(),
        format!("{}h {:02}m", rec.duration_minutes / 60, rec.duration_minutes % 60),
        rec.total_stops.clone(),
        rec.part_of_day.to_string(),
        fmt_amount(rec.price),
    ]
}

/// Paginated table of the flights matching the current filters.
pub fn flight_table(ui: &mut Ui, state: &mut DashboardState) {
    ui.strong("Flights");

    let pages = state.page_count();
    ui.horizontal(|ui: &mut Ui| {
        if ui.add_enabled(state.page > 0, eframe::egui::Button::new("◀")).clicked() {
            state.page -= 1;
        }
        ui.label(format!("Page {} of {pages}", state.page + 1));
        if ui
            .add_enabled(state.page + 1 < pages, eframe::egui::Button::new("▶"))
            .clicked()
        {
            state.page += 1;
        }
    });

    TableBuilder::new(ui)
        .striped(true)
        .vscroll(false)
        .columns(Column::auto().resizable(true), HEADERS.len())
        .header(20.0, |mut header| {
            for title in HEADERS {
                header.col(|ui| {
                    ui.strong(title);
                });
            }
        })
        .body(|mut body| {
            for (_, rec) in state.page_records() {
                body.row(18.0, |mut row| {
                    for text in cells(rec) {
                        row.col(|ui| {
                            ui.label(text);
                        });
                    }
                });
            }
        });
}
