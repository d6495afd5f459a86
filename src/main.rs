#[cfg(feature = "gui")]
mod app;
#[cfg(feature = "gui")]
mod color;
#[cfg(feature = "gui")]
mod ui;

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;

use flight_dash::config::Args;
use flight_dash::data::loader::load_file;
use flight_dash::state::DashboardState;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    // The one and only load; everything downstream shares this handle.
    let table = match load_file(&args.data) {
        Ok(table) => Arc::new(table),
        Err(e) => {
            log::error!("Failed to load flight table: {e:#}");
            return Err(e);
        }
    };

    let filter = args.initial_filter(&table);
    let state = DashboardState::new(table, filter);

    present(state, args.json)
}

fn print_json(state: &DashboardState) -> Result<()> {
    let json = serde_json::to_string_pretty(&state.dashboard)?;
    println!("{json}");
    Ok(())
}

#[cfg(feature = "gui")]
fn present(state: DashboardState, json: bool) -> Result<()> {
    use eframe::egui;

    if json {
        return print_json(&state);
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 900.0])
            .with_min_inner_size([800.0, 500.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Flight fares dashboard",
        options,
        Box::new(|_cc| Ok(Box::new(app::FlightDashApp::new(state)))),
    )
    .map_err(|e| anyhow::anyhow!("running the dashboard window: {e}"))
}

#[cfg(not(feature = "gui"))]
fn present(state: DashboardState, _json: bool) -> Result<()> {
    print_json(&state)
}
