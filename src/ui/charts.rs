use std::ops::RangeInclusive;

use eframe::egui::{self, Color32, RichText, Ui};
use egui_plot::{
    Bar, BarChart, BoxElem, BoxPlot, BoxSpread, GridMark, Legend, Line, Plot, PlotPoints, Points,
};

use flight_dash::data::aggregate::{GroupSummary, MonthlyPrice, PartOfDayCount, RouteGrid};
use flight_dash::data::stats::Histogram;

use super::{fmt_amount, CHART_HEIGHT};
use crate::color::{heat_color, CategoryColors};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Axis formatter for categorical charts: category `i` sits at `x = i`.
fn category_axis(labels: Vec<String>) -> impl Fn(GridMark, &RangeInclusive<f64>) -> String {
    move |mark: GridMark, _range: &RangeInclusive<f64>| {
        let idx = mark.value.round();
        if (mark.value - idx).abs() > 1e-6 || idx < 0.0 {
            return String::new();
        }
        labels.get(idx as usize).cloned().unwrap_or_default()
    }
}

fn empty_notice(ui: &mut Ui) {
    ui.allocate_ui(egui::vec2(ui.available_width(), CHART_HEIGHT), |ui| {
        ui.centered_and_justified(|ui| {
            ui.weak("No flights match the current filters");
        });
    });
}

// ---------------------------------------------------------------------------
// Histograms
// ---------------------------------------------------------------------------

/// Bar chart of a fixed-bin histogram.
pub fn histogram(ui: &mut Ui, id: &str, title: &str, x_label: &str, hist: &Histogram, color: Color32) {
    ui.strong(title);
    if hist.is_empty() {
        empty_notice(ui);
        return;
    }

    let bars: Vec<Bar> = hist
        .bins
        .iter()
        .map(|b| Bar::new((b.start + b.end) / 2.0, b.count as f64).width(b.end - b.start))
        .collect();

    Plot::new(id)
        .height(CHART_HEIGHT)
        .x_axis_label(x_label)
        .y_axis_label("Flights")
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).color(color));
        });
}

// ---------------------------------------------------------------------------
// Box plots
// ---------------------------------------------------------------------------

/// One box per group, outliers drawn as points.
pub fn price_boxes(ui: &mut Ui, id: &str, title: &str, groups: &[GroupSummary], colors: &CategoryColors) {
    ui.strong(title);
    if groups.is_empty() {
        empty_notice(ui);
        return;
    }

    let labels: Vec<String> = groups.iter().map(|g| g.label.clone()).collect();

    Plot::new(id)
        .height(CHART_HEIGHT)
        .legend(Legend::default())
        .y_axis_label("Price")
        .x_axis_formatter(category_axis(labels))
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            for (i, group) in groups.iter().enumerate() {
                let s = &group.summary;
                let color = colors.color_for(&group.label);
                let x = i as f64;

                let elem = BoxElem::new(
                    x,
                    BoxSpread::new(s.lower_whisker, s.q1, s.median, s.q3, s.upper_whisker),
                )
                .name(format!("{} (n = {})", group.label, s.count))
                .box_width(0.6);
                plot_ui.box_plot(BoxPlot::new(vec![elem]).name(&group.label).color(color));

                if !s.outliers.is_empty() {
                    let points: PlotPoints = s.outliers.iter().map(|&v| [x, v]).collect();
                    plot_ui.points(Points::new(points).color(color).radius(2.0_f32));
                }
            }
        });
}

// ---------------------------------------------------------------------------
// Part of day
// ---------------------------------------------------------------------------

pub fn part_of_day_bars(ui: &mut Ui, counts: &[PartOfDayCount], colors: &CategoryColors) {
    ui.strong("Flights by part of day");

    let labels: Vec<String> = counts.iter().map(|c| c.part_of_day.to_string()).collect();

    Plot::new("part_of_day")
        .height(CHART_HEIGHT)
        .y_axis_label("Flights")
        .x_axis_formatter(category_axis(labels))
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            for (i, c) in counts.iter().enumerate() {
                let label = c.part_of_day.label();
                let bar = Bar::new(i as f64, c.count as f64).width(0.7).name(label);
                plot_ui.bar_chart(
                    BarChart::new(vec![bar])
                        .name(label)
                        .color(colors.color_for(label)),
                );
            }
        });
}

// ---------------------------------------------------------------------------
// Route grid
// ---------------------------------------------------------------------------

/// Mean price per source (rows) and destination (columns), cells shaded on
/// a heat scale between the cheapest and dearest route.
pub fn route_heatmap(ui: &mut Ui, grid: &RouteGrid) {
    ui.strong("Mean price by source / destination");
    if grid.is_empty() {
        empty_notice(ui);
        return;
    }

    let values = grid.mean_price.iter().flatten().flatten().copied();
    let (lo, hi) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });
    let span = hi - lo;

    egui::ScrollArea::horizontal()
        .id_salt("route_heatmap")
        .show(ui, |ui| {
            egui::Grid::new("route_heatmap_grid")
                .spacing([4.0, 4.0])
                .show(ui, |ui| {
                    ui.weak("from \\ to");
                    for destination in &grid.destinations {
                        ui.strong(destination.as_str());
                    }
                    ui.end_row();

                    for (source, row) in grid.sources.iter().zip(&grid.mean_price) {
                        ui.strong(source.as_str());
                        for cell in row {
                            match cell {
                                Some(v) => {
                                    let t = if span > 0.0 { (v - lo) / span } else { 1.0 };
                                    let text_color =
                                        if t > 0.5 { Color32::BLACK } else { Color32::WHITE };
                                    ui.label(
                                        RichText::new(fmt_amount(*v))
                                            .monospace()
                                            .color(text_color)
                                            .background_color(heat_color(t)),
                                    );
                                }
                                None => {
                                    ui.label("");
                                }
                            }
                        }
                        ui.end_row();
                    }
                });
        });
}

// ---------------------------------------------------------------------------
// Monthly trend
// ---------------------------------------------------------------------------

pub fn monthly_trend(ui: &mut Ui, months: &[MonthlyPrice]) {
    ui.strong("Mean price by month");
    if months.is_empty() {
        empty_notice(ui);
        return;
    }

    let color = Color32::from_rgb(0x00, 0xCC, 0x96);
    let series: Vec<[f64; 2]> = months
        .iter()
        .map(|m| [f64::from(m.month), m.mean_price])
        .collect();

    // Axis position is the month number; label index 0 is unused.
    let mut labels = vec![String::new()];
    labels.extend(flight_dash::data::aggregate::MONTH_LABELS.iter().map(|l| l.to_string()));

    Plot::new("monthly_trend")
        .height(CHART_HEIGHT)
        .y_axis_label("Mean price")
        .x_axis_formatter(category_axis(labels))
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            let line: PlotPoints = series.iter().copied().collect();
            let markers: PlotPoints = series.iter().copied().collect();
            plot_ui.line(Line::new(line).color(color).width(2.0_f32).name("Mean price"));
            plot_ui.points(Points::new(markers).color(color).radius(4.0_f32));
        });
}
