use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

fn hsl_to_color32(hue: f32, saturation: f32, lightness: f32) -> Color32 {
    let rgb: Srgb = Hsl::new(hue, saturation, lightness).into_color();
    Color32::from_rgb(
        (rgb.red.clamp(0.0, 1.0) * 255.0) as u8,
        (rgb.green.clamp(0.0, 1.0) * 255.0) as u8,
        (rgb.blue.clamp(0.0, 1.0) * 255.0) as u8,
    )
}

/// Sequential scale for the route grid: `t = 0` is dark violet, `t = 1`
/// bright yellow. NaN maps to the low end.
pub fn heat_color(t: f64) -> Color32 {
    let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) as f32 };
    hsl_to_color32(270.0 - 210.0 * t, 0.70, 0.25 + 0.40 * t)
}

// ---------------------------------------------------------------------------
// Color mapping: category label → Color32
// ---------------------------------------------------------------------------

/// Maps the labels of one category column (airline, stops, ...) to
/// distinct colours, so a label keeps its colour across every chart.
#[derive(Debug, Clone)]
pub struct CategoryColors {
    mapping: BTreeMap<String, Color32>,
    default_color: Color32,
}

impl CategoryColors {
    /// Build a colour map over `labels`, in iteration order.
    pub fn new<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let labels: Vec<String> = labels.into_iter().map(Into::into).collect();
        let mapping = labels
            .into_iter()
            .zip(palette_cycle())
            .collect();

        CategoryColors {
            mapping,
            default_color: Color32::GRAY,
        }
    }

    /// Look up the colour for a label.
    pub fn color_for(&self, label: &str) -> Color32 {
        self.mapping
            .get(label)
            .copied()
            .unwrap_or(self.default_color)
    }
}

/// Generates visually distinct colours: evenly spaced hues, then the same
/// hues again, shifted and darker, for as many labels as needed.
pub fn palette_cycle() -> impl Iterator<Item = Color32> {
    const HUES: usize = 12;
    (0..).map(|i: usize| {
        let round = (i / HUES) as f32;
        let hue = ((i % HUES) as f32 / HUES as f32) * 360.0 + round * 15.0;
        hsl_to_color32(hue % 360.0, 0.75, (0.55 - 0.1 * round).max(0.25))
    })
}
