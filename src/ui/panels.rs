use eframe::egui::{RichText, ScrollArea, Ui};

use super::plot::Chart;

// ---------------------------------------------------------------------------
// Left side panel – chart list
// ---------------------------------------------------------------------------

/// Render the chart selector. Returns the index of a newly clicked chart.
pub fn side_panel(ui: &mut Ui, charts: &[Chart], selected: usize) -> Option<usize> {
    ui.heading("Charts");
    ui.separator();

    if charts.is_empty() {
        ui.label("Nothing to plot.");
        return None;
    }

    let mut clicked = None;
    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            for (i, chart) in charts.iter().enumerate() {
                let title = format!("Chart {}", i + 1);
                if ui.selectable_label(i == selected, RichText::new(title).strong()).clicked() {
                    clicked = Some(i);
                }
                // Colour swatch per country, matching the plot lines.
                let colors = chart.colors(ui.visuals().dark_mode);
                for (series, color) in chart.series.iter().zip(colors) {
                    ui.label(RichText::new(format!("  ■ {}", series.country)).color(color));
                }
                ui.add_space(6.0);
            }
        });
    clicked
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Dataset label and source file.
pub fn top_bar(ui: &mut Ui, label: &str, source: &str) {
    ui.horizontal(|ui: &mut Ui| {
        ui.strong(label);
        ui.separator();
        ui.label(source);
    });
}
