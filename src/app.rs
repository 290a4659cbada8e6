use eframe::egui;

use crate::ui::plot::{self, Chart};
use crate::ui::panels;

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

/// Shows the charts collected during the terminal session.
pub struct EmissionsApp {
    label: String,
    source: String,
    charts: Vec<Chart>,
    selected: usize,
}

impl EmissionsApp {
    pub fn new(label: String, source: String, charts: Vec<Chart>) -> Self {
        Self {
            label,
            source,
            charts,
            selected: 0,
        }
    }
}

impl eframe::App for EmissionsApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: dataset info ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &self.label, &self.source);
        });

        // ---- Left side panel: chart list ----
        egui::SidePanel::left("chart_panel")
            .default_width(200.0)
            .resizable(true)
            .show(ctx, |ui| {
                if let Some(i) = panels::side_panel(ui, &self.charts, self.selected) {
                    self.selected = i;
                }
            });

        // ---- Central panel: plot ----
        egui::CentralPanel::default().show(ctx, |ui| {
            if let Some(chart) = self.charts.get(self.selected) {
                plot::emissions_plot(ui, chart, self.selected);
            }
        });
    }
}
