use eframe::egui;

use crate::state::AppState;
use crate::ui::{panels, plot, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct ChartViewerApp {
    pub state: AppState,
}

impl eframe::App for ChartViewerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: plot settings ----
        egui::SidePanel::left("plot_settings")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Bottom panel: data preview ----
        if self.state.table.is_some() {
            egui::TopBottomPanel::bottom("data_preview")
                .default_height(220.0)
                .resizable(true)
                .show(ctx, |ui| {
                    table::data_preview(ui, &self.state);
                });
        }

        // ---- Central panel: chart ----
        egui::CentralPanel::default().show(ctx, |ui| {
            plot::chart_view(ui, &self.state);
        });
    }
}
