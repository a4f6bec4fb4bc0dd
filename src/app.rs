use eframe::egui;

use crate::config::Config;
use crate::state::AppState;
use crate::ui::{panels, report};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct VehicleExplorerApp {
    pub state: AppState,
}

impl VehicleExplorerApp {
    /// Build the app and run the pipeline once for the default selection.
    pub fn new(config: &Config) -> Self {
        let mut state = AppState::new(config.data_path.clone());
        state.refresh();
        Self { state }
    }
}

impl eframe::App for VehicleExplorerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: toolbar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: data filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(220.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: stats, table, charts ----
        egui::CentralPanel::default().show(ctx, |ui| {
            report::central_page(ui, &mut self.state);
        });
    }
}
