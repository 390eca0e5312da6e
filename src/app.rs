use eframe::egui;

use crate::config::DashboardConfig;
use crate::data::loader;
use crate::state::AppState;
use crate::ui::{panels, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct CurriculumApp {
    pub state: AppState,
}

impl CurriculumApp {
    /// Load the dataset (once per process) and build the initial state.
    pub fn new(config: DashboardConfig) -> Self {
        let dataset = loader::load_cached(&config.data_file);
        Self {
            state: AppState::new(config, dataset),
        }
    }
}

impl eframe::App for CurriculumApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.state.dataset().is_none() {
            egui::CentralPanel::default().show(ctx, |ui| {
                table::load_error(ui, &self.state);
            });
            return;
        }

        // ---- Bottom panel: status line ----
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            panels::status_bar(ui, &self.state);
        });

        // ---- Left side panel: filters and export ----
        egui::SidePanel::left("filter_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: metrics, search, table ----
        egui::CentralPanel::default().show(ctx, |ui| {
            table::dashboard(ui, &mut self.state);
        });
    }
}
