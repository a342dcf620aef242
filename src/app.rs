use eframe::egui;

use crate::config::DashConfig;
use crate::data::model::LaunchDataset;
use crate::state::AppState;
use crate::ui::{panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct LaunchDashApp {
    pub state: AppState,
    config: DashConfig,
}

impl LaunchDashApp {
    pub fn new(dataset: LaunchDataset, config: DashConfig) -> Self {
        Self {
            state: AppState::new(dataset),
            config,
        }
    }
}

impl eframe::App for LaunchDashApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: title + counts ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &self.state);
        });

        // ---- Left side panel: filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(self.config.side_panel_width)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Right side panel: filtered launches ----
        egui::SidePanel::right("records_panel")
            .default_width(340.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::records_table(ui, &self.state);
            });

        // ---- Central panel: pie + strip chart ----
        egui::CentralPanel::default().show(ctx, |ui| {
            plot::success_pie(ui, &self.state, self.config.pie_height);
            ui.separator();
            plot::correlation_strip(ui, &self.state);
        });
    }
}
