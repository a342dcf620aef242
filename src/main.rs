mod app;
mod color;
mod config;
mod data;
mod state;
mod ui;

use anyhow::Result;
use app::LaunchDashApp;
use config::DashConfig;
use eframe::egui;

fn main() -> Result<()> {
    env_logger::init();

    let config = DashConfig::default();

    // The dataset is read once; without it there is nothing to show.
    let dataset = data::loader::load_file(&config.dataset_path)
        .inspect_err(|e| log::error!("Failed to load dataset: {e:#}"))?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(config.window_title.as_str())
            .with_inner_size(config.inner_size)
            .with_min_inner_size(config.min_inner_size),
        ..Default::default()
    };

    let app_name = config.window_title.clone();
    eframe::run_native(
        &app_name,
        options,
        Box::new(move |_cc| Ok(Box::new(LaunchDashApp::new(dataset, config)))),
    )
    .map_err(|e| anyhow::anyhow!("running dashboard: {e}"))
}
