//! Water Consumption Tracker - desktop entry point.

use anyhow::Context;
use eframe::egui;
use tracing_subscriber::EnvFilter;
use water_tracker::gui::TrackerApp;
use water_tracker::AppConfig;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = AppConfig::load_or_default(AppConfig::DEFAULT_FILE);
    tracing::info!(mode = %config.default_mode, policy = ?config.mode_policy, "starting");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(config.window_size)
            .with_min_inner_size([900.0, 600.0])
            .with_title("Water Consumption Tracker"),
        ..Default::default()
    };

    eframe::run_native(
        "Water Consumption Tracker",
        options,
        Box::new(move |cc| Ok(Box::new(TrackerApp::new(cc, config)))),
    )
    .map_err(|e| anyhow::anyhow!("{e}"))
    .context("failed to run the tracker window")
}
