mod app;
mod color;
mod data;
mod state;
mod ui;

use anyhow::{bail, Context, Result};
use app::LaunchLensApp;
use eframe::egui;
use state::AppState;

fn main() -> Result<()> {
    env_logger::init();

    // The dataset is loaded exactly once at startup; a missing or malformed
    // file is fatal.
    let Some(path) = std::env::args().nth(1) else {
        bail!("usage: launch-lens <launch-records.{{csv,json,parquet}}>");
    };
    let dataset = data::loader::load_file(std::path::Path::new(&path))
        .with_context(|| format!("loading launch records from {path}"))?;
    if dataset.is_empty() {
        log::warn!("Dataset {path} contains no launch records");
    }
    log::info!(
        "Loaded {} launch records across {} sites (payload {:.0}-{:.0} kg)",
        dataset.len(),
        dataset.sites.len(),
        dataset.payload_min,
        dataset.payload_max
    );

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Launch Lens – Launch Records Dashboard",
        options,
        Box::new(move |_cc| Ok(Box::new(LaunchLensApp::new(AppState::new(dataset))))),
    )
    .map_err(|e| anyhow::anyhow!("eframe: {e}"))
}
