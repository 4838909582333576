mod app;
mod color;
mod data;
mod state;
mod ui;

use std::path::PathBuf;

use app::ImpactDashApp;
use eframe::egui;

/// Default workbook location, relative to the working directory. A single
/// positional argument overrides it.
const DEFAULT_DATA_FILE: &str = "data/Master Data set v13 - Form - 20250731.xlsx";

fn main() -> eframe::Result {
    env_logger::init();

    let data_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_FILE));

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 860.0])
            .with_min_inner_size([700.0, 450.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Sewa Connect – Impact Dashboard",
        options,
        Box::new(|_cc| Ok(Box::new(ImpactDashApp::new(data_path)))),
    )
}
