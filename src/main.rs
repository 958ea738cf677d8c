mod app;
mod color;
mod data;
mod predict;
mod state;
mod stats;
mod ui;

use app::InferboardApp;
use eframe::egui;

fn main() -> eframe::Result {
    env_logger::init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 780.0])
            .with_min_inner_size([640.0, 420.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Inferboard – Dataset Explorer",
        options,
        Box::new(|_cc| Ok(Box::new(InferboardApp::default()))),
    )
}
