mod app;
mod calibration;
mod config;
mod error;
mod geometry;
mod image;
mod measure;
mod session;
mod shapes;

use app::FloorcalApp;
use config::AppConfig;
use std::path::PathBuf;

fn main() -> eframe::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let initial_image_path: Option<PathBuf> = std::env::args_os().nth(1).map(PathBuf::from);
    let config = AppConfig::load();
    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([800.0, 600.0])
            .with_drag_and_drop(true),
        ..Default::default()
    };
    eframe::run_native(
        "Floorcal — Floorplan Measurement",
        native_options,
        Box::new(move |_cc| {
            Ok(Box::new(FloorcalApp::new(
                config,
                initial_image_path.as_deref(),
            )))
        }),
    )
}
