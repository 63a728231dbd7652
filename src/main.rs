// src/main.rs
mod gui;
use std::path::PathBuf;
use anyhow::{anyhow, Result};
use eframe::egui;
use ecgsim::{fixtures, AppConfig};
fn main() -> Result<()> {
    env_logger::init();
    let config_path = std::env::args_os().nth(1).map(PathBuf::from);
    let config = AppConfig::load_or_default(config_path.as_deref())?;
    let sources = fixtures::build_catalog(&config)?;
    let app = gui::EcgSimApp::new(&config, sources)?;
    let viewport = egui::ViewportBuilder::default()
        .with_inner_size([1280.0, 760.0])
        .with_min_inner_size([900.0, 520.0])
        .with_title("ecgsim");
    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };
    eframe::run_native("ecgsim", options, Box::new(move |_cc| Box::new(app)))
        .map_err(|err| anyhow!("viewer exited with error: {err}"))
}
