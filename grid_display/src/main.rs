// main.rs - Windowed Conway's Game of Life driven by the conway engine

use anyhow::{Result, anyhow};
use eframe::egui;
use tracing::info;

mod config;
mod ui;
mod viewport;

use config::AppConfig;
use ui::LifeApp;

fn main() -> Result<()> {
    init_tracing();

    let config = AppConfig::load()?;
    let [width, height] = config.display.window_size;
    let app = LifeApp::new(config)?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([width, height]),
        ..Default::default()
    };

    info!(width, height, "Opening Conway's Game of Life window");
    eframe::run_native(
        "Conway's Game of Life",
        options,
        Box::new(|_cc| Box::new(app)),
    )
    .map_err(|err| anyhow!("window loop failed: {err}"))
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}
