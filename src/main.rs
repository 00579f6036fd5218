use std::path::PathBuf;

use clap::Parser;
use eframe::egui;
use exoplanet_explorer::app::ExplorerApp;
use exoplanet_explorer::config::AppConfig;
use exoplanet_explorer::state::AppState;

/// Browse exoplanet catalogs and their habitability scores.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Catalog to open at start-up (CSV, JSON or Parquet).
    catalog: Option<PathBuf>,

    /// Settings file; defaults to `exoplanet-explorer.toml` when present.
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> eframe::Result {
    env_logger::init();
    let cli = Cli::parse();

    let config = match AppConfig::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            log::error!("Ignoring configuration: {e:#}");
            AppConfig::default()
        }
    };

    let mut state = AppState::new(config);
    if let Some(path) = cli.catalog.or_else(|| state.config.catalog.clone()) {
        match state.open_any(&path) {
            Ok(()) => log::info!("Opened {}", path.display()),
            Err(e) => state.report_error("Failed to open catalog", &e),
        }
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 860.0])
            .with_min_inner_size([720.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Exoplanet Explorer",
        options,
        Box::new(|_cc| Ok(Box::new(ExplorerApp::new(state)))),
    )
}
