//! wayanad-desk - desktop client for the Wayanad disaster-management database
//!
//! Usage:
//!   wayanad-desk [--config wayanad.yaml] [--database-url mysql://user:pw@host/db]

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use eframe::egui;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;
use wayanad_dm::{AppConfig, MySqlStore, RecordStore};
use wayanad_ui::WayanadApp;

#[derive(Parser, Debug)]
#[command(name = "wayanad-desk")]
#[command(about = "Record managers and table viewer for the Wayanad disaster database")]
struct Args {
    /// YAML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// MySQL connection URL; overrides the configuration file and the
    /// WAYANAD_DATABASE_URL / DATABASE_URL environment variables
    #[arg(long)]
    database_url: Option<String>,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => AppConfig::from_yaml_file(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => AppConfig::from_env(),
    };
    if let Some(url) = args.database_url {
        config = config.with_database_url(url);
    }

    info!("Starting Wayanad DM ({})", config.database.masked_url());

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("building tokio runtime")?;
    let store: Arc<dyn RecordStore> = Arc::new(MySqlStore::new(config.database.clone()));

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Wayanad Disaster Management System")
            .with_inner_size([config.window.width, config.window.height])
            .with_min_inner_size([900.0, 600.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Wayanad Disaster Management System",
        native_options,
        Box::new(move |cc| {
            Ok(Box::new(WayanadApp::new(cc, store, runtime)) as Box<dyn eframe::App>)
        }),
    )
    .map_err(|e| anyhow!("eframe error: {}", e))
}
