mod analysis;
mod app;
mod codec;
mod config;
mod event;
mod history;
mod session;
mod theme;
mod ui;

use analysis::GeminiClient;
use app::StyleScopeApp;
use config::AppConfig;
use eframe::egui;
use history::{FileStore, HistoryStore, KeyValueStore, MemoryStore};
use session::{Session, SimulatedVerifier};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("stylescope=info")),
        )
        .init();

    let config = AppConfig::from_env()?;
    info!(
        model = %config.gemini.model,
        data_dir = %config.data_dir.display(),
        "starting StyleScope AI"
    );

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .thread_name("stylescope-runtime")
        .build()?;

    let analyzer = Arc::new(GeminiClient::new(config.gemini.clone())?);
    let storage: Box<dyn KeyValueStore> = match std::fs::create_dir_all(&config.data_dir) {
        Ok(()) => Box::new(FileStore::new(config.data_dir.clone())),
        Err(err) => {
            warn!(
                data_dir = %config.data_dir.display(),
                "history storage unavailable, keeping it in memory: {err}"
            );
            Box::new(MemoryStore::new())
        }
    };
    let history = HistoryStore::new(storage);
    let session = Session::new(Box::new(SimulatedVerifier), history);
    let app = StyleScopeApp::new(runtime.handle().clone(), analyzer, session);
    let _runtime = runtime;

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 800.0])
            .with_min_inner_size([720.0, 560.0])
            .with_drag_and_drop(true),
        ..Default::default()
    };

    eframe::run_native(
        ui::APP_TITLE,
        native_options,
        Box::new(move |_creation_context| Ok(Box::new(app))),
    )?;

    Ok(())
}
