use std::{env, io::ErrorKind};

use actix_web::web;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use folio_nav::{
    core::{
        data::{load_from_cdn, load_from_storage, write_local_db},
        settings::{Settings, DEFAULT_SETTINGS_PATH},
    },
    error::FolioError,
    server::{start_server, AppState},
    types::ContentSnapshot,
};

fn load_settings() -> Settings {
    let path = env::var("FOLIO_SETTINGS").unwrap_or_else(|_| DEFAULT_SETTINGS_PATH.to_string());
    match Settings::load(&path) {
        Ok(settings) => {
            info!("Loaded settings from {}", path);
            settings
        }
        Err(FolioError::Io(error)) if error.kind() == ErrorKind::NotFound => {
            warn!("No settings file at {}, using defaults", path);
            Settings::new()
        }
        Err(error) => {
            error!("Settings load error: {}, using defaults", error);
            Settings::new()
        }
    }
}

async fn load_snapshot(settings: &Settings) -> ContentSnapshot {
    let path = settings.snapshot_path();
    if let Ok(snapshot) = load_from_storage(&path) {
        return snapshot;
    }
    info!("Fetching snapshot from {}", settings.remote_url.value);
    match load_from_cdn(&settings.remote_url.value).await {
        Ok(snapshot) => {
            if let Err(error) = write_local_db(&path, &snapshot) {
                warn!("Could not cache snapshot locally: {}", error);
            }
            snapshot
        }
        Err(error) => {
            error!("{}; serving an empty snapshot", error);
            ContentSnapshot::empty()
        }
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    let settings = load_settings();
    let snapshot = load_snapshot(&settings).await;
    let state = web::Data::new(AppState::new(settings, snapshot));
    start_server(state).await
}
