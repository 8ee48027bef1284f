use std::{
    fs::File,
    io::{BufReader, BufWriter, Read},
    path::Path,
};

use awc::Client;
use chrono::Local;
use tracing::{error, info};
use uuid::Uuid;

use crate::error::FolioError;
use crate::types::ContentSnapshot;

/// Marks a snapshot as a new revision.
pub fn stamp(mut snapshot: ContentSnapshot) -> ContentSnapshot {
    snapshot.revision = Uuid::new_v4();
    snapshot.updated_at = Local::now().format("%Y-%m-%d %H:%M:%S %z").to_string();
    snapshot
}

pub fn load_from_storage(path: impl AsRef<Path>) -> Result<ContentSnapshot, FolioError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|error| {
        error!("Error opening snapshot file {}: {}", path.display(), error);
        error
    })?;
    let mut buffer: Vec<u8> = Vec::new();
    let size = BufReader::new(file).read_to_end(&mut buffer)?;
    info!("Local snapshot size: {}", size);
    let snapshot = serde_json::from_slice::<ContentSnapshot>(&buffer).map_err(|error| {
        error!("Local snapshot structure is incorrect: {}", error);
        error
    })?;
    info!(
        "Loaded snapshot {} ({} projects, {} pages)",
        snapshot.revision,
        snapshot.projects.len(),
        snapshot.pages.len()
    );
    Ok(snapshot)
}

pub async fn load_from_cdn(remote_url: &str) -> Result<ContentSnapshot, FolioError> {
    let client = Client::default();
    let mut response = client
        .get(remote_url)
        .send()
        .await
        .map_err(|error| FolioError::Cdn(format!("failed to connect to {}: {}", remote_url, error)))?;
    if !response.status().is_success() {
        return Err(FolioError::Cdn(format!(
            "{} answered {}",
            remote_url,
            response.status()
        )));
    }
    let body = response
        .body()
        .limit(16 * 1024 * 1024)
        .await
        .map_err(|error| FolioError::Cdn(format!("failed to read body: {}", error)))?;
    info!("Remote snapshot size: {}", body.len());
    let snapshot = serde_json::from_slice::<ContentSnapshot>(&body)?;
    Ok(stamp(snapshot))
}

pub fn write_local_db(path: impl AsRef<Path>, snapshot: &ContentSnapshot) -> Result<(), FolioError> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(writer, snapshot)?;
    info!("Wrote snapshot {} to {}", snapshot.revision, path.display());
    Ok(())
}
