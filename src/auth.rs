use std::{fs, path::Path};

use tracing::{info, warn};

use crate::error::FolioError;

pub fn get_local_passkey(path: impl AsRef<Path>) -> Result<String, FolioError> {
    let path = path.as_ref();
    let key = fs::read_to_string(path).map_err(|error| {
        warn!("Could not read key file {}: {}", path.display(), error);
        error
    })?;
    Ok(key.trim().to_string())
}

/// Compares a bearer token against the local passkey. A missing or empty
/// passkey rejects every token.
pub fn check_auth(remote_key: &str, passkey_path: impl AsRef<Path>) -> Result<(), FolioError> {
    let local_key = get_local_passkey(passkey_path).map_err(|_| FolioError::Unauthorized)?;
    if !local_key.is_empty() && local_key == remote_key.trim() {
        info!("Accepted snapshot upload token");
        Ok(())
    } else {
        warn!("Failed to authorize: {}", FolioError::Unauthorized);
        Err(FolioError::Unauthorized)
    }
}
