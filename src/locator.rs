//! Finding the local Minecraft saves directory

use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LocatorError {
    #[error("Could not find the Minecraft saves directory.")]
    NotFound,
    #[error("Saves directory '{}' does not exist.", .0.display())]
    OverrideNotFound(PathBuf),
}

/// Locate the saves directory.
///
/// An explicit directory (from `--saves-dir` or `MLSS_SAVES_DIR`) is used as
/// is and must exist. Otherwise the platform's default launcher locations are
/// tried in order.
pub fn locate_saves_dir(override_dir: Option<&Path>) -> Result<PathBuf, LocatorError> {
    if let Some(dir) = override_dir {
        if dir.is_dir() {
            return Ok(dir.to_path_buf());
        }
        return Err(LocatorError::OverrideNotFound(dir.to_path_buf()));
    }

    let candidates = default_candidates();
    for candidate in &candidates {
        tracing::debug!("Looking for saves in {}", candidate.display());
        if candidate.is_dir() {
            return Ok(candidate.clone());
        }
    }

    Err(LocatorError::NotFound)
}

/// Default launcher locations for this platform, most likely first
pub fn default_candidates() -> Vec<PathBuf> {
    let mut candidates = Vec::new();

    if cfg!(windows) {
        // %APPDATA%\.minecraft\saves
        if let Some(roaming) = dirs::data_dir() {
            candidates.push(roaming.join(".minecraft").join("saves"));
        }
    } else if cfg!(target_os = "macos") {
        if let Some(support) = dirs::data_dir() {
            candidates.push(support.join("minecraft").join("saves"));
        }
    } else {
        if let Some(home) = dirs::home_dir() {
            candidates.push(home.join(".minecraft").join("saves"));
        }
        if let Some(config) = dirs::config_dir() {
            candidates.push(config.join(".minecraft").join("saves"));
        }
    }

    candidates
}
