//! Configuration loading for mlss
//!
//! The config file is optional. It names a default backup folder and the
//! saves to sync:
//!
//! ```yaml
//! path: /mnt/cloud/minecraft
//! saves:
//!   - World1
//!   - World2
//! ```
//!
//! YAML is the default format; files ending in `.toml` or `.json` are parsed
//! as TOML or JSON instead. Unknown keys are ignored.

use figment::Figment;
use figment::providers::{Format, Json, Toml, Yaml};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;


/// Sync configuration as read from the config file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncConfig {
    /// Default backup folder, used when `--path` is not given
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,

    /// Save folder names to sync, in order
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub saves: Option<Vec<String>>,
}

/// The config file exists but could not be read or parsed
#[derive(Debug, Error)]
#[error("Error reading or parsing config file '{}': {message}", .path.display())]
pub struct ConfigParseError {
    pub path: PathBuf,
    pub message: String,
}

impl ConfigParseError {
    fn new(path: &Path, message: impl ToString) -> Self {
        Self {
            path: path.to_path_buf(),
            message: message.to_string(),
        }
    }
}

/// Supported config file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Json,
    Toml,
    Yaml,
}

impl ConfigFormat {
    /// Pick the format from the file extension, falling back to YAML
    pub fn from_path(path: &Path) -> Self {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase());

        match extension.as_deref() {
            Some("json") => ConfigFormat::Json,
            Some("toml") => ConfigFormat::Toml,
            _ => ConfigFormat::Yaml,
        }
    }

    fn figment(self, content: &str) -> Figment {
        match self {
            ConfigFormat::Json => Figment::from(Json::string(content)),
            ConfigFormat::Toml => Figment::from(Toml::string(content)),
            ConfigFormat::Yaml => Figment::from(Yaml::string(content)),
        }
    }
}

/// Load the config file at `path`.
///
/// Returns `Ok(None)` when no path is given, when nothing exists at the path,
/// or when the file is empty. Callers then fall back to command-line values.
pub fn load(path: Option<&Path>) -> Result<Option<SyncConfig>, ConfigParseError> {
    let Some(path) = path else {
        return Ok(None);
    };

    if !path.is_file() {
        tracing::debug!("Config file {} not found, continuing without it", path.display());
        return Ok(None);
    }

    let content = fs::read_to_string(path).map_err(|e| ConfigParseError::new(path, e))?;
    if content.trim().is_empty() {
        tracing::debug!("Config file {} is empty", path.display());
        return Ok(None);
    }

    let format = ConfigFormat::from_path(path);
    let config: SyncConfig = format
        .figment(&content)
        .extract()
        .map_err(|e| ConfigParseError::new(path, e))?;

    tracing::info!("Loaded {:?} config from {}", format, path.display());
    Ok(Some(config.normalized()))
}

impl SyncConfig {
    /// Trim save names, drop blank entries and treat a blank path as unset
    fn normalized(self) -> Self {
        let path = self
            .path
            .filter(|path| !path.as_os_str().to_string_lossy().trim().is_empty());

        let saves = self.saves.map(|saves| {
            saves
                .into_iter()
                .filter_map(|save| {
                    let trimmed = save.trim();
                    if trimmed.is_empty() {
                        tracing::warn!("Ignoring blank save name in config");
                        None
                    } else {
                        Some(trimmed.to_string())
                    }
                })
                .collect()
        });

        Self { path, saves }
    }

    /// Render the config in the given format
    pub fn render(&self, format: ConfigFormat) -> anyhow::Result<String> {
        let output = match format {
            ConfigFormat::Json => serde_json::to_string_pretty(self)?,
            ConfigFormat::Toml => toml::to_string_pretty(self)?,
            ConfigFormat::Yaml => serde_yml::to_string(self)?,
        };
        Ok(output)
    }
}
