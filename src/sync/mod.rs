//! Save synchronization between the local saves folder and a backup folder
//!
//! [`selection`] decides which saves to copy, [`copier`] copies directory
//! trees, and [`orchestrator`] ties the two together for a push or pull.

pub mod copier;
pub mod error;
pub mod orchestrator;
pub mod selection;

#[cfg(test)]
mod tests;

use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::config::SyncConfig;

pub use copier::{CopyStats, copy_tree};
pub use error::{ConfigurationError, CopyError, SyncError};
pub use selection::{SaveSelection, select};

/// Which way saves flow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SyncDirection {
    /// Local saves → backup folder
    Push,
    /// Backup folder → local saves
    Pull,
}

impl SyncDirection {
    /// Returns `(source, destination)` roots for this direction
    pub fn source_and_destination<'a>(&self, local: &'a Path, backup: &'a Path) -> (&'a Path, &'a Path) {
        match self {
            SyncDirection::Push => (local, backup),
            SyncDirection::Pull => (backup, local),
        }
    }

    pub fn verb(&self) -> &'static str {
        match self {
            SyncDirection::Push => "Pushing",
            SyncDirection::Pull => "Pulling",
        }
    }
}

impl fmt::Display for SyncDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyncDirection::Push => write!(f, "push"),
            SyncDirection::Pull => write!(f, "pull"),
        }
    }
}

/// Inputs for one sync invocation
#[derive(Debug, Clone)]
pub struct SyncRequest {
    pub direction: SyncDirection,
    /// Backup folder from the command line; wins over `config.path`
    pub backup_path: Option<PathBuf>,
    /// Already-located local saves directory
    pub local_saves: PathBuf,
    pub config: Option<SyncConfig>,
    /// Single save from the command line; wins over `config.saves`
    pub save_override: Option<String>,
}

/// Execution switches that do not change what gets selected
#[derive(Debug, Clone, Copy, Default)]
pub struct SyncOptions {
    /// Copy named saves on the rayon pool
    pub parallel: bool,
    /// Plan only, touch nothing
    pub dry_run: bool,
}

/// One directory copy. `save` is `None` for the whole-tree copy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyTask {
    pub save: Option<String>,
    pub source: PathBuf,
    pub destination: PathBuf,
}

impl CopyTask {
    /// Name used in messages
    pub fn label(&self) -> &str {
        self.save.as_deref().unwrap_or("all saves")
    }
}

/// Non-fatal problems with individual saves
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SyncWarning {
    MissingSave { name: String, source: PathBuf },
    InvalidSaveName { name: String },
}

impl fmt::Display for SyncWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyncWarning::MissingSave { name, .. } => {
                write!(f, "Save folder '{}' not found at source. Skipping.", name)
            }
            SyncWarning::InvalidSaveName { name } => {
                write!(f, "Save name '{}' is not a plain folder name. Skipping.", name)
            }
        }
    }
}

/// What a sync copied
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SyncedSaves {
    All,
    Named(Vec<String>),
}

/// Result of a sync, for the CLI to display
#[derive(Debug, Clone, Serialize)]
pub struct SyncReport {
    pub direction: SyncDirection,
    pub backup_path: PathBuf,
    pub local_saves: PathBuf,
    pub synced: SyncedSaves,
    pub warnings: Vec<SyncWarning>,
    pub stats: CopyStats,
    pub dry_run: bool,
}
