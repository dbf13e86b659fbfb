//! # mlss - Minecraft Local Save Sync
//!
//! Copies Minecraft save folders between the local game directory and a backup
//! location of your choice (a cloud-synced folder, a network drive, a USB stick).
//!
//! ## Quick Start
//!
//! ```bash
//! # Push every local save to the backup folder
//! mlss push --path ~/Dropbox/minecraft
//!
//! # Pull a single world back
//! mlss pull --path ~/Dropbox/minecraft --save "My World"
//!
//! # Use a config file for the backup path and the saves to sync
//! mlss --config mlss.yaml push
//! ```
//!
//! ## Configuration
//!
//! ```yaml
//! path: /home/me/Dropbox/minecraft
//! saves:
//!   - World1
//!   - Creative Build
//! ```
//!
//! A `--save` on the command line always wins over the `saves` list, and
//! `--path` always wins over `path`. With no saves configured the whole saves
//! directory is copied.
//!
//! ## Library Usage
//!
//! ```rust,no_run
//! use mlss::sync::{SyncDirection, SyncOptions, SyncRequest, orchestrator};
//! use std::path::PathBuf;
//!
//! let request = SyncRequest {
//!     direction: SyncDirection::Push,
//!     backup_path: Some(PathBuf::from("/mnt/backup")),
//!     local_saves: mlss::locator::locate_saves_dir(None)?,
//!     config: mlss::config::load(None)?,
//!     save_override: None,
//! };
//! let report = orchestrator::execute(&request, SyncOptions::default())?;
//! println!("{} warnings", report.warnings.len());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod cli;
pub mod config;
pub mod locator;
pub mod sync;

pub use cli::{Cli, Output};
pub use config::SyncConfig;
