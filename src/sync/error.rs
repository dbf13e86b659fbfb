use std::path::PathBuf;
use thiserror::Error;

/// The sync cannot start with the given backup settings
#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("Backup path must be provided via --path option or in the config file.")]
    MissingBackupPath,
    #[error("Backup folder '{}' does not exist.", .0.display())]
    BackupNotFound(PathBuf),
    #[error(
        "Destination '{}' is inside source '{}'; the copy would walk into its own output.",
        .to.display(),
        .from.display()
    )]
    DestinationInsideSource { from: PathBuf, to: PathBuf },
}

/// Failures of a single tree copy
#[derive(Debug, Error)]
pub enum CopyError {
    #[error("Source directory not found: {}", .0.display())]
    DirectoryNotFound(PathBuf),
    #[error("Failed to read '{}': {source}", .path.display())]
    Walk {
        path: PathBuf,
        #[source]
        source: ignore::Error,
    },
    #[error("Failed to copy '{}' to '{}': {source}", .from.display(), .to.display())]
    Io {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Error)]
pub enum SyncError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
    #[error("Failed to sync {target}")]
    Copy {
        target: String,
        #[source]
        source: CopyError,
    },
}
