//! Recursive directory copy
//!
//! Walks the source tree iteratively in file-name order and mirrors it under
//! the destination. Existing destination files are overwritten; files that
//! only exist at the destination are left alone. Symlinks are never followed:
//! they are skipped and counted, so a link cycle cannot make the walk loop.
//!
//! Each file copy is atomic on its own, the tree as a whole is not. An error
//! part way through leaves whatever was already copied in place.

use ignore::WalkBuilder;
use serde::Serialize;
use std::fs;
use std::ops::AddAssign;
use std::path::Path;

use super::error::CopyError;

/// Counters for one or more tree copies
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CopyStats {
    pub files: u64,
    pub directories: u64,
    pub bytes: u64,
    pub skipped_links: u64,
}

impl AddAssign for CopyStats {
    fn add_assign(&mut self, other: Self) {
        self.files += other.files;
        self.directories += other.directories;
        self.bytes += other.bytes;
        self.skipped_links += other.skipped_links;
    }
}

/// Copy everything under `source` into `destination`, creating it if needed
pub fn copy_tree(source: &Path, destination: &Path) -> Result<CopyStats, CopyError> {
    if !source.is_dir() {
        return Err(CopyError::DirectoryNotFound(source.to_path_buf()));
    }

    tracing::debug!("Copying {} -> {}", source.display(), destination.display());
    create_dir(source, destination)?;

    let mut stats = CopyStats::default();

    // Standard filters off: hidden and gitignored files are save data too
    let walker = WalkBuilder::new(source)
        .standard_filters(false)
        .follow_links(false)
        .sort_by_file_name(|a, b| a.cmp(b))
        .build();

    for entry in walker {
        let entry = entry.map_err(|e| CopyError::Walk {
            path: source.to_path_buf(),
            source: e,
        })?;

        // The root may itself be a link to the saves folder, so only its children are checked
        if entry.depth() == 0 {
            continue;
        }

        let Ok(relative) = entry.path().strip_prefix(source) else {
            continue;
        };
        let target = destination.join(relative);

        let Some(file_type) = entry.file_type() else {
            continue;
        };

        if file_type.is_symlink() {
            tracing::warn!("Skipping symlink {}", entry.path().display());
            stats.skipped_links += 1;
        } else if file_type.is_dir() {
            create_dir(entry.path(), &target)?;
            stats.directories += 1;
        } else if file_type.is_file() {
            let bytes = fs::copy(entry.path(), &target).map_err(|e| CopyError::Io {
                from: entry.path().to_path_buf(),
                to: target.clone(),
                source: e,
            })?;
            tracing::trace!("Copied {} ({} bytes)", relative.display(), bytes);
            stats.files += 1;
            stats.bytes += bytes;
        } else {
            tracing::debug!("Skipping special file {}", entry.path().display());
        }
    }

    Ok(stats)
}

fn create_dir(from: &Path, to: &Path) -> Result<(), CopyError> {
    fs::create_dir_all(to).map_err(|e| CopyError::Io {
        from: from.to_path_buf(),
        to: to.to_path_buf(),
        source: e,
    })
}
