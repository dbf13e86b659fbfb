//! Push/pull orchestration
//!
//! Planning resolves and validates the backup folder, picks the saves and
//! turns them into copy tasks. Nothing is written until every check passed.
//! Execution then runs the tasks in order, or on the rayon pool when asked.

use rayon::prelude::*;
use std::fs;
use std::path::{Component, Path, PathBuf};

use super::copier::{CopyStats, copy_tree};
use super::error::{ConfigurationError, SyncError};
use super::selection::{SaveSelection, select};
use super::{CopyTask, SyncOptions, SyncReport, SyncRequest, SyncWarning, SyncedSaves};
use crate::config::SyncConfig;

/// The validated work for one sync
#[derive(Debug, Clone)]
pub struct SyncPlan {
    pub backup_path: PathBuf,
    pub selection: SaveSelection,
    pub tasks: Vec<CopyTask>,
    pub warnings: Vec<SyncWarning>,
}

/// Resolve the backup folder: the command line wins over the config file
pub fn resolve_backup_path(
    explicit: Option<&Path>,
    config: Option<&SyncConfig>,
) -> Result<PathBuf, ConfigurationError> {
    if let Some(path) = explicit {
        if !path.as_os_str().is_empty() {
            return Ok(path.to_path_buf());
        }
    }

    if let Some(path) = config.and_then(|config| config.path.as_deref()) {
        if !path.as_os_str().is_empty() {
            return Ok(path.to_path_buf());
        }
    }

    Err(ConfigurationError::MissingBackupPath)
}

/// Validate the request and work out what to copy
pub fn plan(request: &SyncRequest) -> Result<SyncPlan, SyncError> {
    let backup_path = resolve_backup_path(request.backup_path.as_deref(), request.config.as_ref())?;

    if !backup_path.is_dir() {
        return Err(ConfigurationError::BackupNotFound(backup_path).into());
    }

    let (source_root, destination_root) = request
        .direction
        .source_and_destination(&request.local_saves, &backup_path);

    let config_saves = request
        .config
        .as_ref()
        .and_then(|config| config.saves.as_deref());
    let selection = select(request.save_override.as_deref(), config_saves);

    let mut tasks = Vec::new();
    let mut warnings = Vec::new();

    match &selection {
        SaveSelection::All => {
            ensure_not_nested(source_root, destination_root)?;
            tasks.push(CopyTask {
                save: None,
                source: source_root.to_path_buf(),
                destination: destination_root.to_path_buf(),
            });
        }
        SaveSelection::Named(names) => {
            for name in names {
                if !is_plain_name(name) {
                    tracing::warn!("Rejecting save name {:?}", name);
                    warnings.push(SyncWarning::InvalidSaveName { name: name.clone() });
                    continue;
                }

                let source = source_root.join(name);
                if !source.is_dir() {
                    tracing::debug!("Save {} not found at {}", name, source.display());
                    warnings.push(SyncWarning::MissingSave {
                        name: name.clone(),
                        source,
                    });
                    continue;
                }

                // Only this save's own folders matter, the roots may nest
                let destination = destination_root.join(name);
                ensure_not_nested(&source, &destination)?;

                tasks.push(CopyTask {
                    save: Some(name.clone()),
                    source,
                    destination,
                });
            }
        }
    }

    Ok(SyncPlan {
        backup_path,
        selection,
        tasks,
        warnings,
    })
}

/// Plan and run a sync
pub fn execute(request: &SyncRequest, options: SyncOptions) -> Result<SyncReport, SyncError> {
    let plan = plan(request)?;

    tracing::info!(
        "{} {} task(s) between {} and {}",
        request.direction.verb(),
        plan.tasks.len(),
        request.local_saves.display(),
        plan.backup_path.display()
    );

    let stats = if options.dry_run {
        CopyStats::default()
    } else if options.parallel {
        run_parallel(&plan.tasks)?
    } else {
        run_sequential(&plan.tasks)?
    };

    let synced = match plan.selection {
        SaveSelection::All => SyncedSaves::All,
        SaveSelection::Named(_) => {
            SyncedSaves::Named(plan.tasks.iter().filter_map(|task| task.save.clone()).collect())
        }
    };

    Ok(SyncReport {
        direction: request.direction,
        backup_path: plan.backup_path,
        local_saves: request.local_saves.clone(),
        synced,
        warnings: plan.warnings,
        stats,
        dry_run: options.dry_run,
    })
}

fn run_task(task: &CopyTask) -> Result<CopyStats, SyncError> {
    tracing::info!("Syncing {}", task.label());
    copy_tree(&task.source, &task.destination).map_err(|source| SyncError::Copy {
        target: task.label().to_string(),
        source,
    })
}

/// Stops at the first failure; later tasks are not started
fn run_sequential(tasks: &[CopyTask]) -> Result<CopyStats, SyncError> {
    let mut stats = CopyStats::default();
    for task in tasks {
        stats += run_task(task)?;
    }
    Ok(stats)
}

/// Every task runs; the first failure in task order is reported
fn run_parallel(tasks: &[CopyTask]) -> Result<CopyStats, SyncError> {
    let mut results: Vec<(usize, Result<CopyStats, SyncError>)> = lanes(tasks)
        .par_iter()
        .flat_map_iter(|lane| lane.iter().map(move |&index| (index, run_task(&tasks[index]))))
        .collect();
    results.sort_by_key(|(index, _)| *index);

    let mut stats = CopyStats::default();
    for (_, result) in results {
        stats += result?;
    }
    Ok(stats)
}

/// Group task indices by destination, keeping task order inside each group.
///
/// A save listed twice lands in one lane and is copied twice by the same
/// worker, so no two workers ever write the same files.
fn lanes(tasks: &[CopyTask]) -> Vec<Vec<usize>> {
    let mut lanes: Vec<Vec<usize>> = Vec::new();
    for (index, task) in tasks.iter().enumerate() {
        match lanes
            .iter_mut()
            .find(|lane| tasks[lane[0]].destination == task.destination)
        {
            Some(lane) => lane.push(index),
            None => lanes.push(vec![index]),
        }
    }
    lanes
}

/// A save name must be a single ordinary folder name
fn is_plain_name(name: &str) -> bool {
    let mut components = Path::new(name).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}

fn ensure_not_nested(source: &Path, destination: &Path) -> Result<(), ConfigurationError> {
    let canonical_source = canonicalize_existing(source);
    let canonical_destination = canonicalize_existing(destination);

    if canonical_destination.starts_with(&canonical_source) {
        return Err(ConfigurationError::DestinationInsideSource {
            from: source.to_path_buf(),
            to: destination.to_path_buf(),
        });
    }
    Ok(())
}

/// Canonicalize the deepest existing ancestor and re-append the rest.
///
/// Destinations usually do not exist yet, so a plain `canonicalize` would
/// leave them raw while the source comes back resolved.
fn canonicalize_existing(path: &Path) -> PathBuf {
    let mut missing = Vec::new();
    let mut current = path;

    loop {
        if let Ok(canonical) = fs::canonicalize(current) {
            return missing
                .iter()
                .rev()
                .fold(canonical, |resolved, part| resolved.join(part));
        }

        match (current.parent(), current.file_name()) {
            (Some(parent), Some(name)) => {
                missing.push(name);
                current = if parent.as_os_str().is_empty() {
                    Path::new(".")
                } else {
                    parent
                };
            }
            _ => return path.to_path_buf(),
        }
    }
}
