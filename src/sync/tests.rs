//! End-to-end sync tests against temporary save folders

use super::*;
use std::fs;
use tempfile::TempDir;

struct Fixture {
    _root: TempDir,
    saves: PathBuf,
    backup: PathBuf,
}

impl Fixture {
    fn new() -> Self {
        let root = TempDir::new().unwrap();
        let saves = root.path().join(".minecraft").join("saves");
        let backup = root.path().join("backup");
        fs::create_dir_all(&saves).unwrap();
        fs::create_dir_all(&backup).unwrap();
        Self {
            _root: root,
            saves,
            backup,
        }
    }

    fn request(&self, direction: SyncDirection) -> SyncRequest {
        SyncRequest {
            direction,
            backup_path: Some(self.backup.clone()),
            local_saves: self.saves.clone(),
            config: None,
            save_override: None,
        }
    }
}

fn create_save(root: &Path, name: &str, content: &str) {
    let dir = root.join(name);
    fs::create_dir_all(dir.join("region")).unwrap();
    fs::write(dir.join("level.dat"), content).unwrap();
    fs::write(dir.join("region").join("r.0.0.mca"), format!("{content}-region")).unwrap();
}

fn saves_config(saves: &[&str]) -> SyncConfig {
    SyncConfig {
        path: None,
        saves: Some(saves.iter().map(|s| s.to_string()).collect()),
    }
}

#[test]
fn test_push_all_copies_everything() {
    let fx = Fixture::new();
    create_save(&fx.saves, "World1", "one");
    create_save(&fx.saves, "World2", "two");

    let report = orchestrator::execute(&fx.request(SyncDirection::Push), SyncOptions::default()).unwrap();

    assert_eq!(report.synced, SyncedSaves::All);
    assert!(report.warnings.is_empty());
    assert_eq!(fs::read_to_string(fx.backup.join("World1/level.dat")).unwrap(), "one");
    assert_eq!(
        fs::read_to_string(fx.backup.join("World2/region/r.0.0.mca")).unwrap(),
        "two-region"
    );
    assert_eq!(report.stats.files, 4);
}

#[test]
fn test_pull_all_overwrites_local() {
    let fx = Fixture::new();
    create_save(&fx.backup, "World1", "from-backup");
    create_save(&fx.saves, "World1", "stale");

    orchestrator::execute(&fx.request(SyncDirection::Pull), SyncOptions::default()).unwrap();

    assert_eq!(
        fs::read_to_string(fx.saves.join("World1/level.dat")).unwrap(),
        "from-backup"
    );
}

#[test]
fn test_pull_specific_saves_copies_only_listed() {
    let fx = Fixture::new();
    create_save(&fx.backup, "World1", "one");
    create_save(&fx.backup, "World2", "two");

    let mut request = fx.request(SyncDirection::Pull);
    request.config = Some(saves_config(&["World1"]));

    let report = orchestrator::execute(&request, SyncOptions::default()).unwrap();

    assert_eq!(report.synced, SyncedSaves::Named(vec!["World1".to_string()]));
    assert!(fx.saves.join("World1/level.dat").is_file());
    assert!(!fx.saves.join("World2").exists());
}

#[test]
fn test_push_config_saves_scenario() {
    let fx = Fixture::new();
    fs::create_dir_all(fx.saves.join("World1")).unwrap();
    fs::write(fx.saves.join("World1/level.dat"), "x").unwrap();
    create_save(&fx.saves, "World2", "two");

    let mut request = fx.request(SyncDirection::Push);
    request.config = Some(saves_config(&["World1"]));

    orchestrator::execute(&request, SyncOptions::default()).unwrap();

    assert_eq!(fs::read_to_string(fx.backup.join("World1/level.dat")).unwrap(), "x");
    assert!(!fx.backup.join("World2").exists());
}

#[test]
fn test_override_ignores_config_saves() {
    let fx = Fixture::new();
    for name in ["A", "B", "C"] {
        create_save(&fx.saves, name, name);
    }

    let mut request = fx.request(SyncDirection::Push);
    request.config = Some(saves_config(&["A", "B"]));
    request.save_override = Some(" C ".to_string());

    let report = orchestrator::execute(&request, SyncOptions::default()).unwrap();

    assert_eq!(report.synced, SyncedSaves::Named(vec!["C".to_string()]));
    assert!(fx.backup.join("C").is_dir());
    assert!(!fx.backup.join("A").exists());
    assert!(!fx.backup.join("B").exists());
}

#[test]
fn test_cli_path_wins_over_config_path() {
    let fx = Fixture::new();
    create_save(&fx.saves, "World1", "one");
    let other = fx.backup.parent().unwrap().join("other-backup");
    fs::create_dir_all(&other).unwrap();

    let mut request = fx.request(SyncDirection::Push);
    request.config = Some(SyncConfig {
        path: Some(other.clone()),
        saves: None,
    });

    let report = orchestrator::execute(&request, SyncOptions::default()).unwrap();

    assert_eq!(report.backup_path, fx.backup);
    assert!(fx.backup.join("World1").is_dir());
    assert!(!other.join("World1").exists());
}

#[test]
fn test_config_path_used_when_no_cli_path() {
    let fx = Fixture::new();
    create_save(&fx.saves, "World1", "one");

    let mut request = fx.request(SyncDirection::Push);
    request.backup_path = None;
    request.config = Some(SyncConfig {
        path: Some(fx.backup.clone()),
        saves: None,
    });

    orchestrator::execute(&request, SyncOptions::default()).unwrap();
    assert!(fx.backup.join("World1/level.dat").is_file());
}

#[test]
fn test_missing_backup_path_touches_nothing() {
    let fx = Fixture::new();
    create_save(&fx.saves, "World1", "one");

    let mut request = fx.request(SyncDirection::Push);
    request.backup_path = None;

    let err = orchestrator::execute(&request, SyncOptions::default()).unwrap_err();

    assert!(matches!(
        err,
        SyncError::Configuration(ConfigurationError::MissingBackupPath)
    ));
    assert_eq!(fs::read_dir(&fx.backup).unwrap().count(), 0);
}

#[test]
fn test_nonexistent_backup_folder_fails() {
    let fx = Fixture::new();
    create_save(&fx.saves, "World1", "one");
    let missing = fx.backup.join("does-not-exist");

    let mut request = fx.request(SyncDirection::Push);
    request.backup_path = Some(missing.clone());

    let err = orchestrator::execute(&request, SyncOptions::default()).unwrap_err();

    assert!(matches!(
        err,
        SyncError::Configuration(ConfigurationError::BackupNotFound(path)) if path == missing
    ));
    assert!(!missing.exists());
}

#[test]
fn test_missing_named_save_warns_and_continues() {
    let fx = Fixture::new();
    create_save(&fx.saves, "World1", "one");
    create_save(&fx.saves, "World3", "three");

    let mut request = fx.request(SyncDirection::Push);
    request.config = Some(saves_config(&["World1", "World2", "World3"]));

    let report = orchestrator::execute(&request, SyncOptions::default()).unwrap();

    assert_eq!(
        report.synced,
        SyncedSaves::Named(vec!["World1".to_string(), "World3".to_string()])
    );
    assert_eq!(
        report.warnings,
        vec![SyncWarning::MissingSave {
            name: "World2".to_string(),
            source: fx.saves.join("World2"),
        }]
    );
    assert!(fx.backup.join("World3/level.dat").is_file());
}

#[test]
fn test_invalid_save_names_are_skipped() {
    let fx = Fixture::new();
    create_save(&fx.saves, "World1", "one");

    let mut request = fx.request(SyncDirection::Push);
    request.config = Some(saves_config(&["..", "World1", "nested/World1"]));

    let report = orchestrator::execute(&request, SyncOptions::default()).unwrap();

    assert_eq!(report.synced, SyncedSaves::Named(vec!["World1".to_string()]));
    assert_eq!(
        report.warnings,
        vec![
            SyncWarning::InvalidSaveName { name: "..".to_string() },
            SyncWarning::InvalidSaveName { name: "nested/World1".to_string() },
        ]
    );
}

#[test]
fn test_backup_inside_saves_is_rejected_for_push() {
    let fx = Fixture::new();
    create_save(&fx.saves, "World1", "one");
    let nested = fx.saves.join("backup");
    fs::create_dir_all(&nested).unwrap();

    let mut request = fx.request(SyncDirection::Push);
    request.backup_path = Some(nested.clone());

    let err = orchestrator::execute(&request, SyncOptions::default()).unwrap_err();

    assert!(matches!(
        err,
        SyncError::Configuration(ConfigurationError::DestinationInsideSource { .. })
    ));
    assert_eq!(fs::read_dir(&nested).unwrap().count(), 0);
}

#[test]
fn test_same_folder_is_rejected() {
    let fx = Fixture::new();
    create_save(&fx.saves, "World1", "one");

    let mut request = fx.request(SyncDirection::Pull);
    request.backup_path = Some(fx.saves.clone());

    assert!(orchestrator::execute(&request, SyncOptions::default()).is_err());
    assert_eq!(fs::read_to_string(fx.saves.join("World1/level.dat")).unwrap(), "one");
}

#[test]
fn test_repeated_push_is_idempotent() {
    let fx = Fixture::new();
    create_save(&fx.saves, "World1", "one");

    let request = fx.request(SyncDirection::Push);
    let first = orchestrator::execute(&request, SyncOptions::default()).unwrap();
    let second = orchestrator::execute(&request, SyncOptions::default()).unwrap();

    assert_eq!(first.stats, second.stats);
    assert_eq!(fs::read_to_string(fx.backup.join("World1/level.dat")).unwrap(), "one");
    assert_eq!(fs::read_dir(fx.backup.join("World1")).unwrap().count(), 2);
}

#[test]
fn test_dry_run_writes_nothing() {
    let fx = Fixture::new();
    create_save(&fx.saves, "World1", "one");
    create_save(&fx.saves, "World2", "two");

    let mut request = fx.request(SyncDirection::Push);
    request.config = Some(saves_config(&["World1", "Missing"]));

    let options = SyncOptions {
        dry_run: true,
        ..SyncOptions::default()
    };
    let report = orchestrator::execute(&request, options).unwrap();

    assert!(report.dry_run);
    assert_eq!(report.synced, SyncedSaves::Named(vec!["World1".to_string()]));
    assert_eq!(report.warnings.len(), 1);
    assert_eq!(report.stats, CopyStats::default());
    assert_eq!(fs::read_dir(&fx.backup).unwrap().count(), 0);
}

#[test]
fn test_parallel_matches_sequential() {
    let sequential = Fixture::new();
    let parallel = Fixture::new();
    for fx in [&sequential, &parallel] {
        for name in ["W1", "W2", "W3", "W4"] {
            create_save(&fx.saves, name, name);
        }
    }

    let names = ["W4", "Gone", "W2", "W1", "Nope", "W3"];
    let mut seq_request = sequential.request(SyncDirection::Push);
    seq_request.config = Some(saves_config(&names));
    let mut par_request = parallel.request(SyncDirection::Push);
    par_request.config = Some(saves_config(&names));

    let seq_report = orchestrator::execute(&seq_request, SyncOptions::default()).unwrap();
    let par_report = orchestrator::execute(
        &par_request,
        SyncOptions {
            parallel: true,
            dry_run: false,
        },
    )
    .unwrap();

    assert_eq!(seq_report.synced, par_report.synced);
    assert_eq!(seq_report.stats, par_report.stats);
    let warned = |report: &SyncReport| -> Vec<String> {
        report
            .warnings
            .iter()
            .map(|w| match w {
                SyncWarning::MissingSave { name, .. } => name.clone(),
                SyncWarning::InvalidSaveName { name } => name.clone(),
            })
            .collect()
    };
    assert_eq!(warned(&seq_report), vec!["Gone", "Nope"]);
    assert_eq!(warned(&par_report), vec!["Gone", "Nope"]);
    for name in ["W1", "W2", "W3", "W4"] {
        assert_eq!(
            fs::read_to_string(parallel.backup.join(name).join("level.dat")).unwrap(),
            name
        );
    }
}

#[test]
fn test_direction_roots() {
    let local = Path::new("/local");
    let backup = Path::new("/backup");

    assert_eq!(
        SyncDirection::Push.source_and_destination(local, backup),
        (local, backup)
    );
    assert_eq!(
        SyncDirection::Pull.source_and_destination(local, backup),
        (backup, local)
    );
    assert_eq!(SyncDirection::Pull.verb(), "Pulling");
    assert_eq!(SyncDirection::Push.to_string(), "push");
}

#[test]
fn test_warning_messages() {
    let warning = SyncWarning::MissingSave {
        name: "World2".to_string(),
        source: PathBuf::from("/saves/World2"),
    };
    assert_eq!(
        warning.to_string(),
        "Save folder 'World2' not found at source. Skipping."
    );
}

#[test]
fn test_named_push_into_backup_under_saves() {
    let fx = Fixture::new();
    create_save(&fx.saves, "World1", "one");
    create_save(&fx.saves, "World2", "two");
    let nested = fx.saves.join("_backup");
    fs::create_dir_all(&nested).unwrap();

    let mut request = fx.request(SyncDirection::Push);
    request.backup_path = Some(nested.clone());
    request.save_override = Some("World1".to_string());

    let report = orchestrator::execute(&request, SyncOptions::default()).unwrap();

    assert_eq!(report.synced, SyncedSaves::Named(vec!["World1".to_string()]));
    assert_eq!(fs::read_to_string(nested.join("World1/level.dat")).unwrap(), "one");
    assert!(!nested.join("World2").exists());
    assert!(!nested.join("World1/_backup").exists());
}

#[test]
fn test_named_backup_folder_into_itself_is_rejected() {
    let fx = Fixture::new();
    let nested = fx.saves.join("_backup");
    create_save(&fx.saves, "_backup", "self");

    let mut request = fx.request(SyncDirection::Push);
    request.backup_path = Some(nested.clone());
    request.save_override = Some("_backup".to_string());

    let err = orchestrator::execute(&request, SyncOptions::default()).unwrap_err();

    assert!(matches!(
        err,
        SyncError::Configuration(ConfigurationError::DestinationInsideSource { .. })
    ));
    assert!(!nested.join("_backup").exists());
}

/// A regular file where a save folder must be created makes that save fail
fn block_destination(root: &Path, name: &str) {
    fs::write(root.join(name), "not a directory").unwrap();
}

#[test]
fn test_sequential_stops_at_first_copy_failure() {
    let fx = Fixture::new();
    for name in ["World1", "World2", "World3"] {
        create_save(&fx.saves, name, name);
    }
    block_destination(&fx.backup, "World2");

    let mut request = fx.request(SyncDirection::Push);
    request.config = Some(saves_config(&["World1", "World2", "World3"]));

    let err = orchestrator::execute(&request, SyncOptions::default()).unwrap_err();

    assert!(matches!(
        &err,
        SyncError::Copy { target, source: CopyError::Io { .. } } if target == "World2"
    ));
    assert_eq!(err.to_string(), "Failed to sync World2");
    assert!(fx.backup.join("World1/level.dat").is_file());
    assert!(!fx.backup.join("World3").exists());
}

#[test]
fn test_parallel_reports_earliest_copy_failure() {
    let fx = Fixture::new();
    for name in ["World1", "World2", "World3", "World4"] {
        create_save(&fx.saves, name, name);
    }
    block_destination(&fx.backup, "World2");
    block_destination(&fx.backup, "World4");

    let mut request = fx.request(SyncDirection::Push);
    request.config = Some(saves_config(&["World1", "World2", "World3", "World4"]));

    let err = orchestrator::execute(
        &request,
        SyncOptions {
            parallel: true,
            dry_run: false,
        },
    )
    .unwrap_err();

    assert!(matches!(
        &err,
        SyncError::Copy { target, source: CopyError::Io { .. } } if target == "World2"
    ));
    // Every task runs in parallel mode
    assert!(fx.backup.join("World1/level.dat").is_file());
    assert!(fx.backup.join("World3/level.dat").is_file());
}

#[test]
fn test_parallel_repeated_save_matches_sequential() {
    let sequential = Fixture::new();
    let parallel = Fixture::new();
    for fx in [&sequential, &parallel] {
        create_save(&fx.saves, "World1", "one");
        create_save(&fx.saves, "World2", "two");
    }

    let names = ["World2", "World1", "World2"];
    let mut seq_request = sequential.request(SyncDirection::Push);
    seq_request.config = Some(saves_config(&names));
    let mut par_request = parallel.request(SyncDirection::Push);
    par_request.config = Some(saves_config(&names));

    let seq_report = orchestrator::execute(&seq_request, SyncOptions::default()).unwrap();
    let par_report = orchestrator::execute(
        &par_request,
        SyncOptions {
            parallel: true,
            dry_run: false,
        },
    )
    .unwrap();

    assert_eq!(
        par_report.synced,
        SyncedSaves::Named(vec![
            "World2".to_string(),
            "World1".to_string(),
            "World2".to_string()
        ])
    );
    assert_eq!(seq_report.synced, par_report.synced);
    assert_eq!(seq_report.stats, par_report.stats);
    assert_eq!(
        fs::read_to_string(parallel.backup.join("World2/region/r.0.0.mca")).unwrap(),
        "two-region"
    );
}
