//! Push and pull commands

use anyhow::Result;

use crate::cli::{Cli, Output, OutputFormat, SyncArgs};
use crate::config;
use crate::locator::locate_saves_dir;
use crate::sync::{SyncDirection, SyncOptions, SyncReport, SyncRequest, SyncedSaves, orchestrator};

/// Execute a push or pull
pub fn execute(direction: SyncDirection, args: &SyncArgs, cli: &Cli, output: &Output) -> Result<()> {
    let local_saves = locate_saves_dir(cli.saves_dir.as_deref())?;
    output.verbose(&format!("Local saves: {}", local_saves.display()));

    // A broken config file is reported but does not stop the sync
    let config = match config::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(err) => {
            output.error(&err.to_string());
            None
        }
    };

    let request = SyncRequest {
        direction,
        backup_path: args.path.clone(),
        local_saves,
        config,
        save_override: args.save.clone(),
    };
    let options = SyncOptions {
        parallel: args.parallel,
        dry_run: args.dry_run,
    };

    let report = orchestrator::execute(&request, options)?;

    match cli.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Text => display_report(&report, output),
    }

    Ok(())
}

fn display_report(report: &SyncReport, output: &Output) {
    if report.dry_run {
        output.info("Dry run, nothing will be written");
    }
    output.info(&format!("{} saves...", report.direction.verb()));
    output.verbose(&format!("Backup folder: {}", report.backup_path.display()));

    match &report.synced {
        SyncedSaves::All => output.list_item("all saves"),
        SyncedSaves::Named(names) => {
            for name in names {
                output.list_item(name);
            }
        }
    }

    for warning in &report.warnings {
        output.warning(&warning.to_string());
    }

    if report.stats.skipped_links > 0 {
        output.warning(&format!(
            "Skipped {} symlink(s); links are not followed",
            report.stats.skipped_links
        ));
    }

    if !report.dry_run {
        output.verbose(&format!(
            "Copied {} file(s) in {} folder(s), {} bytes",
            report.stats.files, report.stats.directories, report.stats.bytes
        ));
    }

    output.success(if report.dry_run {
        "Dry run complete."
    } else {
        "Sync complete."
    });
}
