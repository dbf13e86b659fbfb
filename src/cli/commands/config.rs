//! Configuration command implementations

use anyhow::{Result, bail};
use std::path::Path;

use crate::cli::{Cli, ConfigCommands, Output, OutputFormat};
use crate::config::{self, ConfigFormat, SyncConfig};

/// Execute config commands
pub fn execute(cmd: ConfigCommands, cli: &Cli, output: &Output) -> Result<()> {
    let Some(path) = cli.config.as_deref() else {
        bail!("No configuration file given; pass one with --config FILE");
    };

    match cmd {
        ConfigCommands::Show => show(path, cli.format, output),
        ConfigCommands::Validate => validate(path, output),
    }
}

fn show(path: &Path, format: OutputFormat, output: &Output) -> Result<()> {
    let Some(config) = config::load(Some(path))? else {
        output.warning(&format!("Config file '{}' not found or empty", path.display()));
        return Ok(());
    };

    // Text output keeps the file's own format
    let render_as = match format {
        OutputFormat::Json => ConfigFormat::Json,
        OutputFormat::Text => ConfigFormat::from_path(path),
    };
    print!("{}", ensure_newline(config.render(render_as)?));
    Ok(())
}

fn validate(path: &Path, output: &Output) -> Result<()> {
    let Some(config) = config::load(Some(path))? else {
        bail!("Config file '{}' not found or empty", path.display());
    };

    output.success("Configuration is valid");
    summarize(&config, output);
    Ok(())
}

fn summarize(config: &SyncConfig, output: &Output) {
    let backup = config
        .path
        .as_ref()
        .map(|path| path.display().to_string())
        .unwrap_or_else(|| "(not set, use --path)".to_string());
    output.key_value("Backup path", &backup);

    match config.saves.as_deref() {
        Some(saves) if !saves.is_empty() => {
            output.key_value("Saves", &saves.len().to_string());
            for save in saves {
                output.list_item(save);
            }
        }
        _ => output.key_value("Saves", "all"),
    }
}

fn ensure_newline(mut rendered: String) -> String {
    if !rendered.ends_with('\n') {
        rendered.push('\n');
    }
    rendered
}
