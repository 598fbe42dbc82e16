//! Config subcommands handler

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Local;

use loopviz::tui::current_theme;
use loopviz::Config;

fn resolve_path(override_path: Option<&Path>) -> Result<PathBuf> {
    match override_path {
        Some(path) => Ok(path.to_path_buf()),
        None => Config::config_path(),
    }
}

/// Show the effective configuration as TOML.
pub fn handle_show(config: &Config) -> Result<()> {
    let toml_str = config.to_toml()?;
    let theme = current_theme();
    println!("{}", theme.primary_text(toml_str.trim_end()));
    Ok(())
}

/// Print where the config file is (or would be).
pub fn handle_path(override_path: Option<&Path>) -> Result<()> {
    println!("{}", resolve_path(override_path)?.display());
    Ok(())
}

/// Write a config file with every default spelled out.
///
/// An existing file is left untouched.
pub fn handle_init(override_path: Option<&Path>) -> Result<()> {
    let theme = current_theme();
    let path = resolve_path(override_path)?;

    if path.exists() {
        println!(
            "{}",
            theme.secondary_text(&format!(
                "Config file already exists: {}",
                path.display()
            ))
        );
        return Ok(());
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    let content = format!(
        "# loopviz configuration, created {}\n\n{}",
        Local::now().format("%Y-%m-%d"),
        Config::default().to_toml()?
    );
    fs::write(&path, content)
        .with_context(|| format!("Failed to write config file {}", path.display()))?;

    println!(
        "{}",
        theme.success_text(&format!("Created {}", path.display()))
    );
    Ok(())
}
