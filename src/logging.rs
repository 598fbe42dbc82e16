//! Tracing subscriber setup
//!
//! Filter precedence: `RUST_LOG` > `--verbose` > `[logging] level`.
//! While the board owns the terminal, log lines go to
//! `<data_local_dir>/loopviz/loopviz.log` (or nowhere if file logging is
//! off); every other command logs to stderr.

use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::config::{Config, LoggingConfig};

/// Where log lines end up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogTarget {
    Stderr,
    /// The terminal is taken; log to the file only
    File,
}

/// Name of the log file inside the data directory
pub const LOG_FILE: &str = "loopviz.log";

/// Resolve the filter directive from the three sources.
pub fn filter_directive(env: Option<&str>, verbose: bool, config: &LoggingConfig) -> String {
    match env {
        Some(directive) if !directive.trim().is_empty() => directive.to_string(),
        _ if verbose => "debug".to_string(),
        _ => config.level.clone(),
    }
}

fn build_filter(verbose: bool, config: &LoggingConfig) -> EnvFilter {
    let env = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let directive = filter_directive(env.as_deref(), verbose, config);
    EnvFilter::try_new(&directive).unwrap_or_else(|_| EnvFilter::new("warn"))
}

pub fn log_path() -> Result<PathBuf> {
    Ok(Config::data_dir()?.join(LOG_FILE))
}

fn open_log_file(path: &Path) -> Result<File> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file {}", path.display()))
}

/// Install the global subscriber. Call once, early in `main`.
///
/// # Arguments
/// * `target` - Stderr for headless commands, File while the TUI runs
/// * `verbose` - Whether `-v` was given
/// * `config` - The `[logging]` section
pub fn init(target: LogTarget, verbose: bool, config: &LoggingConfig) -> Result<()> {
    let filter = build_filter(verbose, config);

    match target {
        LogTarget::Stderr => {
            let layer = fmt::layer()
                .with_target(false)
                .with_ansi(!crate::tui::theme::no_color())
                .with_writer(std::io::stderr);
            tracing_subscriber::registry()
                .with(layer.with_filter(filter))
                .try_init()?;
        }
        LogTarget::File if config.file => {
            let file = open_log_file(&log_path()?)?;
            let layer = fmt::layer()
                .with_target(false)
                .with_ansi(false)
                .with_writer(Mutex::new(file));
            tracing_subscriber::registry()
                .with(layer.with_filter(filter))
                .try_init()?;
        }
        // No file and no terminal: nothing to write to
        LogTarget::File => {}
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_wins_over_everything() {
        let config = LoggingConfig::default();
        assert_eq!(
            filter_directive(Some("loopviz=trace"), true, &config),
            "loopviz=trace"
        );
    }

    #[test]
    fn verbose_beats_config() {
        let config = LoggingConfig {
            level: "error".into(),
            file: true,
        };
        assert_eq!(filter_directive(None, true, &config), "debug");
    }

    #[test]
    fn config_level_is_the_fallback() {
        let config = LoggingConfig::default();
        assert_eq!(filter_directive(None, false, &config), "warn");
        assert_eq!(filter_directive(Some("  "), false, &config), "warn");
    }

    #[test]
    fn log_file_is_created_in_append_mode() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("logs").join(LOG_FILE);
        {
            use std::io::Write;
            let mut file = open_log_file(&path).unwrap();
            writeln!(file, "first").unwrap();
        }
        {
            use std::io::Write;
            let mut file = open_log_file(&path).unwrap();
            writeln!(file, "second").unwrap();
        }
        assert_eq!(fs::read_to_string(&path).unwrap(), "first\nsecond\n");
    }
}
