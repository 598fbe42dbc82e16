//! Command-line interface definition
//!
//! Lives in the library so the xtask can render the man page from the same
//! definition the binary parses.

use std::path::PathBuf;
use std::sync::OnceLock;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

const LONG_ABOUT: &str = "\
Replays how a JavaScript runtime schedules work: call stack, heap, microtask \
and macrotask queues, and a worker thread. Each scenario is a fixed script of \
steps animated one at a time.";

/// Version string with the build info from build.rs.
///
/// Release builds carry no git hash.
pub fn long_version() -> &'static str {
    static VERSION: OnceLock<String> = OnceLock::new();
    VERSION.get_or_init(|| {
        let version = env!("CARGO_PKG_VERSION");
        let date = env!("LOOPVIZ_BUILD_DATE");
        match option_env!("VERGEN_GIT_SHA") {
            Some(sha) => format!("{} ({} {})", version, sha, date),
            None => format!("{} ({})", version, date),
        }
    })
}

#[derive(Parser, Debug)]
#[command(name = "loopviz")]
#[command(author, version, long_version = long_version())]
#[command(about = "Step through event loop scenarios in the terminal")]
#[command(long_about = LONG_ABOUT)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Use this config file instead of the default location
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log debug output (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Open the interactive board
    #[command(long_about = "Open the interactive board.\n\n\
        Falls back to the headless transcript when stdout is not a terminal.")]
    Play {
        /// Scenario to select first [default: from config]
        scenario: Option<String>,

        #[command(flatten)]
        script: ScriptArg,
    },

    /// Run a scenario headless and print a transcript
    Run {
        /// Scenario id (see `loopviz list`)
        scenario: String,

        #[command(flatten)]
        script: ScriptArg,

        /// Do not wait between steps
        #[arg(long)]
        instant: bool,

        /// Playback speed multiplier (0.1 to 16)
        #[arg(long, value_name = "X")]
        speed: Option<f64>,
    },

    /// List available scenarios
    List,

    /// Print a scenario's code listing and steps
    Show {
        /// Scenario id
        scenario: String,
    },

    /// Check that scripts are well-formed
    Check {
        #[command(flatten)]
        script: ScriptArg,
    },

    /// Print a scenario as a JSON script
    Export {
        /// Scenario id
        scenario: String,
    },

    /// Manage configuration
    #[command(subcommand)]
    Config(ConfigCommands),

    /// Generate shell completions
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show the effective configuration as TOML
    Show,
    /// Print the config file location
    Path,
    /// Write a config file with default values if none exists
    Init,
}

/// `--script FILE`: load a custom scenario next to the built-ins.
#[derive(Args, Debug, Default, Clone)]
pub struct ScriptArg {
    /// JSON scenario script to load
    #[arg(long = "script", value_name = "FILE")]
    pub path: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn run_parses_flags() {
        let cli = Cli::try_parse_from(["loopviz", "run", "timeout", "--instant", "--speed", "2"])
            .unwrap();
        match cli.command {
            Commands::Run {
                scenario,
                instant,
                speed,
                script,
            } => {
                assert_eq!(scenario, "timeout");
                assert!(instant);
                assert_eq!(speed, Some(2.0));
                assert!(script.path.is_none());
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn global_flags_work_after_subcommand() {
        let cli =
            Cli::try_parse_from(["loopviz", "list", "-v", "--config", "/tmp/c.toml"]).unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/c.toml")));
    }

    #[test]
    fn play_scenario_is_optional() {
        let cli = Cli::try_parse_from(["loopviz", "play"]).unwrap();
        assert!(matches!(cli.command, Commands::Play { scenario: None, .. }));
    }

    #[test]
    fn run_requires_scenario() {
        assert!(Cli::try_parse_from(["loopviz", "run"]).is_err());
    }
}
