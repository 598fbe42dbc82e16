//! loopviz CLI entry point

mod commands;

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;

use loopviz::cli::{Cli, Commands, ConfigCommands};
use loopviz::logging::{self, LogTarget};
use loopviz::tui::theme::{current_theme, set_theme};
use loopviz::Config;

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let theme = current_theme();
            eprintln!("{} {:#}", theme.error_text("error:"), e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    let interactive = matches!(cli.command, Commands::Play { .. }) && commands::play::is_tty();
    let target = if interactive {
        LogTarget::File
    } else {
        LogTarget::Stderr
    };
    if let Err(e) = logging::init(target, cli.verbose, &config.logging) {
        eprintln!("warning: logging disabled: {:#}", e);
    }
    set_theme(config.theme());

    match cli.command {
        Commands::Play { scenario, script } => commands::play::handle(&config, scenario, &script),
        Commands::Run {
            scenario,
            script,
            instant,
            speed,
        } => commands::run::handle(&config, &scenario, &script, instant, speed),
        Commands::List => commands::list::handle(),
        Commands::Show { scenario } => commands::show::handle(&scenario),
        Commands::Check { script } => commands::check::handle(&script),
        Commands::Export { scenario } => commands::export::handle(&scenario),
        Commands::Config(cmd) => match cmd {
            ConfigCommands::Show => commands::config::handle_show(&config),
            ConfigCommands::Path => commands::config::handle_path(cli.config.as_deref()),
            ConfigCommands::Init => commands::config::handle_init(cli.config.as_deref()),
        },
        Commands::Completions { shell } => commands::completions::handle(shell),
    }
}
