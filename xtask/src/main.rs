//! Development tasks for loopviz.
//!
//! Usage: `cargo xtask gen-man [--out-dir DIR]`

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use clap_mangen::Man;

#[derive(Parser)]
#[command(name = "xtask", about = "loopviz development tasks")]
struct Xtask {
    #[command(subcommand)]
    command: Task,
}

#[derive(Subcommand)]
enum Task {
    /// Generate man pages for loopviz and its subcommands
    GenMan {
        /// Output directory
        #[arg(long, default_value = "target/man")]
        out_dir: PathBuf,
    },
}

fn main() -> Result<()> {
    match Xtask::parse().command {
        Task::GenMan { out_dir } => gen_man(&out_dir),
    }
}

fn gen_man(out_dir: &PathBuf) -> Result<()> {
    fs::create_dir_all(out_dir)
        .with_context(|| format!("Failed to create {}", out_dir.display()))?;

    let cmd = loopviz::cli::Cli::command();
    write_page(out_dir, "loopviz", cmd.clone())?;
    for sub in cmd.get_subcommands() {
        let name = format!("loopviz-{}", sub.get_name());
        write_page(out_dir, &name, sub.clone().name(name.clone()))?;
    }
    println!("Man pages written to {}", out_dir.display());
    Ok(())
}

fn write_page(out_dir: &PathBuf, name: &str, cmd: clap::Command) -> Result<()> {
    let mut buf = Vec::new();
    Man::new(cmd).render(&mut buf)?;
    let path = out_dir.join(format!("{}.1", name));
    fs::write(&path, buf).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}
