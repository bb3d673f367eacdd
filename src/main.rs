use std::fs;

use anyhow::{Context, Result};
use clap::Parser;

use viewer3d::cli::Cli;
use viewer3d::replay::{self, ReplayScript};

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    let text = fs::read_to_string(&cli.script)
        .with_context(|| format!("Failed to read script {}", cli.script.display()))?;
    let script: ReplayScript = serde_json::from_str(&text)
        .with_context(|| format!("Failed to parse script {}", cli.script.display()))?;

    let report = replay::run(&script, cli.every_event).context("Replay failed")?;

    let out = if cli.pretty {
        serde_json::to_string_pretty(&report)?
    } else {
        serde_json::to_string(&report)?
    };
    println!("{out}");

    Ok(())
}
