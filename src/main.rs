//! Headless replay runner (default binary).
//!
//! Loads a JSON intent script (one array of intents per tick), steps a
//! session through it, logs every emitted signal and prints the final
//! snapshot as JSON. Useful for reproducing a game from its seed.
//!
//! ```text
//! ttris-replay --seed 42 --script game.json --idle 120 -vvv
//! ```
//!
//! where `game.json` looks like `[["moveLeft"], [], ["rotateCw", "hardDrop"]]`.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, Level};
use tracing_subscriber::prelude::*;

use ttris::core::{RulesConfig, Session};
use ttris::types::Intent;

#[derive(Debug, Parser)]
#[command(name = "ttris-replay", about = "Replay an intent script against a headless session")]
struct Cli {
    #[arg(short = 'v', long, action = clap::ArgAction::Count, help = "Increase verbosity level (-v = WARN, -vv = INFO, -vvv = DEBUG, -vvvv = TRACE)")]
    verbose: u8,

    #[arg(long, help = "Game seed; a random seed is drawn and logged when omitted")]
    seed: Option<u64>,

    #[arg(long, help = "JSON file with one array of intents per tick")]
    script: Option<PathBuf>,

    #[arg(long, default_value_t = 0, help = "Intent-free ticks to run after the script")]
    idle: u64,

    #[arg(long, help = "Read rule overrides from TTRIS_* environment variables")]
    env_config: bool,

    #[arg(long, help = "Print the final snapshot on a single line")]
    compact: bool,
}

fn level_for(verbose: u8) -> Level {
    match verbose {
        0 => Level::ERROR,
        1 => Level::WARN,
        2 => Level::INFO,
        3 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

fn load_script(path: &Path) -> Result<Vec<Vec<Intent>>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read script {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("failed to parse script {}", path.display()))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = level_for(cli.verbose);
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .with(tracing_subscriber::filter::LevelFilter::from_level(level))
        .init();

    let config = if cli.env_config {
        RulesConfig::from_env()
    } else {
        RulesConfig::default()
    };
    let seed = cli.seed.unwrap_or_else(rand::random);
    info!(seed, "starting replay");

    let script = match &cli.script {
        Some(path) => load_script(path)?,
        None => Vec::new(),
    };

    let mut session = Session::with_config(config, seed)?;
    let idle = std::iter::repeat(&[][..]).take(cli.idle as usize);
    let ticks = script.iter().map(Vec::as_slice).chain(idle);

    for (tick, intents) in ticks.enumerate() {
        let tick = tick as u64;
        for signal in session.step(tick, intents) {
            info!(tick, ?signal, "signal");
        }
        if session.is_game_over() {
            info!(tick, "stopped at game over");
            break;
        }
    }

    info!(
        pieces = session.pieces_locked(),
        lines = session.total_lines(),
        level = session.level(),
        "replay finished"
    );

    let snapshot = session.snapshot();
    let json = if cli.compact {
        serde_json::to_string(&snapshot)?
    } else {
        serde_json::to_string_pretty(&snapshot)?
    };
    println!("{}", json);
    Ok(())
}
