//! Fusion 2048
//!
//! Terminal front end. Reads commands from stdin, renders the board to
//! stdout and logs to stderr.

use std::io::{self, BufRead};
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use fusion_2048::{
    VERSION, DEFAULT_GRID_SIZE,
    config::GameConfig,
    core::rng::derive_seed,
    game::{replay_moves, clamp_difficulty, Command, Direction},
    session::{FileStorage, GameSession, MemoryStorage, SharedDifficulty, Storage, TerminalActuator},
};

#[derive(Debug, Parser)]
#[command(name = "fusion-2048", version, about = "2048 with nuclear fusion")]
struct Args {
    #[command(subcommand)]
    cmd: Option<Cmd>,

    /// Board side length
    #[arg(long, default_value_t = DEFAULT_GRID_SIZE)]
    size: usize,

    /// Chance in [0, 1] that a proton pair fails to fuse
    #[arg(long, default_value_t = 0.0)]
    difficulty: f64,

    /// RNG seed (defaults to the clock)
    #[arg(long, conflicts_with = "seed_phrase")]
    seed: Option<u64>,

    /// Derive the RNG seed from a phrase
    #[arg(long)]
    seed_phrase: Option<String>,

    /// Save the game and best score in this directory
    #[arg(long)]
    state_dir: Option<PathBuf>,

    /// Log filter used when RUST_LOG is unset
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[derive(Debug, Subcommand)]
enum Cmd {
    /// Replay a move string (e.g. "wasd") twice and check the hashes agree
    Replay {
        /// Moves as w/a/s/d characters
        moves: String,
    },
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing(&args.log_level);

    info!("Fusion 2048 v{}", VERSION);

    let config = GameConfig {
        size: args.size,
        seed: resolve_seed(&args),
        ..GameConfig::default()
    };
    config.validate().context("invalid game settings")?;
    info!("RNG Seed: {}", config.seed);

    if let Some(Cmd::Replay { moves }) = &args.cmd {
        return replay(&config, args.difficulty, moves);
    }

    let difficulty = SharedDifficulty::new(args.difficulty);
    match &args.state_dir {
        Some(dir) => {
            let storage = FileStorage::new(dir)
                .with_context(|| format!("cannot use state directory {}", dir.display()))?;
            play(config, storage, difficulty)
        }
        None => play(config, MemoryStorage::new(), difficulty),
    }
}

fn init_tracing(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .compact()
        .init();
}

fn resolve_seed(args: &Args) -> u64 {
    if let Some(seed) = args.seed {
        return seed;
    }
    if let Some(phrase) = &args.seed_phrase {
        return derive_seed(phrase.as_bytes());
    }
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or_default();
    derive_seed(&nanos.to_le_bytes())
}

/// Interactive loop.
fn play<S: Storage>(config: GameConfig, storage: S, difficulty: SharedDifficulty) -> anyhow::Result<()> {
    let actuator = TerminalActuator::new(io::stdout());
    let mut session = GameSession::new(config, storage, actuator, difficulty.clone())?;
    println!("w/a/s/d to move, r restart, k keep playing, difficulty <x>, q quit");

    for line in io::stdin().lock().lines() {
        let line = line.context("reading stdin")?;
        let input = line.trim();
        if input.is_empty() {
            continue;
        }
        if input == "q" || input == "quit" {
            break;
        }
        if let Some(value) = input.strip_prefix("difficulty") {
            match value.trim().parse::<f64>() {
                Ok(value) => {
                    difficulty.set(value);
                    println!("Difficulty {} applies from the next restart", clamp_difficulty(value));
                }
                Err(_) => println!("usage: difficulty <0..1>"),
            }
            continue;
        }

        match input.parse::<Command>() {
            Ok(command) => {
                if let Some(result) = session.handle(command) {
                    if session.is_terminated() && !result.moved && result.events.is_empty() {
                        println!("Game has ended (r to restart, k to keep playing after a win)");
                    }
                }
            }
            Err(e) => println!("{}", e),
        }
    }

    let state = session.state();
    info!(
        score = state.score,
        turns = state.turn,
        hash = %hex::encode(state.compute_hash()),
        "Session ended"
    );
    Ok(())
}

/// Replay a move string and confirm the result is reproducible.
fn replay(config: &GameConfig, difficulty: f64, moves: &str) -> anyhow::Result<()> {
    let directions = moves
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| match c.to_string().parse::<Command>() {
            Ok(Command::Move(direction)) => Ok(direction),
            _ => bail!("{:?} is not a move", c),
        })
        .collect::<anyhow::Result<Vec<Direction>>>()?;

    let (state, events) = replay_moves(config, difficulty, &directions);
    let (again, _) = replay_moves(config, difficulty, &directions);

    let hash = state.compute_hash();
    println!("{}", state.grid);
    println!("Score: {}  Moves: {}  Events: {}", state.score, state.turn, events.len());
    println!("State hash: {}", hex::encode(hash));

    if hash != again.compute_hash() {
        bail!("replay diverged");
    }
    info!("Replay verified: hashes match");
    Ok(())
}
