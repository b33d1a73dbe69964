//! Self-play game generation CLI.
//!
//! Plays Kalah games with the greedy heuristic and writes one JSON record
//! per game (JSONL).
//!
//! Usage:
//!   cargo run --release --bin selfplay -- [OPTIONS]

use std::fs::File;
use std::io::{self, BufWriter};
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use kalah::selfplay::{self, Policy, SelfPlayConfig};

/// Play greedy Kalah games and record them as JSONL.
#[derive(Parser, Debug)]
#[command(name = "selfplay", version, about, long_about = None)]
struct Args {
    /// Number of games to play
    #[arg(long, default_value_t = 10)]
    games: usize,

    /// Pits per side
    #[arg(long, default_value_t = 6, value_parser = clap::value_parser!(u64).range(1..))]
    size: u64,

    /// Let the player's side move at random instead of greedily
    #[arg(long)]
    random_player: bool,

    /// Abandon a game after this many moves
    #[arg(long, default_value_t = 10_000)]
    max_moves: usize,

    /// Number of parallel threads
    #[arg(long, default_value_t = 4)]
    threads: usize,

    /// Random seed, 0 for entropy
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Output file path (default: stdout)
    #[arg(long)]
    output: Option<PathBuf>,

    /// Suppress progress and summary output
    #[arg(long)]
    quiet: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let args = Args::parse();
    let config = SelfPlayConfig {
        num_games: args.games,
        size: args.size as usize,
        player_policy: if args.random_player {
            Policy::Random
        } else {
            Policy::Greedy
        },
        max_moves: args.max_moves,
        threads: args.threads,
        seed: args.seed,
        quiet: args.quiet,
    };

    if !config.quiet {
        eprintln!(
            "Self-play: {} games, size {}, player {:?}, {} threads",
            config.num_games, config.size, config.player_policy, config.threads
        );
    }

    let start = Instant::now();
    let games = selfplay::run_self_play(&config)?;
    let elapsed = start.elapsed();

    if !config.quiet {
        let summary = selfplay::summarize(&games);
        eprintln!(
            "Completed {} games in {:.2}s",
            games.len(),
            elapsed.as_secs_f64()
        );
        eprintln!(
            "Computer {}, player {}, ties {}, abandoned {}",
            summary.computer, summary.player, summary.ties, summary.truncated
        );
    }

    match args.output {
        Some(path) => {
            let file = File::create(&path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            let mut writer = BufWriter::new(file);
            selfplay::write_jsonl(&games, &mut writer).context("failed to write output")?;
            if !config.quiet {
                eprintln!("Wrote {} games to {}", games.len(), path.display());
            }
        }
        None => {
            let stdout = io::stdout();
            let mut writer = BufWriter::new(stdout.lock());
            selfplay::write_jsonl(&games, &mut writer).context("failed to write output")?;
        }
    }
    Ok(())
}
