//! Kalah -- play a game of Kalah against the computer in the terminal.
//!
//! Reads one pit number per line from stdin and draws the board to stdout.
//! Type `exit`, `quit`, `q` or `x` to leave early.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use tracing::info;
use tracing_subscriber::EnvFilter;

use kalah::protocol::parse_kfen;
use kalah::session::{Session, SessionConfig, DEFAULT_SIZE};
use kalah::transcript::{create_transcript, Tee};

/// Play Kalah against a greedy computer opponent.
#[derive(Parser, Debug)]
#[command(name = "kalah", version, about, long_about = None)]
struct Args {
    /// Pits per side
    #[arg(long, default_value_t = DEFAULT_SIZE as u64, value_parser = clap::value_parser!(u64).range(1..))]
    size: u64,

    /// Start from a KFEN position (e.g. `0,3,3,3,3/0/3,0,3,3,3/0`); overrides --size
    #[arg(long)]
    position: Option<String>,

    /// Copy everything shown on screen to a timestamped transcript file
    #[arg(long)]
    log: bool,

    /// Directory for transcript files
    #[arg(long, default_value = ".")]
    log_dir: PathBuf,

    /// Do not pause after an invalid move
    #[arg(long)]
    no_delay: bool,

    /// Draw the board without ANSI colors
    #[arg(long)]
    no_color: bool,

    /// Seed for the computer's random fallback
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let args = Args::parse();

    let display: Box<dyn Write> = if args.log {
        let (_, file) = create_transcript(&args.log_dir).with_context(|| {
            format!("failed to create transcript in {}", args.log_dir.display())
        })?;
        Box::new(Tee::new(io::stdout(), file))
    } else {
        Box::new(io::stdout())
    };

    let config = SessionConfig {
        size: args.size as usize,
        slow_feedback: !args.no_delay,
        color: !args.no_color,
        seed: args.seed,
    };
    let mut session = match &args.position {
        Some(kfen) => {
            let board = parse_kfen(kfen).with_context(|| format!("invalid position '{}'", kfen))?;
            let session = Session::with_board(board, display, config.slow_feedback)
                .with_color(config.color);
            match config.seed {
                Some(seed) => session.with_rng(SmallRng::seed_from_u64(seed)),
                None => session,
            }
        }
        None => Session::from_config(&config, display)?,
    };
    info!(size = session.board().size(), "starting game");

    let stdin = io::stdin();
    let mut input = stdin.lock();
    while !session.is_game_over() {
        session.print_board()?;
        print!(">> ");
        io::stdout().flush()?;

        let mut line = String::new();
        let read = input
            .read_line(&mut line)
            .context("failed to read from stdin")?;
        if read == 0 {
            info!("end of input");
            break;
        }
        if session.handle_input(&line)? {
            break;
        }
    }

    session.print_board()?;
    if session.is_game_over() {
        session.print_winner()?;
    }
    Ok(())
}
