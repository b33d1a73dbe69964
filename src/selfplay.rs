//! Headless self-play.
//!
//! Plays full games with the greedy heuristic on the computer's side and
//! either the same heuristic or uniformly random legal moves on the player's
//! side. Every move is recorded with the KFEN of the position it was played
//! from, so batches can be written out as JSONL and replayed or analysed.

use std::io::Write;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

use rand::rngs::SmallRng;
use rand::SeedableRng;
use serde::Serialize;
use tracing::{info, warn};

use crate::board::{Board, BoardError, Side, Winner};
use crate::movegen::random_move;
use crate::protocol::encode_kfen;
use crate::resolve::apply_move;
use crate::search::choose_move;

/// How the player's side picks its moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Policy {
    Greedy,
    Random,
}

/// Configuration for self-play game generation.
#[derive(Debug, Clone)]
pub struct SelfPlayConfig {
    /// Number of games to play.
    pub num_games: usize,
    /// Pits per side.
    pub size: usize,
    /// Move policy for the player's side. The computer always plays greedy.
    pub player_policy: Policy,
    /// Moves after which an unfinished game is abandoned.
    pub max_moves: usize,
    /// Number of parallel threads for concurrent games.
    pub threads: usize,
    /// Random seed (0 = use entropy).
    pub seed: u64,
    /// Suppress per-game progress output.
    pub quiet: bool,
}

impl Default for SelfPlayConfig {
    fn default() -> Self {
        SelfPlayConfig {
            num_games: 10,
            size: 6,
            player_policy: Policy::Greedy,
            max_moves: 10_000,
            threads: 4,
            seed: 0,
            quiet: false,
        }
    }
}

/// A single recorded move.
#[derive(Debug, Clone, Serialize)]
pub struct MoveRecord {
    pub side: Side,
    pub pit: u32,
    /// Position before the move.
    pub kfen: String,
    pub captured: Option<u32>,
    pub extra_turn: bool,
}

/// A complete self-play game record.
#[derive(Debug, Clone, Serialize)]
pub struct GameRecord {
    pub game_id: usize,
    pub size: usize,
    pub player_policy: Policy,
    /// `None` when the game hit the move cap.
    pub winner: Option<Winner>,
    pub computer_store: u32,
    pub player_store: u32,
    pub final_kfen: String,
    pub truncated: bool,
    pub moves: Vec<MoveRecord>,
}

/// Win/tie tallies for a batch of games.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    pub computer: usize,
    pub player: usize,
    pub ties: usize,
    pub truncated: usize,
}

/// Plays one game to completion (or the move cap).
pub fn play_game(
    config: &SelfPlayConfig,
    game_id: usize,
    rng: &mut SmallRng,
) -> Result<GameRecord, BoardError> {
    let mut board = Board::new(config.size)?;
    let mut side = Side::Computer;
    let mut moves = Vec::new();

    while !board.is_game_over() && moves.len() < config.max_moves {
        let pit = match (side, config.player_policy) {
            (Side::Player, Policy::Random) => match random_move(&board, side, rng) {
                Some(pit) => pit,
                None => break,
            },
            _ => choose_move(&board, side, rng).pit,
        };
        let kfen = encode_kfen(&board);
        let outcome = match apply_move(&mut board, side, u64::from(pit)) {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!(game_id, error = %e, "self-play chose an illegal move");
                break;
            }
        };
        moves.push(MoveRecord {
            side,
            pit,
            kfen,
            captured: outcome.captured,
            extra_turn: !outcome.turn_over,
        });
        if outcome.turn_over {
            side = side.opponent();
        }
    }

    let truncated = !board.is_game_over();
    Ok(GameRecord {
        game_id,
        size: config.size,
        player_policy: config.player_policy,
        winner: if truncated { None } else { Some(board.winner()) },
        computer_store: board.store(Side::Computer),
        player_store: board.store(Side::Player),
        final_kfen: encode_kfen(&board),
        truncated,
        moves,
    })
}

/// Creates the generator for one game.
fn game_rng(seed: u64, game_id: usize) -> SmallRng {
    if seed != 0 {
        SmallRng::seed_from_u64(seed.wrapping_add(game_id as u64))
    } else {
        SmallRng::from_entropy()
    }
}

fn outcome_label(game: &GameRecord) -> &'static str {
    match game.winner {
        Some(w) => w.message(),
        None => "abandoned",
    }
}

/// Runs self-play generation, producing records ordered by game id.
///
/// When `config.threads > 1`, games are played concurrently using rayon.
pub fn run_self_play(config: &SelfPlayConfig) -> Result<Vec<GameRecord>, BoardError> {
    // Fail fast on an unusable size before spinning up workers.
    Board::new(config.size)?;

    info!(
        games = config.num_games,
        size = config.size,
        threads = config.threads,
        "starting self-play"
    );
    let mut games = if config.threads > 1 {
        run_self_play_parallel(config)?
    } else {
        run_self_play_sequential(config)?
    };
    games.sort_by_key(|g| g.game_id);
    Ok(games)
}

/// Sequential self-play: plays games one at a time.
fn run_self_play_sequential(config: &SelfPlayConfig) -> Result<Vec<GameRecord>, BoardError> {
    let mut games = Vec::with_capacity(config.num_games);
    for i in 0..config.num_games {
        let start = Instant::now();
        let mut rng = game_rng(config.seed, i);
        let game = play_game(config, i, &mut rng)?;
        if !config.quiet {
            eprintln!(
                "Game {}/{}: {} in {} moves ({:.3}s)",
                i + 1,
                config.num_games,
                outcome_label(&game),
                game.moves.len(),
                start.elapsed().as_secs_f64(),
            );
        }
        games.push(game);
    }
    Ok(games)
}

/// Parallel self-play on a dedicated rayon pool.
fn run_self_play_parallel(config: &SelfPlayConfig) -> Result<Vec<GameRecord>, BoardError> {
    use rayon::prelude::*;

    let completed = AtomicUsize::new(0);
    let pool = match rayon::ThreadPoolBuilder::new()
        .num_threads(config.threads)
        .build()
    {
        Ok(pool) => pool,
        Err(e) => {
            warn!(error = %e, "failed to build thread pool, playing sequentially");
            return run_self_play_sequential(config);
        }
    };

    pool.install(|| {
        (0..config.num_games)
            .into_par_iter()
            .map(|i| -> Result<GameRecord, BoardError> {
                let start = Instant::now();
                let mut rng = game_rng(config.seed, i);
                let game = play_game(config, i, &mut rng)?;
                if !config.quiet {
                    let n = completed.fetch_add(1, Ordering::Relaxed) + 1;
                    eprintln!(
                        "Game {}/{}: {} in {} moves ({:.3}s)",
                        n,
                        config.num_games,
                        outcome_label(&game),
                        game.moves.len(),
                        start.elapsed().as_secs_f64(),
                    );
                }
                Ok(game)
            })
            .collect()
    })
}

/// Tallies results for a batch of games.
pub fn summarize(games: &[GameRecord]) -> Summary {
    let mut summary = Summary::default();
    for game in games {
        match game.winner {
            Some(Winner::Computer) => summary.computer += 1,
            Some(Winner::Player) => summary.player += 1,
            Some(Winner::Tie) => summary.ties += 1,
            None => summary.truncated += 1,
        }
    }
    summary
}

/// Writes game records as JSONL (one JSON object per game, one per line).
pub fn write_jsonl<W: Write>(games: &[GameRecord], out: &mut W) -> std::io::Result<()> {
    for game in games {
        serde_json::to_writer(&mut *out, game)?;
        writeln!(out)?;
    }
    out.flush()
}
