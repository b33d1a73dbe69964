//! Move application: sowing, capture, and turn continuation.
//!
//! A move picks up every seed from one of the mover's pits and drops them one
//! at a time into the following counters, skipping the opponent's store and
//! the source pit itself. The turn continues if the last seed lands in the
//! mover's store, or if it lands in a previously empty pit on the mover's row
//! whose opposite pit holds seeds (a capture). Any move that empties a row
//! ends the turn regardless.

use serde::Serialize;
use tracing::debug;

use crate::board::{Board, Side};

/// Reasons a requested move is rejected. The board is left untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("{side:?} has no pit {pit}")]
    OutOfRange { side: Side, pit: u64 },

    #[error("{side:?} pit {pit} is empty")]
    EmptyPit { side: Side, pit: u32 },
}

/// What happened when a move was applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MoveOutcome {
    pub side: Side,
    pub pit: u32,
    /// Number of seeds sown from the source pit.
    pub sown: u32,
    /// Flat index where the last seed landed.
    pub landing: usize,
    /// Seeds moved into the mover's store by a capture, if one happened.
    pub captured: Option<u32>,
    pub landed_in_store: bool,
    /// Whether the mover's turn has ended.
    pub turn_over: bool,
    pub game_over: bool,
}

/// Applies `side`'s move from `pit` (1 = next to its store) to the board.
pub fn apply_move(board: &mut Board, side: Side, pit: u64) -> Result<MoveOutcome, MoveError> {
    let outcome = sow(board, side, pit)?;
    debug!(?outcome, "applied move");
    Ok(outcome)
}

/// The move rules without logging, for lookahead on scratch boards.
pub(crate) fn sow(board: &mut Board, side: Side, pit: u64) -> Result<MoveOutcome, MoveError> {
    let source = u32::try_from(pit)
        .ok()
        .and_then(|p| board.index_of(side, p))
        .ok_or(MoveError::OutOfRange { side, pit })?;
    let pit = pit as u32;
    let sown = board.pits()[source];
    if sown == 0 {
        return Err(MoveError::EmptyPit { side, pit });
    }

    let store = board.store_index(side);
    let skip = board.store_index(side.opponent());
    let total = board.total_pits();

    let pits = board.pits_mut();
    pits[source] = 0;
    let mut landing = source;
    let mut left = sown;
    while left > 0 {
        landing = (landing + 1) % total;
        if landing == skip || landing == source {
            continue;
        }
        pits[landing] += 1;
        left -= 1;
    }

    let landed_in_store = landing == store;
    let mut turn_over = !landed_in_store;
    let mut captured = None;

    if turn_over && board.pits()[landing] == 1 && board.owner_of(landing) == Some(side) {
        let opposite = board.opposite(landing);
        let taken = board.pits()[opposite];
        if taken > 0 {
            let pits = board.pits_mut();
            pits[opposite] = 0;
            pits[landing] = 0;
            pits[store] += taken + 1;
            captured = Some(taken + 1);
            turn_over = false;
        }
    }

    let game_over = board.is_game_over();
    Ok(MoveOutcome {
        side,
        pit,
        sown,
        landing,
        captured,
        landed_in_store,
        turn_over: turn_over || game_over,
        game_over,
    })
}
