//! Legal move generation.
//!
//! A move is legal for a side when it names one of that side's own pits and
//! the pit holds at least one seed.

use rand::Rng;

use crate::board::{Board, Side};

/// Returns the pit numbers `side` may legally play, in increasing order.
pub fn legal_moves(board: &Board, side: Side) -> Vec<u32> {
    board
        .row(side)
        .zip(1u32..)
        .filter(|&(seeds, _)| seeds > 0)
        .map(|(_, pit)| pit)
        .collect()
}

/// Picks a uniformly random legal move for `side`, or `None` if its row is empty.
pub fn random_move(board: &Board, side: Side, rng: &mut impl Rng) -> Option<u32> {
    let legal = legal_moves(board, side);
    if legal.is_empty() {
        return None;
    }
    let idx = rng.gen_range(0..legal.len());
    Some(legal[idx])
}
