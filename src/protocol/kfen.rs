//! KFEN (Kalah FEN) encoding and decoding.
//!
//! KFEN is a single-line notation for a full board position, in the spirit
//! of chess FEN. It lists each row in flat storage order followed by that
//! side's store.
//!
//! Format: `<computer pits>/<computer store>/<player pits>/<player store>`
//!
//! Example: `0,3,3,3,3/0/3,0,3,3,3/0`

use crate::board::{Board, BoardError, Side};

/// Errors that can occur during KFEN parsing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum KfenError {
    #[error("expected 4 sections separated by '/', got {0}")]
    WrongSectionCount(usize),

    #[error("invalid seed count: '{0}'")]
    InvalidCount(String),

    #[error("rows must not be empty")]
    EmptyRow,

    #[error("row lengths differ: computer has {computer}, player has {player}")]
    RowLengthMismatch { computer: usize, player: usize },

    #[error(transparent)]
    Board(#[from] BoardError),
}

/// Parses a single seed count.
fn parse_count(s: &str) -> Result<u32, KfenError> {
    s.trim()
        .parse()
        .map_err(|_| KfenError::InvalidCount(s.to_string()))
}

/// Parses a comma-separated row.
fn parse_row(s: &str) -> Result<Vec<u32>, KfenError> {
    if s.trim().is_empty() {
        return Err(KfenError::EmptyRow);
    }
    s.split(',').map(parse_count).collect()
}

/// Parses a KFEN string into a board.
pub fn parse_kfen(kfen: &str) -> Result<Board, KfenError> {
    let sections: Vec<&str> = kfen.trim().split('/').collect();
    if sections.len() != 4 {
        return Err(KfenError::WrongSectionCount(sections.len()));
    }

    let computer = parse_row(sections[0])?;
    let computer_store = parse_count(sections[1])?;
    let player = parse_row(sections[2])?;
    let player_store = parse_count(sections[3])?;

    if computer.len() != player.len() {
        return Err(KfenError::RowLengthMismatch {
            computer: computer.len(),
            player: player.len(),
        });
    }

    let mut pits = Vec::with_capacity(2 * computer.len() + 2);
    pits.extend_from_slice(&computer);
    pits.push(computer_store);
    pits.extend_from_slice(&player);
    pits.push(player_store);

    Ok(Board::from_pits(&pits)?)
}

/// Encodes a board as a KFEN string.
pub fn encode_kfen(board: &Board) -> String {
    let size = board.size();
    let pits = board.pits();
    let join = |row: &[u32]| {
        row.iter()
            .map(|n| n.to_string())
            .collect::<Vec<_>>()
            .join(",")
    };
    format!(
        "{}/{}/{}/{}",
        join(&pits[..size]),
        board.store(Side::Computer),
        join(&pits[size + 1..2 * size + 1]),
        board.store(Side::Player)
    )
}
