//! Board state representation.
//!
//! The board is stored as one flat array of counters: the computer's row
//! (indices `0..size`), the computer's store (`size`), the player's row
//! (`size + 1..2 * size + 1`) and the player's store (`2 * size + 1`).
//! Sowing walks this array upward with wrap-around, which is counter-clockwise
//! around the physical board.
//!
//! Callers address pits by `(Side, pit number)`, where pit 1 is the pit next
//! to that side's store and pit `size` is the farthest from it. The flat
//! indices are only exposed read-only through [`Board::pits`].

use super::side::{Side, Winner};

/// Errors that can occur when constructing a board.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    #[error("board size must be at least 1")]
    ZeroSize,

    #[error("pit array of length {0} is not 2 * size + 2 for any size >= 1")]
    BadLength(usize),

    #[error("total seed count does not fit in a pit counter")]
    TooManySeeds,
}

/// Sums counters, failing if the total does not fit in `u32`.
fn checked_total(pits: &[u32]) -> Option<u32> {
    pits.iter().try_fold(0u32, |acc, &n| acc.checked_add(n))
}

/// Complete board state: pit counts for both rows and both stores.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    size: usize,
    pits: Vec<u32>,
}

impl Board {
    /// Creates a board in the opening position for `size` pits per side.
    ///
    /// Every non-store pit starts with `size - 2` seeds, or a single seed
    /// when `size < 3`. Both stores start empty.
    pub fn new(size: usize) -> Result<Self, BoardError> {
        if size == 0 {
            return Err(BoardError::ZeroSize);
        }
        let seeds = if size >= 3 {
            u32::try_from(size - 2).map_err(|_| BoardError::TooManySeeds)?
        } else {
            1
        };
        u32::try_from(2 * size)
            .ok()
            .and_then(|pits| pits.checked_mul(seeds))
            .ok_or(BoardError::TooManySeeds)?;
        let mut pits = vec![seeds; 2 * size + 2];
        pits[size] = 0;
        pits[2 * size + 1] = 0;
        Ok(Board { size, pits })
    }

    /// Creates a board from a flat pit array in storage order.
    ///
    /// Seeds are only ever moved, never created, so a board whose total fits
    /// in `u32` can never overflow a counter or a sum during play.
    pub fn from_pits(pits: &[u32]) -> Result<Self, BoardError> {
        let len = pits.len();
        if len < 4 || len % 2 != 0 {
            return Err(BoardError::BadLength(len));
        }
        checked_total(pits).ok_or(BoardError::TooManySeeds)?;
        Ok(Board {
            size: len / 2 - 1,
            pits: pits.to_vec(),
        })
    }

    /// Number of non-store pits on each side.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Total number of counters, stores included.
    pub fn total_pits(&self) -> usize {
        self.pits.len()
    }

    /// Flat read-only view of every counter in storage order.
    pub fn pits(&self) -> &[u32] {
        &self.pits
    }

    pub(crate) fn pits_mut(&mut self) -> &mut [u32] {
        &mut self.pits
    }

    /// Flat index of a side's store.
    pub fn store_index(&self, side: Side) -> usize {
        match side {
            Side::Computer => self.size,
            Side::Player => 2 * self.size + 1,
        }
    }

    /// Flat index of a side's pit, or `None` if `pit` is not in `1..=size`.
    pub fn index_of(&self, side: Side, pit: u32) -> Option<usize> {
        let pit = pit as usize;
        if pit == 0 || pit > self.size {
            return None;
        }
        Some(self.store_index(side) - pit)
    }

    /// Side owning the non-store pit at `index`. Stores and out-of-range
    /// indices return `None`.
    pub fn owner_of(&self, index: usize) -> Option<Side> {
        if index < self.size {
            Some(Side::Computer)
        } else if index > self.size && index < 2 * self.size + 1 {
            Some(Side::Player)
        } else {
            None
        }
    }

    /// Flat index of the pit directly across the board from `index`.
    /// Only meaningful for non-store pits.
    pub fn opposite(&self, index: usize) -> usize {
        2 * self.size - index
    }

    /// Seed count of a side's pit by pit number.
    pub fn pit(&self, side: Side, pit: u32) -> Option<u32> {
        self.index_of(side, pit).map(|i| self.pits[i])
    }

    /// A side's row in pit-number order (pit 1 first).
    pub fn row(&self, side: Side) -> impl Iterator<Item = u32> + '_ {
        let store = self.store_index(side);
        (1..=self.size).map(move |n| self.pits[store - n])
    }

    /// Seeds in a side's store.
    pub fn store(&self, side: Side) -> u32 {
        self.pits[self.store_index(side)]
    }

    /// Sum of a side's non-store pits.
    pub fn row_sum(&self, side: Side) -> u32 {
        self.row(side).sum()
    }

    /// Sum of every counter on the board.
    pub fn total_seeds(&self) -> u32 {
        self.pits.iter().sum()
    }

    /// True once either side's row is completely empty.
    pub fn is_game_over(&self) -> bool {
        self.row_sum(Side::Computer) == 0 || self.row_sum(Side::Player) == 0
    }

    /// Compares the two stores. Seeds left in the rows are not counted.
    pub fn winner(&self) -> Winner {
        let cpu = self.store(Side::Computer);
        let player = self.store(Side::Player);
        if player > cpu {
            Winner::Player
        } else if player == cpu {
            Winner::Tie
        } else {
            Winner::Computer
        }
    }
}
