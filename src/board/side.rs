//! The two sides of the board and the result of a finished game.

use serde::Serialize;

/// One of the two players sharing the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Computer,
    Player,
}

/// Both sides, computer first (matching flat-array order).
pub const ALL_SIDES: [Side; 2] = [Side::Computer, Side::Player];

impl Side {
    /// Returns the other side.
    pub const fn opponent(self) -> Side {
        match self {
            Side::Computer => Side::Player,
            Side::Player => Side::Computer,
        }
    }

    /// Short lowercase name used in display and logs.
    pub const fn name(self) -> &'static str {
        match self {
            Side::Computer => "cpu",
            Side::Player => "player",
        }
    }
}

/// Outcome of a finished game, decided by comparing store counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Winner {
    Computer,
    Player,
    Tie,
}

impl Winner {
    /// The message shown to the human at the end of a game.
    pub const fn message(self) -> &'static str {
        match self {
            Winner::Computer => "cpu wins!",
            Winner::Player => "you win!",
            Winner::Tie => "it's a tie!",
        }
    }
}

impl From<Side> for Winner {
    fn from(side: Side) -> Self {
        match side {
            Side::Computer => Winner::Computer,
            Side::Player => Winner::Player,
        }
    }
}
