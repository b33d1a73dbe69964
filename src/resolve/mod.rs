//! Move resolution.
//!
//! Applies a single move to the board: sowing, the capture rule, the
//! extra-turn rule, and the game-over override.

pub mod sowing;

pub(crate) use sowing::sow;
pub use sowing::{apply_move, MoveError, MoveOutcome};
