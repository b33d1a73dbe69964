//! Board representation.
//!
//! Contains the two sides, the game result type, and the flat pit array
//! that holds both rows and both stores.

pub mod side;
pub mod state;

pub use side::{Side, Winner, ALL_SIDES};
pub use state::{Board, BoardError};
