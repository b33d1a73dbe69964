//! Kalah engine library.
//!
//! Exposes the board representation, move resolution, the computer's greedy
//! move choice, text formats, and the interactive session used by the
//! binary entry point.

pub mod board;
pub mod movegen;
pub mod protocol;
pub mod render;
pub mod resolve;
pub mod search;
pub mod selfplay;
pub mod session;
pub mod transcript;
