//! Move selection.
//!
//! The computer plays a fixed greedy heuristic rather than a tree search.

pub mod greedy;

pub use greedy::{choose_move, Choice, Tier};
