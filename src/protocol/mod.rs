//! Text formats.
//!
//! Parsing of the human's input lines and KFEN, a one-line encoding of a
//! full board position.

pub mod kfen;
pub mod parser;

pub use kfen::{encode_kfen, parse_kfen, KfenError};
pub use parser::{parse_input, Input, EXIT_KEYWORDS};
