//! Board display.
//!
//! The computer's row is drawn on top, right to left from its store, so that
//! sowing runs counter-clockwise on screen. The computer's store sits on the
//! left, the player's store on the right, and the player's row reads left to
//! right towards its store.

use crate::board::{Board, Side};

const GREEN: &str = "\x1b[1;32m";
const CYAN: &str = "\x1b[1;36m";
const RESET: &str = "\x1b[0m";

/// Wraps `text` in an ANSI color when `color` is set.
fn paint(text: &str, code: &str, color: bool) -> String {
    if color {
        format!("{}{}{}", code, text, RESET)
    } else {
        text.to_string()
    }
}

/// Renders the board as display lines: the computer's row, the store line,
/// and the player's row.
pub fn render(board: &Board, color: bool) -> Vec<String> {
    let pits = board.pits();
    let size = board.size();

    let mut top = String::new();
    for &seeds in pits[..size].iter().rev() {
        top.push('\t');
        top.push_str(&paint(&seeds.to_string(), GREEN, color));
    }

    let dashes = vec!["-"; size].join("\t");
    let middle = paint(
        &format!(
            "cpu: {} |{}| player: {}",
            board.store(Side::Computer),
            dashes,
            board.store(Side::Player)
        ),
        CYAN,
        color,
    );

    let mut bottom = String::new();
    for &seeds in &pits[size + 1..2 * size + 1] {
        bottom.push('\t');
        bottom.push_str(&paint(&seeds.to_string(), GREEN, color));
    }

    vec![top, middle, bottom]
}
