//! Line input parser.
//!
//! Turns one raw line typed by the human into an [`Input`] the session can
//! dispatch on.

/// A parsed line of human input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    /// End the session immediately.
    Quit,

    /// Play the pit with this number (not yet range-checked).
    Pit(u64),

    /// Anything else; carries the trimmed text.
    Invalid(String),
}

/// Words that end the session.
pub const EXIT_KEYWORDS: [&str; 4] = ["exit", "quit", "q", "x"];

/// Parses a single line of input.
pub fn parse_input(line: &str) -> Input {
    let trimmed = line.trim();
    if EXIT_KEYWORDS.contains(&trimmed) {
        return Input::Quit;
    }
    match trimmed.parse::<u64>() {
        Ok(pit) if !trimmed.starts_with('+') => Input::Pit(pit),
        _ => Input::Invalid(trimmed.to_string()),
    }
}
