//! Interactive game session.
//!
//! Holds the board and the display sink for one game against the computer.
//! Each line the human types goes through [`Session::handle_input`]; a valid
//! player move that ends the player's turn is answered by the computer,
//! which keeps moving for as long as it earns extra turns.

use std::io::{self, Write};
use std::thread;
use std::time::Duration;

use rand::rngs::SmallRng;
use rand::SeedableRng;
use tracing::{debug, info};

use crate::board::{Board, BoardError, Side, Winner};
use crate::protocol::{parse_input, Input};
use crate::render::render;
use crate::resolve::apply_move;
use crate::search::choose_move;

/// Default number of pits per side.
pub const DEFAULT_SIZE: usize = 6;

/// Pause after the invalid-move signal when slow feedback is on.
pub const INVALID_MOVE_DELAY: Duration = Duration::from_millis(500);

/// Settings for a new session.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Pits per side.
    pub size: usize,
    /// Pause briefly after reporting an invalid move.
    pub slow_feedback: bool,
    /// Use ANSI colors when drawing the board.
    pub color: bool,
    /// Seed for the computer's fallback randomness (None = entropy).
    pub seed: Option<u64>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        SessionConfig {
            size: DEFAULT_SIZE,
            slow_feedback: true,
            color: true,
            seed: None,
        }
    }
}

/// One game between the human (the player) and the computer.
pub struct Session<W: Write> {
    board: Board,
    out: W,
    slow_feedback: bool,
    color: bool,
    rng: SmallRng,
}

impl<W: Write> Session<W> {
    /// Starts a game on a fresh board of `size` pits per side.
    pub fn new(size: usize, out: W, slow_feedback: bool) -> Result<Self, BoardError> {
        Ok(Self::with_board(Board::new(size)?, out, slow_feedback))
    }

    /// Starts a game from an arbitrary position.
    pub fn with_board(board: Board, out: W, slow_feedback: bool) -> Self {
        Session {
            board,
            out,
            slow_feedback,
            color: false,
            rng: SmallRng::from_entropy(),
        }
    }

    /// Starts a game from `config` on a fresh board.
    pub fn from_config(config: &SessionConfig, out: W) -> Result<Self, BoardError> {
        let session = Self::new(config.size, out, config.slow_feedback)?.with_color(config.color);
        Ok(match config.seed {
            Some(seed) => session.with_rng(SmallRng::seed_from_u64(seed)),
            None => session,
        })
    }

    /// Turns ANSI colors on or off.
    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    /// Replaces the random source used by the computer's fallback rule.
    pub fn with_rng(mut self, rng: SmallRng) -> Self {
        self.rng = rng;
        self
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Consumes the session and returns the display sink.
    pub fn into_output(self) -> W {
        self.out
    }

    pub fn is_game_over(&self) -> bool {
        self.board.is_game_over()
    }

    pub fn winner(&self) -> Winner {
        self.board.winner()
    }

    /// Handles one raw line of human input. Returns whether the session
    /// should end, either because the human asked to leave or because the
    /// game is over.
    pub fn handle_input(&mut self, line: &str) -> io::Result<bool> {
        let pit = match parse_input(line) {
            Input::Quit => {
                info!("player quit");
                return Ok(true);
            }
            Input::Invalid(text) => {
                debug!(input = %text, "unparseable input");
                self.invalid_move()?;
                return Ok(false);
            }
            Input::Pit(pit) => pit,
        };

        match apply_move(&mut self.board, Side::Player, pit) {
            Ok(outcome) => {
                if outcome.turn_over && !self.board.is_game_over() {
                    self.computer_plays()?;
                }
                Ok(self.board.is_game_over())
            }
            Err(e) => {
                debug!(error = %e, "rejected player move");
                self.invalid_move()?;
                Ok(false)
            }
        }
    }

    /// Draws the board to the display sink.
    pub fn print_board(&mut self) -> io::Result<()> {
        writeln!(self.out)?;
        for line in render(&self.board, self.color) {
            writeln!(self.out, "{}", line)?;
        }
        self.out.flush()
    }

    /// Announces the winner.
    pub fn print_winner(&mut self) -> io::Result<()> {
        let winner = self.board.winner();
        info!(?winner, "game over");
        writeln!(self.out, "{}", winner.message())?;
        self.out.flush()
    }

    /// Plays the computer's turn, chaining extra turns until it ends.
    fn computer_plays(&mut self) -> io::Result<()> {
        while !self.board.is_game_over() {
            self.print_board()?;
            let choice = choose_move(&self.board, Side::Computer, &mut self.rng);
            writeln!(self.out, "cpu: {}", choice.pit)?;
            match apply_move(&mut self.board, Side::Computer, u64::from(choice.pit)) {
                Ok(outcome) if outcome.turn_over => break,
                Ok(_) => {}
                Err(e) => debug!(error = %e, "computer chose an unplayable pit"),
            }
        }
        Ok(())
    }

    /// Emits the invalid-move signal.
    fn invalid_move(&mut self) -> io::Result<()> {
        writeln!(self.out, "?")?;
        self.out.flush()?;
        if self.slow_feedback {
            thread::sleep(INVALID_MOVE_DELAY);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::movegen::random_move;
    use crate::protocol::parse_kfen;
    use crate::transcript::Tee;

    fn session(kfen: &str) -> Session<Vec<u8>> {
        Session::with_board(parse_kfen(kfen).unwrap(), Vec::new(), false)
            .with_rng(SmallRng::seed_from_u64(3))
    }

    fn output(session: Session<Vec<u8>>) -> String {
        String::from_utf8(session.into_output()).unwrap()
    }

    #[test]
    fn exit_keywords_end_the_session_untouched() {
        for word in ["exit", "quit", "q", "x"] {
            let mut s = Session::new(5, Vec::new(), false).unwrap();
            let before = s.board().clone();
            assert!(s.handle_input(word).unwrap());
            assert_eq!(s.board(), &before);
        }
    }

    #[test]
    fn garbage_is_rejected_without_mutation() {
        for line in ["💩", "-", " ", "e"] {
            let mut s = Session::new(5, Vec::new(), false).unwrap();
            let before = s.board().clone();
            assert!(!s.handle_input(line).unwrap());
            assert_eq!(s.board(), &before);
            assert_eq!(output(s), "?\n");
        }
    }

    #[test]
    fn numeric_input_continues_the_session() {
        for line in ["5", "6", "3"] {
            let mut board = Board::new(5).unwrap();
            // Empty computer pit 5 and player pit 4.
            let mut pits = board.pits().to_vec();
            pits[0] = 0;
            pits[7] = 0;
            board = Board::from_pits(&pits).unwrap();
            let mut s = Session::with_board(board, Vec::new(), false);
            assert!(!s.handle_input(line).unwrap(), "input {}", line);
        }
    }

    #[test]
    fn illegal_pit_is_rejected_without_mutation() {
        let mut s = session("0,3,3,3,3/0/3,0,3,3,3/0");
        assert!(!s.handle_input("4").unwrap());
        assert!(!s.handle_input("0").unwrap());
        assert!(!s.handle_input("99999999999999999999").unwrap());
        assert_eq!(s.board().pits(), &[0, 3, 3, 3, 3, 0, 3, 0, 3, 3, 3, 0]);
        assert_eq!(output(s), "?\n?\n?\n");
    }

    #[test]
    fn player_capture_does_not_hand_over_the_turn() {
        let mut s = session("3,3,3,3,3/0/0,1,4,1,0/0");
        assert!(!s.handle_input("2").unwrap());
        assert_eq!(s.board().pits(), &[0, 3, 3, 3, 3, 0, 0, 1, 4, 0, 0, 4]);
        assert!(!output(s).contains("cpu: "));
    }

    #[test]
    fn ending_the_turn_lets_the_computer_move() {
        let mut s = session("0,3,3,3,3/0/3,0,3,3,3/0");
        assert!(!s.handle_input("5").unwrap());
        // Computer pit 3 (3 seeds) lands in its store, then pit 1 (4 seeds)
        // finishes on the player's side.
        assert_eq!(s.board().pits(), &[0, 3, 0, 4, 0, 2, 1, 2, 5, 4, 3, 0]);
        let text = output(s);
        assert!(text.contains("cpu: 3\n"));
        assert!(text.contains("cpu: 1\n"));
    }

    #[test]
    fn final_move_ends_the_session() {
        let mut s = session("0,0,0,0,1/0/0,0,0,0,1/0");
        assert!(s.handle_input("1").unwrap());
        assert!(s.is_game_over());
        assert_eq!(s.winner(), Winner::Player);
        s.print_winner().unwrap();
        assert!(output(s).ends_with("you win!\n"));
    }

    #[test]
    fn full_game_against_random_moves_terminates() {
        let mut s = Session::new(6, Vec::new(), false)
            .unwrap()
            .with_rng(SmallRng::seed_from_u64(11));
        let mut rng = SmallRng::seed_from_u64(5);
        let total = s.board().total_seeds();
        let mut ended = false;
        for _ in 0..10_000 {
            let pit = random_move(s.board(), Side::Player, &mut rng).unwrap();
            if s.handle_input(&pit.to_string()).unwrap() {
                ended = true;
                break;
            }
            assert_eq!(s.board().total_seeds(), total);
        }
        assert!(ended);
        assert!(s.is_game_over());
    }

    #[test]
    fn print_board_writes_three_rows() {
        let mut s = session("1,2,3/7/4,5,6/9");
        s.print_board().unwrap();
        assert_eq!(
            output(s),
            "\n\t3\t2\t1\ncpu: 7 |-\t-\t-| player: 9\n\t4\t5\t6\n"
        );
    }

    #[test]
    fn transcript_receives_a_copy_of_the_display() {
        let mut s = Session::new(5, Tee::new(Vec::new(), Vec::new()), false).unwrap();
        s.print_board().unwrap();
        s.handle_input("what").unwrap();
        let (display, transcript) = s.into_output().into_inner();
        assert!(!display.is_empty());
        assert_eq!(display, transcript);
    }

    #[test]
    fn config_defaults_match_the_classic_game() {
        let config = SessionConfig::default();
        assert_eq!(config.size, 6);
        assert!(config.slow_feedback);
        let s = Session::from_config(
            &SessionConfig {
                slow_feedback: false,
                seed: Some(1),
                ..config
            },
            Vec::new(),
        )
        .unwrap();
        assert_eq!(s.board().size(), 6);
    }
}
