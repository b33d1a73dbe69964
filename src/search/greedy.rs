//! Greedy move selection for the computer opponent.
//!
//! Scans the side's non-empty pits from pit 1 outward and applies a fixed
//! priority order:
//!
//! 1. the capture with the largest yield (first pit wins ties),
//! 2. the first pit whose last seed lands in the store,
//! 3. the first non-empty pit,
//! 4. a random pit number, only reachable when the row is empty.
//!
//! The search holds no state between calls. Randomness is injected so the
//! fallback is reproducible under a seeded generator.

use rand::Rng;
use serde::Serialize;
use tracing::debug;

use crate::board::{Board, Side};
use crate::resolve::sow;

/// Which rule produced a choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    Capture { yield_: u32 },
    LandInStore,
    FirstNonEmpty,
    Random,
}

/// A chosen pit number together with the rule that selected it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Choice {
    pub pit: u32,
    pub tier: Tier,
}

/// Chooses `side`'s next move on `board`.
pub fn choose_move(board: &Board, side: Side, rng: &mut impl Rng) -> Choice {
    let mut best_capture: Option<(u32, u32)> = None;
    let mut land_in_store = None;
    let mut first_non_empty = None;

    for (seeds, pit) in board.row(side).zip(1u32..) {
        if seeds == 0 {
            continue;
        }
        first_non_empty.get_or_insert(pit);
        if seeds == pit {
            land_in_store.get_or_insert(pit);
        }
        if let Some(taken) = capture_yield(board, side, pit) {
            if best_capture.map_or(true, |(_, best)| taken > best) {
                best_capture = Some((pit, taken));
            }
        }
    }

    let choice = if let Some((pit, yield_)) = best_capture {
        Choice {
            pit,
            tier: Tier::Capture { yield_ },
        }
    } else if let Some(pit) = land_in_store {
        Choice {
            pit,
            tier: Tier::LandInStore,
        }
    } else if let Some(pit) = first_non_empty {
        Choice {
            pit,
            tier: Tier::FirstNonEmpty,
        }
    } else {
        let upper = (board.size() as u32).saturating_sub(1).max(1);
        Choice {
            pit: rng.gen_range(1..=upper),
            tier: Tier::Random,
        }
    };
    debug!(side = side.name(), ?choice, "chose move");
    choice
}

/// Seeds a move would capture, found by playing it on a scratch copy.
/// Lookahead goes through the unlogged rules.
fn capture_yield(board: &Board, side: Side, pit: u32) -> Option<u32> {
    let mut scratch = board.clone();
    sow(&mut scratch, side, u64::from(pit))
        .ok()
        .and_then(|outcome| outcome.captured)
}

#[cfg(test)]
mod tests {
    use std::io::{self, Write};
    use std::sync::{Arc, Mutex};

    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    use super::*;
    use crate::movegen::legal_moves;
    use crate::resolve::apply_move;

    fn rng() -> SmallRng {
        SmallRng::seed_from_u64(42)
    }

    /// Shared buffer that collects formatted log output.
    #[derive(Clone, Default)]
    struct LogBuffer(Arc<Mutex<Vec<u8>>>);

    impl Write for LogBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn capture_lookahead_is_not_logged_as_a_move() {
        let board = Board::from_pits(&[2, 1, 0, 1, 0, 0, 5, 1, 1, 1, 1, 0]).unwrap();
        let logs = LogBuffer::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();

        let choice = tracing::subscriber::with_default(subscriber, || {
            choose_move(&board, Side::Computer, &mut rng())
        });

        let text = String::from_utf8(logs.0.lock().unwrap().clone()).unwrap();
        assert_eq!(choice.tier, Tier::Capture { yield_: 6 });
        assert!(text.contains("chose move"), "{}", text);
        assert!(!text.contains("applied move"), "{}", text);
        assert_eq!(board.pits(), &[2, 1, 0, 1, 0, 0, 5, 1, 1, 1, 1, 0]);
    }

    #[test]
    fn prefers_largest_capture() {
        // cpu pit 2 (idx 3, 1 seed) lands in idx 4 opposite idx 6 (5 seeds).
        // cpu pit 4 (idx 1, 1 seed) lands in idx 2 opposite idx 8 (1 seed).
        let board = Board::from_pits(&[2, 1, 0, 1, 0, 0, 5, 1, 1, 1, 1, 0]).unwrap();
        let choice = choose_move(&board, Side::Computer, &mut rng());
        assert_eq!(choice.pit, 2);
        assert_eq!(choice.tier, Tier::Capture { yield_: 6 });
    }

    #[test]
    fn equal_captures_keep_the_first_pit() {
        // pits 2 and 4 both capture 2 seeds.
        let board = Board::from_pits(&[2, 1, 0, 1, 0, 0, 1, 1, 1, 1, 1, 0]).unwrap();
        let choice = choose_move(&board, Side::Computer, &mut rng());
        assert_eq!(choice.pit, 2);
        assert_eq!(choice.tier, Tier::Capture { yield_: 2 });
    }

    #[test]
    fn capture_beats_landing_in_store() {
        // pit 1 (idx 4, 1 seed) lands in the store; pit 3 (idx 2, 1 seed) captures.
        let board = Board::from_pits(&[0, 0, 1, 0, 1, 0, 1, 4, 1, 1, 1, 0]).unwrap();
        let choice = choose_move(&board, Side::Computer, &mut rng());
        assert_eq!(choice.pit, 3);
        assert_eq!(choice.tier, Tier::Capture { yield_: 5 });
    }

    #[test]
    fn lands_in_store_when_no_capture() {
        let board = Board::new(5).unwrap();
        let choice = choose_move(&board, Side::Computer, &mut rng());
        assert_eq!(choice.pit, 3);
        assert_eq!(choice.tier, Tier::LandInStore);
    }

    #[test]
    fn falls_back_to_first_non_empty() {
        let board = Board::from_pits(&[0, 5, 5, 5, 0, 0, 3, 3, 3, 3, 3, 0]).unwrap();
        let choice = choose_move(&board, Side::Computer, &mut rng());
        assert_eq!(choice.pit, 2);
        assert_eq!(choice.tier, Tier::FirstNonEmpty);
    }

    #[test]
    fn works_for_the_player_side() {
        let board = Board::new(6).unwrap();
        let choice = choose_move(&board, Side::Player, &mut rng());
        assert_eq!(choice.pit, 4);
        assert_eq!(choice.tier, Tier::LandInStore);
    }

    #[test]
    fn random_fallback_is_seeded_and_in_range() {
        let board = Board::from_pits(&[0, 0, 0, 0, 0, 7, 1, 1, 1, 1, 1, 0]).unwrap();
        let a = choose_move(&board, Side::Computer, &mut SmallRng::seed_from_u64(9));
        let b = choose_move(&board, Side::Computer, &mut SmallRng::seed_from_u64(9));
        assert_eq!(a, b);
        assert_eq!(a.tier, Tier::Random);
        assert!((1..=4).contains(&a.pit));

        let tiny = Board::from_pits(&[0, 2, 1, 0]).unwrap();
        let c = choose_move(&tiny, Side::Computer, &mut rng());
        assert_eq!(c.pit, 1);
    }

    #[test]
    fn never_picks_an_empty_pit() {
        let mut board = Board::new(6).unwrap();
        let mut rng = rng();
        let mut side = Side::Computer;
        let total = board.total_seeds();
        for _ in 0..10_000 {
            if board.is_game_over() {
                break;
            }
            let choice = choose_move(&board, side, &mut rng);
            assert!(legal_moves(&board, side).contains(&choice.pit));
            let outcome = apply_move(&mut board, side, u64::from(choice.pit)).unwrap();
            assert_eq!(board.total_seeds(), total);
            if outcome.turn_over {
                side = side.opponent();
            }
        }
    }
}
