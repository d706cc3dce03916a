//! Move selection for the computer player.

use rand::{seq::SliceRandom, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, instrument};

use crate::{
    board::{Board, Mark, CENTER, CORNERS, WIN_SEQUENCES},
    config::Strategy,
};

/// Picks a square for `mark` to play. Returns `None` only when the board is full.
pub trait MoveAdvisor: std::fmt::Debug {
    fn choose_move(&mut self, board: &Board, mark: Mark) -> Option<usize>;
}

/// Take a win, block a loss, then center, a corner, anything.
///
/// Only looks one move ahead, so a fork beats it.
#[derive(Debug)]
pub struct HeuristicAdvisor {
    rng: ChaCha8Rng,
}

#[derive(Debug)]
pub struct RandomAdvisor {
    rng: ChaCha8Rng,
}

impl HeuristicAdvisor {
    pub fn new(rng: ChaCha8Rng) -> Self {
        Self { rng }
    }
}

impl RandomAdvisor {
    pub fn new(rng: ChaCha8Rng) -> Self {
        Self { rng }
    }
}

impl MoveAdvisor for HeuristicAdvisor {
    #[instrument(skip(self, board))]
    fn choose_move(&mut self, board: &Board, mark: Mark) -> Option<usize> {
        if let Some(index) = completing_square(board, mark) {
            debug!(index, "taking the win");
            return Some(index);
        }
        if let Some(index) = completing_square(board, mark.swap()) {
            debug!(index, "blocking");
            return Some(index);
        }
        if board.is_valid_move(CENTER) {
            return Some(CENTER);
        }

        let corners: Vec<usize> = CORNERS
            .into_iter()
            .filter(|i| board.is_valid_move(*i))
            .collect();
        if let Some(index) = corners.choose(&mut self.rng) {
            return Some(*index);
        }

        random_square(board, &mut self.rng)
    }
}

impl MoveAdvisor for RandomAdvisor {
    #[instrument(skip(self, board))]
    fn choose_move(&mut self, board: &Board, _mark: Mark) -> Option<usize> {
        random_square(board, &mut self.rng)
    }
}

/// The empty square that gives `mark` a full line, scanning lines in order.
pub fn completing_square(board: &Board, mark: Mark) -> Option<usize> {
    WIN_SEQUENCES.iter().find_map(|seq| {
        let owned = seq.iter().filter(|i| board.get(**i) == Some(mark)).count();
        let mut empty = seq.iter().copied().filter(|i| board.is_valid_move(*i));
        match (owned, empty.next(), empty.next()) {
            (2, Some(index), None) => Some(index),
            _ => None,
        }
    })
}

fn random_square(board: &Board, rng: &mut ChaCha8Rng) -> Option<usize> {
    let empty: Vec<usize> = board.empty_squares().collect();
    empty.choose(rng).copied()
}

impl Strategy {
    /// Builds the advisor for this strategy. A fixed seed makes its choices repeatable.
    pub fn advisor(self, seed: Option<u64>) -> Box<dyn MoveAdvisor> {
        let rng = match seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        match self {
            Strategy::Heuristic => Box::new(HeuristicAdvisor::new(rng)),
            Strategy::Random => Box::new(RandomAdvisor::new(rng)),
        }
    }
}
