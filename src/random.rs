//! Uniform-random baseline agent

use rand::{Rng, rngs::StdRng};

use crate::{
    Error, Result,
    agent::{Agent, build_rng},
    board::{Board, Move, Player},
};

/// Picks a legal move uniformly at random. Useful as a training opponent
/// and as a baseline in tests.
#[derive(Debug)]
pub struct RandomAgent {
    rng: StdRng,
}

impl RandomAgent {
    pub fn new() -> Self {
        RandomAgent {
            rng: build_rng(None),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        RandomAgent {
            rng: build_rng(Some(seed)),
        }
    }
}

impl Default for RandomAgent {
    fn default() -> Self {
        Self::new()
    }
}

impl Agent for RandomAgent {
    fn choose_move(
        &mut self,
        _board: &Board,
        legal_moves: &[Move],
        _player: Player,
    ) -> Result<usize> {
        if legal_moves.is_empty() {
            return Err(Error::DegenerateSelection {
                reason: "no candidate moves".to_string(),
            });
        }
        Ok(self.rng.random_range(0..legal_moves.len()))
    }

    fn name(&self) -> &str {
        "Random"
    }
}
