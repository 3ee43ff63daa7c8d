//! Stochastic move selection weighted by position values
//!
//! For each candidate move the selector scores the resulting position with
//! the value store's composite score and then samples one candidate with
//! probability proportional to its score. Higher-valued moves are chosen
//! more often but no positive-scored candidate is ever excluded, which is
//! what gives the learner its exploration.

use rand::{
    distr::{Distribution, weighted::WeightedIndex},
    rngs::StdRng,
};

use crate::{
    Error, Result,
    agent::build_rng,
    board::{Board, Move, Player},
    values::ValueStore,
};

/// Samples a candidate index weighted by composite position scores
#[derive(Debug)]
pub struct PolicySelector {
    rng: StdRng,
    rng_seed: Option<u64>,
}

impl PolicySelector {
    pub fn new() -> Self {
        PolicySelector {
            rng: build_rng(None),
            rng_seed: None,
        }
    }

    /// Use a fixed seed for reproducible selection
    pub fn with_seed(seed: u64) -> Self {
        PolicySelector {
            rng: build_rng(Some(seed)),
            rng_seed: Some(seed),
        }
    }

    pub fn seed(&self) -> Option<u64> {
        self.rng_seed
    }

    /// Pick one of `candidates` for `player`, weighted by the composite
    /// score of each resulting position. Returns the index of the chosen
    /// candidate. The caller's board is never modified; each candidate is
    /// simulated on a copy.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DegenerateSelection`] if `candidates` is empty, if
    /// any score is negative or non-finite, or if all scores are zero.
    pub fn select(
        &mut self,
        board: &Board,
        candidates: &[Move],
        player: Player,
        values: &mut ValueStore,
    ) -> Result<usize> {
        if candidates.is_empty() {
            return Err(Error::DegenerateSelection {
                reason: "no candidate moves".to_string(),
            });
        }

        let mut scores = Vec::with_capacity(candidates.len());
        for &mv in candidates {
            let next = board.make_move(mv, player)?;
            let score = values.composite_score(next.key());
            if !score.is_finite() || score < 0.0 {
                return Err(Error::DegenerateSelection {
                    reason: format!("candidate {mv} has invalid score {score}"),
                });
            }
            scores.push(score);
        }

        if scores.iter().sum::<f64>() <= 0.0 {
            return Err(Error::DegenerateSelection {
                reason: "all candidate scores are zero".to_string(),
            });
        }

        // WeightedIndex normalizes the scores into selection weights
        let distribution =
            WeightedIndex::new(&scores).map_err(|err| Error::DegenerateSelection {
                reason: err.to_string(),
            })?;
        Ok(distribution.sample(&mut self.rng))
    }
}

impl Default for PolicySelector {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_candidate_set_is_rejected() {
        let mut selector = PolicySelector::with_seed(7);
        let mut values = ValueStore::new();
        let err = selector
            .select(&Board::new(), &[], Player::One, &mut values)
            .unwrap_err();
        assert!(matches!(err, Error::DegenerateSelection { .. }));
    }

    #[test]
    fn all_zero_scores_are_rejected() {
        let mut selector = PolicySelector::with_seed(7);
        let mut values = ValueStore::new();
        let board = Board::new();
        let candidates = board.legal_moves();

        // Drive every candidate position's estimates to exactly zero
        for &mv in &candidates {
            let key = board.make_move(mv, Player::One).unwrap().key();
            zero_out(&mut values, key);
        }

        let err = selector
            .select(&board, &candidates, Player::One, &mut values)
            .unwrap_err();
        assert!(matches!(err, Error::DegenerateSelection { .. }));
    }

    /// Force a position's estimates to exactly (0, 0).
    ///
    /// `mark_won` puts the value at (1, 0); one TD step toward -4 with the
    /// default rate 0.2 lands the win estimate exactly on zero.
    fn zero_out(values: &mut ValueStore, key: crate::board::PositionKey) {
        values.mark_won(key);
        values.back_up_win(key, -4.0);
        assert_eq!(values.value(key).win_probability, 0.0);
        assert_eq!(values.value(key).draw_probability, 0.0);
    }

    #[test]
    fn returned_index_is_always_in_range() {
        let mut selector = PolicySelector::with_seed(42);
        let mut values = ValueStore::new();
        let board = Board::new();
        let candidates = board.legal_moves();

        for _ in 0..50 {
            let index = selector
                .select(&board, &candidates, Player::One, &mut values)
                .unwrap();
            assert!(index < candidates.len());
        }
    }

    #[test]
    fn certain_winner_dominates_selection() {
        let mut selector = PolicySelector::with_seed(3);
        let mut values = ValueStore::new();
        let board = Board::new();
        let candidates = board.legal_moves();

        // Make the centre the only position with any value
        for &mv in &candidates {
            let key = board.make_move(mv, Player::One).unwrap().key();
            if mv == Move::new(1, 1) {
                values.mark_won(key);
            } else {
                zero_out(&mut values, key);
            }
        }

        let centre_index = candidates
            .iter()
            .position(|&mv| mv == Move::new(1, 1))
            .unwrap();
        for _ in 0..20 {
            let index = selector
                .select(&board, &candidates, Player::One, &mut values)
                .unwrap();
            assert_eq!(index, centre_index);
        }
    }

    #[test]
    fn fixed_seed_gives_reproducible_choices() {
        let mut values_a = ValueStore::new();
        let mut values_b = ValueStore::new();
        let board = Board::new();
        let candidates = board.legal_moves();

        let mut first = PolicySelector::with_seed(99);
        let mut second = PolicySelector::with_seed(99);

        for _ in 0..10 {
            let a = first
                .select(&board, &candidates, Player::One, &mut values_a)
                .unwrap();
            let b = second
                .select(&board, &candidates, Player::One, &mut values_b)
                .unwrap();
            assert_eq!(a, b);
        }
    }
}
