//! Agent capability surface shared by all players
//!
//! Anything that can take a turn implements [`Agent`]: the TD learner, the
//! negamax searcher, the random baseline and the interactive human player.
//! The game driver owns the authoritative board and only ever asks an
//! agent for an index into the legal-move list it supplies.

use rand::{SeedableRng, rngs::StdRng};
use serde::{Deserialize, Serialize};

use crate::{
    Result,
    board::{Board, Move, Player},
    evaluator::GameResult,
};

/// Game outcome relative to one participant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RelativeOutcome {
    Win,
    Draw,
    Loss,
}

impl RelativeOutcome {
    /// View a finished game from `player`'s side; `None` while the game is
    /// still in progress.
    pub fn from_result(result: GameResult, player: Player) -> Option<RelativeOutcome> {
        match result {
            GameResult::InProgress => None,
            GameResult::Draw => Some(RelativeOutcome::Draw),
            GameResult::Won(winner) if winner == player => Some(RelativeOutcome::Win),
            GameResult::Won(_) => Some(RelativeOutcome::Loss),
        }
    }

    /// The same outcome seen from the other side of the board
    pub fn flipped(self) -> RelativeOutcome {
        match self {
            RelativeOutcome::Win => RelativeOutcome::Loss,
            RelativeOutcome::Loss => RelativeOutcome::Win,
            RelativeOutcome::Draw => RelativeOutcome::Draw,
        }
    }
}

/// Unified interface for move-making participants.
///
/// The driver calls `choose_move` on each turn and `observe_outcome` on
/// both agents once the game is over. Non-learning agents keep the default
/// no-op `observe_outcome`.
pub trait Agent {
    /// Pick a move for `player` on `board`.
    ///
    /// Returns an index into `legal_moves`, which the caller guarantees to
    /// be the empty cells of `board`.
    ///
    /// # Errors
    ///
    /// Returns an error if no sensible choice exists (empty candidate set,
    /// terminal board, degenerate selection weights, bad interactive
    /// input).
    fn choose_move(
        &mut self,
        board: &Board,
        legal_moves: &[Move],
        player: Player,
    ) -> Result<usize>;

    /// Notification that the game ended with `outcome` for this agent.
    ///
    /// The default does nothing; learning agents run their value updates
    /// here.
    fn observe_outcome(&mut self, _outcome: RelativeOutcome) -> Result<()> {
        Ok(())
    }

    /// Name used in reports and logs
    fn name(&self) -> &str;

    /// Whether the driver should re-prompt this agent after a bad input
    /// instead of aborting the game. Only interactive agents return true;
    /// silently retrying an automated agent risks an infinite loop.
    fn recovers_from_input_errors(&self) -> bool {
        false
    }
}

/// RNG construction shared by the stochastic agents
pub(crate) fn build_rng(seed: Option<u64>) -> StdRng {
    if let Some(seed) = seed {
        StdRng::seed_from_u64(seed)
    } else {
        StdRng::from_rng(&mut rand::rng())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_outcome_from_result() {
        let won_one = GameResult::Won(Player::One);
        assert_eq!(
            RelativeOutcome::from_result(won_one, Player::One),
            Some(RelativeOutcome::Win)
        );
        assert_eq!(
            RelativeOutcome::from_result(won_one, Player::Two),
            Some(RelativeOutcome::Loss)
        );
        assert_eq!(
            RelativeOutcome::from_result(GameResult::Draw, Player::Two),
            Some(RelativeOutcome::Draw)
        );
        assert_eq!(
            RelativeOutcome::from_result(GameResult::InProgress, Player::One),
            None
        );
    }

    #[test]
    fn flipping_swaps_win_and_loss() {
        assert_eq!(RelativeOutcome::Win.flipped(), RelativeOutcome::Loss);
        assert_eq!(RelativeOutcome::Loss.flipped(), RelativeOutcome::Win);
        assert_eq!(RelativeOutcome::Draw.flipped(), RelativeOutcome::Draw);
    }
}
