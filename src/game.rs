//! Game-loop driver
//!
//! The driver owns the authoritative board, alternates the two agents
//! starting with player one, applies each chosen move (rejecting moves
//! onto occupied cells) and evaluates after every ply. On termination both
//! agents are notified with their own relative outcome.
//!
//! Errors from automated agents are fatal and propagate to the caller;
//! silently continuing would risk infinite loops or corrupted learning.
//! Agents that recover from input errors (the human player) are reported
//! to and re-prompted without advancing the turn.

use crate::{
    Error, Result,
    agent::{Agent, RelativeOutcome},
    board::{Board, Move, Player},
    evaluator::{Evaluator, GameResult},
};

/// Drives a single game between two agents
#[derive(Debug, Default)]
pub struct Game {
    board: Board,
    evaluator: Evaluator,
    plies: usize,
}

impl Game {
    pub fn new() -> Self {
        Self::default()
    }

    /// The board as it currently stands
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Number of moves applied so far
    pub fn plies(&self) -> usize {
        self.plies
    }

    /// Play a game to completion. `first` moves as player one, `second` as
    /// player two. Returns the final result; both agents have already been
    /// notified with their sign-relative outcome.
    pub fn play(&mut self, first: &mut dyn Agent, second: &mut dyn Agent) -> Result<GameResult> {
        let mut player = Player::One;

        let result = loop {
            let legal = self.board.legal_moves();
            let agent: &mut dyn Agent = match player {
                Player::One => &mut *first,
                Player::Two => &mut *second,
            };

            match Self::take_turn(&self.board, agent, &legal, player) {
                Ok(next) => {
                    self.board = next;
                    self.plies += 1;
                    let result = self.evaluator.evaluate(&self.board);
                    if result.is_over() {
                        break result;
                    }
                    player = player.opponent();
                }
                Err(err) if agent.recovers_from_input_errors() && err.is_user_recoverable() => {
                    // Same player goes again; the turn is not advanced
                    eprintln!("Invalid move: {err}. Please try again.");
                }
                Err(err) => return Err(err),
            }
        };

        self.notify(first, second, result)?;
        Ok(result)
    }

    fn take_turn(
        board: &Board,
        agent: &mut dyn Agent,
        legal: &[Move],
        player: Player,
    ) -> Result<Board> {
        let index = agent.choose_move(board, legal, player)?;
        let mv = *legal.get(index).ok_or_else(|| Error::InvalidSelection {
            input: index.to_string(),
        })?;
        board.make_move(mv, player)
    }

    fn notify(
        &self,
        first: &mut dyn Agent,
        second: &mut dyn Agent,
        result: GameResult,
    ) -> Result<()> {
        let for_first =
            RelativeOutcome::from_result(result, Player::One).ok_or(Error::InvalidConfiguration {
                message: "game ended without a final result".to_string(),
            })?;
        first.observe_outcome(for_first)?;
        second.observe_outcome(for_first.flipped())?;
        Ok(())
    }
}
