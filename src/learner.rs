//! Temporal-difference learning agent
//!
//! The agent plays with the weighted stochastic policy and remembers the
//! position it reached after each of its own moves. When the game ends the
//! trajectory is replayed backward: each position's estimates are pulled
//! toward the freshly updated estimates of its immediate successor, so
//! credit flows one step at a time rather than from the final outcome
//! directly.

use crate::{
    Error, Result,
    agent::{Agent, RelativeOutcome},
    board::{Board, Move, Player, PositionKey},
    policy::PolicySelector,
    values::ValueStore,
};

/// Self-play learner backed by a [`ValueStore`].
///
/// The agent is bound to one player for its whole lifetime: the stored
/// estimates answer "how good is this layout for me", which depends on
/// which sign is mine.
#[derive(Debug)]
pub struct TdAgent {
    player: Player,
    values: ValueStore,
    selector: PolicySelector,
    trajectory: Vec<PositionKey>,
    record: Vec<RelativeOutcome>,
}

impl TdAgent {
    /// Create a learner for `player` with default parameters
    pub fn new(player: Player) -> Self {
        TdAgent {
            player,
            values: ValueStore::new(),
            selector: PolicySelector::new(),
            trajectory: Vec::new(),
            record: Vec::new(),
        }
    }

    /// Create a learner with an explicit learning rate and win weight.
    ///
    /// # Errors
    ///
    /// Returns an error if the parameters are out of range.
    pub fn with_parameters(player: Player, learning_rate: f64, win_weight: f64) -> Result<Self> {
        Ok(TdAgent {
            player,
            values: ValueStore::with_parameters(learning_rate, win_weight)?,
            selector: PolicySelector::new(),
            trajectory: Vec::new(),
            record: Vec::new(),
        })
    }

    /// Seed the selection RNG for reproducible training
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.selector = PolicySelector::with_seed(seed);
        self
    }

    pub fn player(&self) -> Player {
        self.player
    }

    /// The learned value table
    pub fn values(&self) -> &ValueStore {
        &self.values
    }

    /// Outcomes of all completed games, oldest first
    pub fn record(&self) -> &[RelativeOutcome] {
        &self.record
    }

    /// Positions reached by this agent's moves in the current game
    pub fn trajectory_len(&self) -> usize {
        self.trajectory.len()
    }

    /// Backward credit assignment over the game's trajectory.
    ///
    /// A win makes the last reached position certain, because the winning
    /// move did not depend on any further opponent reply; every other
    /// position bootstraps from its successor's post-update estimates.
    fn propagate(&mut self, outcome: RelativeOutcome) {
        let mut win_target = if outcome == RelativeOutcome::Win {
            1.0
        } else {
            0.0
        };
        let mut draw_target = if outcome == RelativeOutcome::Draw {
            1.0
        } else {
            0.0
        };

        let mut pending: &[PositionKey] = &self.trajectory;
        if outcome == RelativeOutcome::Win {
            if let Some((&last, rest)) = pending.split_last() {
                self.values.mark_won(last);
                pending = rest;
            }
        }

        for &key in pending.iter().rev() {
            self.values.back_up_win(key, win_target);
            self.values.back_up_draw(key, draw_target);
            let updated = self.values.value(key);
            win_target = updated.win_probability;
            draw_target = updated.draw_probability;
        }

        self.trajectory.clear();
    }
}

impl Agent for TdAgent {
    fn choose_move(
        &mut self,
        board: &Board,
        legal_moves: &[Move],
        player: Player,
    ) -> Result<usize> {
        if player != self.player {
            return Err(Error::PlayerMismatch {
                expected: self.player.sign(),
                got: player.sign(),
            });
        }

        let index = self
            .selector
            .select(board, legal_moves, player, &mut self.values)?;
        let chosen = board.make_move(legal_moves[index], player)?;
        self.trajectory.push(chosen.key());
        Ok(index)
    }

    fn observe_outcome(&mut self, outcome: RelativeOutcome) -> Result<()> {
        self.record.push(outcome);
        self.propagate(outcome);
        Ok(())
    }

    fn name(&self) -> &str {
        "TD(0)"
    }
}
