//! Depth-limited negamax search opponent
//!
//! Zero-sum adversarial search: a position's value for the mover is the
//! negation of its value for the opponent, so one recursive form covers
//! both sides. The search is exhaustive up to the depth limit; with depth
//! 9 it covers the whole Tic-Tac-Toe game tree.

use crate::{
    Error, Result,
    agent::Agent,
    board::{Board, Move, Player},
    evaluator::Evaluator,
};

/// Depth that covers the full 3x3 game tree
pub const FULL_DEPTH: u32 = 9;

/// Sentinel strictly below the worst real outcome (-1, a loss)
const VALUE_FLOOR: i32 = -2;

/// What a (sub)search concluded about a position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOutcome {
    /// Game-theoretic value from the mover's perspective (+1 win, 0 draw,
    /// -1 loss); a heuristic placeholder when the horizon was reached
    pub value: i32,
    /// Best move found, absent at terminal boards and at the horizon
    pub best: Option<Move>,
    /// Whether the game is already over at this board
    pub terminal: bool,
}

/// Brute-force search agent.
///
/// Owns its result-cache evaluator; the cache carries over between games
/// since evaluation results never change.
#[derive(Debug)]
pub struct NegamaxAgent {
    depth: u32,
    evaluator: Evaluator,
}

impl NegamaxAgent {
    /// Create a search agent with the given depth limit.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SearchDepthZero`] for a zero depth, which could
    /// never produce a move.
    pub fn new(depth: u32) -> Result<Self> {
        if depth == 0 {
            return Err(Error::SearchDepthZero);
        }
        Ok(NegamaxAgent {
            depth,
            evaluator: Evaluator::new(),
        })
    }

    /// A searcher that always sees to the end of the game
    pub fn exhaustive() -> Self {
        NegamaxAgent {
            depth: FULL_DEPTH,
            evaluator: Evaluator::new(),
        }
    }

    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// Recursive negamax over `board` with `player` to move.
    ///
    /// Terminal boards short-circuit with the signed outcome and no move;
    /// at depth 0 the horizon value (the relative outcome of this node,
    /// zero when not terminal) is returned with no move. Callers must
    /// check `terminal` before using the returned move.
    pub fn negamax(&mut self, board: &Board, player: Player, depth: u32) -> Result<SearchOutcome> {
        let (over, score) = self.evaluator.evaluate_for(board, player);
        if over {
            return Ok(SearchOutcome {
                value: i32::from(score),
                best: None,
                terminal: true,
            });
        }
        if depth == 0 {
            return Ok(SearchOutcome {
                value: i32::from(score),
                best: None,
                terminal: false,
            });
        }

        let mut best_value = VALUE_FLOOR;
        let mut best_move = None;

        for mv in board.legal_moves() {
            let child = board.make_move(mv, player)?;
            let reply = self.negamax(&child, player.opponent(), depth - 1)?;
            // What is good for the opponent is bad for us
            let value = -reply.value;
            if value > best_value {
                best_value = value;
                best_move = Some(mv);
            }
        }

        Ok(SearchOutcome {
            value: best_value,
            best: best_move,
            terminal: false,
        })
    }
}

impl Agent for NegamaxAgent {
    fn choose_move(
        &mut self,
        board: &Board,
        legal_moves: &[Move],
        player: Player,
    ) -> Result<usize> {
        let outcome = self.negamax(board, player, self.depth)?;
        let best = outcome.best.ok_or(Error::SearchOnTerminalBoard)?;
        legal_moves
            .iter()
            .position(|&mv| mv == best)
            .ok_or(Error::InvalidSelection {
                input: best.to_string(),
            })
    }

    fn name(&self) -> &str {
        "Negamax"
    }
}
