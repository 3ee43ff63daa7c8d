//! Win/loss/draw evaluation with memoization
//!
//! The evaluator computes the sum of every row, every column and both
//! diagonals. A line summing to +3 is a win for player one, -3 a win for
//! player two. Results are cached per distinct board layout so that the
//! same position is never scored twice.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::board::{Board, Player, PositionKey, SIZE};

/// Result of evaluating a board.
///
/// `InProgress` is distinct from `Draw`: a position that is not over has no
/// outcome, and `score_for` reports 0 for it without ever being mistaken
/// for a draw signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameResult {
    InProgress,
    Won(Player),
    Draw,
}

impl GameResult {
    /// Whether the game is over at this position
    pub fn is_over(self) -> bool {
        !matches!(self, GameResult::InProgress)
    }

    /// The winner, if there is one
    pub fn winner(self) -> Option<Player> {
        match self {
            GameResult::Won(player) => Some(player),
            _ => None,
        }
    }

    /// Signed outcome relative to `player`: +1 win, -1 loss, 0 otherwise.
    ///
    /// For an unfinished position this is the zero placeholder, not a draw.
    pub fn score_for(self, player: Player) -> i8 {
        match self {
            GameResult::Won(winner) if winner == player => 1,
            GameResult::Won(_) => -1,
            _ => 0,
        }
    }
}

/// Board evaluator with a result cache keyed by layout.
///
/// The cache grows without eviction; the reachable state space is at most
/// 3^9 layouts, so this stays small for the lifetime of a session.
#[derive(Debug, Default)]
pub struct Evaluator {
    cache: HashMap<PositionKey, GameResult>,
}

impl Evaluator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Evaluate a board, reusing the cached result when the layout has been
    /// seen before. Identical layouts always yield identical results.
    pub fn evaluate(&mut self, board: &Board) -> GameResult {
        let key = board.key();
        if let Some(&result) = self.cache.get(&key) {
            return result;
        }
        let result = Self::score(board);
        self.cache.insert(key, result);
        result
    }

    /// Player-relative view: `(is_over, signed_outcome)`.
    ///
    /// The relative outcome is derived by sign from the player-agnostic
    /// cached result and is never itself stored, so both perspectives share
    /// one cache entry without colliding.
    pub fn evaluate_for(&mut self, board: &Board, player: Player) -> (bool, i8) {
        let result = self.evaluate(board);
        (result.is_over(), result.score_for(player))
    }

    /// Number of distinct layouts scored so far
    pub fn cached_positions(&self) -> usize {
        self.cache.len()
    }

    fn score(board: &Board) -> GameResult {
        let mut row_sums = [0i8; SIZE];
        let mut col_sums = [0i8; SIZE];
        let mut diag_sums = [0i8; 2];
        let mut full = true;

        for row in 0..SIZE {
            for col in 0..SIZE {
                let cell = board.get(row, col);
                if cell == 0 {
                    full = false;
                }
                row_sums[row] += cell;
                col_sums[col] += cell;
                if row == col {
                    diag_sums[0] += cell;
                }
                if row + col == SIZE - 1 {
                    diag_sums[1] += cell;
                }
            }
        }

        // Scan rows, then columns, then the two diagonals; the first
        // decisive line settles the result. Simultaneous wins for both
        // players cannot arise because play stops at the first win.
        let lines = row_sums.iter().chain(col_sums.iter()).chain(diag_sums.iter());
        for &sum in lines {
            if sum == SIZE as i8 {
                return GameResult::Won(Player::One);
            }
            if sum == -(SIZE as i8) {
                return GameResult::Won(Player::Two);
            }
        }

        if full {
            GameResult::Draw
        } else {
            GameResult::InProgress
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Move;

    fn board(cells: [[i8; 3]; 3]) -> Board {
        Board::from_cells(cells).unwrap()
    }

    #[test]
    fn row_win_for_player_one() {
        let mut evaluator = Evaluator::new();
        let result = evaluator.evaluate(&board([[1, 1, 1], [-1, -1, 0], [0, 0, 0]]));
        assert!(result.is_over());
        assert_eq!(result.winner(), Some(Player::One));
    }

    #[test]
    fn every_row_and_column_is_checked() {
        let mut evaluator = Evaluator::new();
        let wins = [
            board([[1, 1, 1], [0, -1, 0], [-1, 0, 0]]),
            board([[0, -1, 0], [1, 1, 1], [-1, 0, 0]]),
            board([[0, -1, 0], [-1, 0, 0], [1, 1, 1]]),
            board([[1, 0, -1], [1, 0, 0], [1, -1, 0]]),
            board([[0, 1, -1], [0, 1, 0], [-1, 1, 0]]),
            board([[-1, 0, 1], [0, -1, 1], [0, 0, 1]]),
        ];
        for b in wins {
            assert_eq!(evaluator.evaluate(&b), GameResult::Won(Player::One));
        }
    }

    #[test]
    fn diagonal_win_for_player_two() {
        let mut evaluator = Evaluator::new();
        let main = board([[-1, 1, 0], [1, -1, 0], [1, 0, -1]]);
        assert_eq!(evaluator.evaluate(&main), GameResult::Won(Player::Two));

        let anti = board([[1, 0, -1], [1, -1, 0], [-1, 0, 1]]);
        assert_eq!(evaluator.evaluate(&anti), GameResult::Won(Player::Two));
    }

    #[test]
    fn full_board_without_decisive_line_is_a_draw() {
        let mut evaluator = Evaluator::new();
        let result = evaluator.evaluate(&board([[1, -1, 1], [1, -1, -1], [-1, 1, 1]]));
        assert_eq!(result, GameResult::Draw);
        assert!(result.is_over());
        assert_eq!(result.winner(), None);
    }

    #[test]
    fn open_board_is_in_progress() {
        let mut evaluator = Evaluator::new();
        let result = evaluator.evaluate(&board([[1, -1, 0], [0, 0, 0], [0, 0, 0]]));
        assert_eq!(result, GameResult::InProgress);
        assert!(!result.is_over());
        // The zero placeholder must not read as a draw
        assert_eq!(result.score_for(Player::One), 0);
        assert_ne!(result, GameResult::Draw);
    }

    #[test]
    fn evaluation_is_idempotent_and_cached() {
        let mut evaluator = Evaluator::new();
        let b = board([[1, 1, 1], [-1, -1, 0], [0, 0, 0]]);

        let first = evaluator.evaluate(&b);
        let cached = evaluator.cached_positions();
        let second = evaluator.evaluate(&b);

        assert_eq!(first, second);
        assert_eq!(evaluator.cached_positions(), cached);
        // Evaluation does not change the board
        assert_eq!(b, board([[1, 1, 1], [-1, -1, 0], [0, 0, 0]]));
    }

    #[test]
    fn relative_view_flips_with_the_player() {
        let mut evaluator = Evaluator::new();
        let b = board([[-1, -1, -1], [1, 1, 0], [1, 0, 0]]);

        assert_eq!(evaluator.evaluate_for(&b, Player::One), (true, -1));
        assert_eq!(evaluator.evaluate_for(&b, Player::Two), (true, 1));
        // Both perspectives are served from the single cached entry
        assert_eq!(evaluator.cached_positions(), 1);
    }

    #[test]
    fn relative_view_of_open_board() {
        let mut evaluator = Evaluator::new();
        let b = Board::new().make_move(Move::new(0, 0), Player::One).unwrap();
        assert_eq!(evaluator.evaluate_for(&b, Player::Two), (false, 0));
    }
}
