//! Board representation and move application
//!
//! Cells carry the signed encoding +1 (player one), -1 (player two) and 0
//! (empty) so that win detection can work on plain line sums. Boards are
//! small `Copy` values; applying a move produces a new board and leaves the
//! original untouched, so search and selection never need an undo step.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Side length of the square board
pub const SIZE: usize = 3;

/// One of the two participants, identified by its cell sign
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    One,
    Two,
}

impl Player {
    /// The signed cell marker this player places on the board
    pub fn sign(self) -> i8 {
        match self {
            Player::One => 1,
            Player::Two => -1,
        }
    }

    /// Get the opponent player
    pub fn opponent(self) -> Player {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }

    /// Parse a player from its signed marker.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPlayerSign`](crate::Error::InvalidPlayerSign)
    /// for anything other than +1 or -1.
    pub fn from_sign(sign: i8) -> Result<Player, crate::Error> {
        match sign {
            1 => Ok(Player::One),
            -1 => Ok(Player::Two),
            _ => Err(crate::Error::InvalidPlayerSign { sign }),
        }
    }

    /// The marker character used when rendering boards
    pub fn to_char(self) -> char {
        match self {
            Player::One => 'X',
            Player::Two => 'O',
        }
    }
}

/// A (row, column) coordinate into the board, zero based
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub row: usize,
    pub col: usize,
}

impl Move {
    pub fn new(row: usize, col: usize) -> Self {
        Move { row, col }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Canonical hashable encoding of a full board layout.
///
/// Two boards with identical cell contents always map to the same key,
/// which makes this the lookup key for both the result cache and the
/// value store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PositionKey([i8; SIZE * SIZE]);

/// A 3x3 grid of signed cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    cells: [[i8; SIZE]; SIZE],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Board {
            cells: [[0; SIZE]; SIZE],
        }
    }

    /// Build a board from raw cell values.
    ///
    /// # Errors
    ///
    /// Returns an error if any cell is not -1, 0 or +1.
    pub fn from_cells(cells: [[i8; SIZE]; SIZE]) -> Result<Self, crate::Error> {
        for (row, row_cells) in cells.iter().enumerate() {
            for (col, &value) in row_cells.iter().enumerate() {
                if !(-1..=1).contains(&value) {
                    return Err(crate::Error::InvalidBoardCell { value, row, col });
                }
            }
        }
        Ok(Board { cells })
    }

    /// Get the signed value of a cell
    pub fn get(&self, row: usize, col: usize) -> i8 {
        self.cells[row][col]
    }

    /// Check whether a cell is empty
    pub fn is_vacant(&self, mv: Move) -> bool {
        self.cells[mv.row][mv.col] == 0
    }

    /// Check whether no empty cell remains
    pub fn is_full(&self) -> bool {
        self.cells.iter().flatten().all(|&c| c != 0)
    }

    /// List all legal moves (empty cells) in row-major order
    pub fn legal_moves(&self) -> Vec<Move> {
        let mut moves = Vec::new();
        for row in 0..SIZE {
            for col in 0..SIZE {
                if self.cells[row][col] == 0 {
                    moves.push(Move { row, col });
                }
            }
        }
        moves
    }

    /// Apply a move for the given player, returning the resulting board.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidMove`](crate::Error::InvalidMove) if the
    /// coordinate is out of bounds and
    /// [`Error::MoveConflict`](crate::Error::MoveConflict) if the cell is
    /// already occupied.
    #[must_use = "make_move returns a new board; the original is unchanged"]
    pub fn make_move(&self, mv: Move, player: Player) -> Result<Board, crate::Error> {
        if mv.row >= SIZE || mv.col >= SIZE {
            return Err(crate::Error::InvalidMove {
                row: mv.row,
                col: mv.col,
            });
        }
        if !self.is_vacant(mv) {
            return Err(crate::Error::MoveConflict {
                row: mv.row,
                col: mv.col,
            });
        }

        let mut next = *self;
        next.cells[mv.row][mv.col] = player.sign();
        Ok(next)
    }

    /// The hashable key for this layout
    pub fn key(&self) -> PositionKey {
        let mut flat = [0i8; SIZE * SIZE];
        for row in 0..SIZE {
            for col in 0..SIZE {
                flat[row * SIZE + col] = self.cells[row][col];
            }
        }
        PositionKey(flat)
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (row, row_cells) in self.cells.iter().enumerate() {
            for &cell in row_cells {
                let c = match Player::from_sign(cell) {
                    Ok(player) => player.to_char(),
                    Err(_) => '.',
                };
                write!(f, "{c}")?;
            }
            if row + 1 < SIZE {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_board_is_empty() {
        let board = Board::new();
        for row in 0..SIZE {
            for col in 0..SIZE {
                assert_eq!(board.get(row, col), 0);
            }
        }
        assert_eq!(board.legal_moves().len(), 9);
    }

    #[test]
    fn make_move_sets_single_cell() {
        let board = Board::new();
        let next = board.make_move(Move::new(0, 0), Player::One).unwrap();

        assert_eq!(next.get(0, 0), 1);
        for row in 0..SIZE {
            for col in 0..SIZE {
                if (row, col) != (0, 0) {
                    assert_eq!(next.get(row, col), 0);
                }
            }
        }
        // The original is untouched
        assert_eq!(board.get(0, 0), 0);
    }

    #[test]
    fn move_onto_occupied_cell_conflicts() {
        let board = Board::new()
            .make_move(Move::new(0, 0), Player::One)
            .unwrap();
        let err = board.make_move(Move::new(0, 0), Player::Two).unwrap_err();
        assert!(matches!(
            err,
            crate::Error::MoveConflict { row: 0, col: 0 }
        ));
    }

    #[test]
    fn move_out_of_bounds_is_invalid() {
        let board = Board::new();
        let err = board.make_move(Move::new(3, 0), Player::One).unwrap_err();
        assert!(matches!(err, crate::Error::InvalidMove { .. }));
    }

    #[test]
    fn legal_moves_match_empty_cells() {
        let mut board = Board::new();
        board = board.make_move(Move::new(1, 1), Player::One).unwrap();
        board = board.make_move(Move::new(0, 2), Player::Two).unwrap();

        let moves = board.legal_moves();
        assert_eq!(moves.len(), 7);
        assert!(!moves.contains(&Move::new(1, 1)));
        assert!(!moves.contains(&Move::new(0, 2)));
        assert!(moves.iter().all(|&mv| board.is_vacant(mv)));
    }

    #[test]
    fn identical_layouts_share_a_key() {
        let a = Board::new().make_move(Move::new(2, 1), Player::One).unwrap();
        let b = Board::new().make_move(Move::new(2, 1), Player::One).unwrap();
        assert_eq!(a.key(), b.key());
        assert_ne!(a.key(), Board::new().key());
    }

    #[test]
    fn from_cells_rejects_bad_values() {
        let err = Board::from_cells([[0, 0, 2], [0, 0, 0], [0, 0, 0]]).unwrap_err();
        assert!(matches!(
            err,
            crate::Error::InvalidBoardCell {
                value: 2,
                row: 0,
                col: 2
            }
        ));
    }

    #[test]
    fn player_signs_round_trip() {
        assert_eq!(Player::from_sign(1).unwrap(), Player::One);
        assert_eq!(Player::from_sign(-1).unwrap(), Player::Two);
        assert!(Player::from_sign(0).is_err());
        assert_eq!(Player::One.opponent(), Player::Two);
        assert_eq!(Player::Two.opponent().sign(), 1);
    }

    #[test]
    fn display_uses_markers() {
        let board = Board::from_cells([[1, -1, 0], [0, 1, 0], [0, 0, -1]]).unwrap();
        let rendered = format!("{board}");
        assert!(rendered.contains("XO."));
        assert!(rendered.contains(".X."));
        assert!(rendered.contains("..O"));
    }
}
