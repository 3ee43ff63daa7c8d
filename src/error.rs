//! Error types for the td-tictactoe crate

use thiserror::Error;

/// Main error type for the crate
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("move ({row}, {col}) is outside the 3x3 board")]
    InvalidMove { row: usize, col: usize },

    #[error("cell ({row}, {col}) is already occupied")]
    MoveConflict { row: usize, col: usize },

    #[error("invalid player sign {sign} (must be +1 or -1)")]
    InvalidPlayerSign { sign: i8 },

    #[error("invalid cell value {value} at ({row}, {col}) (must be -1, 0 or +1)")]
    InvalidBoardCell { value: i8, row: usize, col: usize },

    #[error("cannot select a move: {reason}")]
    DegenerateSelection { reason: String },

    #[error("invalid move selection '{input}'")]
    InvalidSelection { input: String },

    #[error("search invoked on a board where the game is already over")]
    SearchOnTerminalBoard,

    #[error("search depth must be at least 1")]
    SearchDepthZero,

    #[error("agent plays sign {expected} but was asked to move as {got}")]
    PlayerMismatch { expected: i8, got: i8 },

    #[error("invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    #[error("failed to {operation}: {source}")]
    Io {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("progress bar template error: {message}")]
    ProgressBarTemplate { message: String },
}

impl Error {
    /// Whether the error stems from bad interactive input and the same
    /// player can simply be asked again.
    pub fn is_user_recoverable(&self) -> bool {
        matches!(
            self,
            Error::InvalidMove { .. } | Error::MoveConflict { .. } | Error::InvalidSelection { .. }
        )
    }
}

/// Convenience type alias for Results using the crate's Error type
pub type Result<T> = std::result::Result<T, Error>;

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Error::Io {
            operation: "IO operation".to_string(),
            source,
        }
    }
}
