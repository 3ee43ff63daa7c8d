//! Interactive console player

use std::io::{self, BufRead, Write};

use crate::{
    Error, Result,
    agent::Agent,
    board::{Board, Move, Player},
};

fn write_err(source: io::Error) -> Error {
    Error::Io {
        operation: "write prompt".to_string(),
        source,
    }
}

/// Human player driven through stdin/stdout.
///
/// Shows the board and the numbered legal moves, then reads the index of
/// the desired move. Bad input surfaces as a recoverable error so the game
/// driver re-prompts instead of aborting.
#[derive(Debug, Default)]
pub struct HumanAgent;

impl HumanAgent {
    pub fn new() -> Self {
        HumanAgent
    }

    fn prompt(board: &Board, legal_moves: &[Move], player: Player) -> Result<()> {
        let mut out = io::stdout().lock();
        writeln!(out, "\nYou are playing {}. Current board:", player.to_char())
            .map_err(write_err)?;
        writeln!(out, "{board}\n").map_err(write_err)?;
        for (index, mv) in legal_moves.iter().enumerate() {
            writeln!(out, "  {index}: {mv}").map_err(write_err)?;
        }
        write!(out, "Enter the number of your move: ").map_err(write_err)?;
        out.flush().map_err(write_err)?;
        Ok(())
    }

    fn read_index(legal_count: usize) -> Result<usize> {
        let mut line = String::new();
        let read = io::stdin()
            .lock()
            .read_line(&mut line)
            .map_err(|source| Error::Io {
                operation: "read move selection".to_string(),
                source,
            })?;
        if read == 0 {
            // EOF is not recoverable; surfacing it as Io aborts the game
            return Err(Error::Io {
                operation: "read move selection".to_string(),
                source: io::Error::new(io::ErrorKind::UnexpectedEof, "stdin closed"),
            });
        }

        let trimmed = line.trim();
        let index: usize = trimmed.parse().map_err(|_| Error::InvalidSelection {
            input: trimmed.to_string(),
        })?;
        if index >= legal_count {
            return Err(Error::InvalidSelection {
                input: trimmed.to_string(),
            });
        }
        Ok(index)
    }
}

impl Agent for HumanAgent {
    fn choose_move(
        &mut self,
        board: &Board,
        legal_moves: &[Move],
        player: Player,
    ) -> Result<usize> {
        if legal_moves.is_empty() {
            return Err(Error::DegenerateSelection {
                reason: "no candidate moves".to_string(),
            });
        }
        Self::prompt(board, legal_moves, player)?;
        Self::read_index(legal_moves.len())
    }

    fn name(&self) -> &str {
        "Human"
    }

    fn recovers_from_input_errors(&self) -> bool {
        true
    }
}
