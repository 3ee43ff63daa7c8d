//! Self-play temporal-difference trainer for Tic-Tac-Toe
//!
//! This crate provides:
//! - A signed-cell board with memoized win/loss/draw evaluation
//! - A TD(0) learning agent that backs game outcomes up through the
//!   positions it visited
//! - A depth-limited negamax search opponent
//! - A game driver and training loop for pitting agents against each
//!   other, including an interactive human player

pub mod agent;
pub mod board;
pub mod error;
pub mod evaluator;
pub mod game;
pub mod human;
pub mod learner;
pub mod policy;
pub mod random;
pub mod search;
pub mod trainer;
pub mod values;

pub use agent::{Agent, RelativeOutcome};
pub use board::{Board, Move, Player, PositionKey, SIZE};
pub use error::{Error, Result};
pub use evaluator::{Evaluator, GameResult};
pub use game::Game;
pub use human::HumanAgent;
pub use learner::TdAgent;
pub use policy::PolicySelector;
pub use random::RandomAgent;
pub use search::{FULL_DEPTH, NegamaxAgent, SearchOutcome};
pub use trainer::{Trainer, TrainerConfig, TrainingReport};
pub use values::{DEFAULT_LEARNING_RATE, DEFAULT_WIN_WEIGHT, PositionValue, ValueStore};
