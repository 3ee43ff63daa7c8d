//! Multi-game training loop
//!
//! Plays a configured number of games between two agents and tallies the
//! outcomes from player one's perspective. Each game gets a fresh driver;
//! the agents keep their learned state across games, which is the whole
//! point of the exercise.

use indicatif::{ProgressBar, ProgressStyle};
use serde::{Deserialize, Serialize};

use crate::{
    Error, Result,
    agent::Agent,
    board::Player,
    evaluator::GameResult,
    game::Game,
};

/// Training configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainerConfig {
    /// Number of training games
    pub games: usize,

    /// Show a progress bar while training
    pub progress: bool,
}

impl Default for TrainerConfig {
    fn default() -> Self {
        Self {
            games: 500,
            progress: true,
        }
    }
}

/// Outcome tallies of a training run, counted for player one
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingReport {
    pub total_games: usize,
    pub wins: usize,
    pub draws: usize,
    pub losses: usize,
    pub win_rate: f64,
    pub draw_rate: f64,
    pub loss_rate: f64,
}

impl TrainingReport {
    pub fn new(total_games: usize, wins: usize, draws: usize, losses: usize) -> Self {
        let rate = |count: usize| {
            if total_games > 0 {
                count as f64 / total_games as f64
            } else {
                0.0
            }
        };
        Self {
            total_games,
            wins,
            draws,
            losses,
            win_rate: rate(wins),
            draw_rate: rate(draws),
            loss_rate: rate(losses),
        }
    }

    /// Save the report as pretty-printed JSON
    pub fn save<P: AsRef<std::path::Path>>(&self, path: P) -> Result<()> {
        let file = std::fs::File::create(path).map_err(|source| Error::Io {
            operation: "create summary file".to_string(),
            source,
        })?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }
}

/// Runs games in sequence and reports the tallies
pub struct Trainer {
    config: TrainerConfig,
}

impl Trainer {
    pub fn new(config: TrainerConfig) -> Self {
        Self { config }
    }

    /// Play the configured number of games between `first` (player one)
    /// and `second` (player two).
    ///
    /// # Errors
    ///
    /// Any error from an automated agent aborts the run; see the game
    /// driver's propagation policy.
    pub fn run(&self, first: &mut dyn Agent, second: &mut dyn Agent) -> Result<TrainingReport> {
        let bar = if self.config.progress {
            Some(Self::progress_bar(self.config.games as u64)?)
        } else {
            None
        };

        let mut wins = 0;
        let mut draws = 0;
        let mut losses = 0;

        for game_num in 0..self.config.games {
            let mut game = Game::new();
            match game.play(first, second)? {
                GameResult::Won(Player::One) => wins += 1,
                GameResult::Won(Player::Two) => losses += 1,
                GameResult::Draw => draws += 1,
                GameResult::InProgress => {
                    return Err(Error::InvalidConfiguration {
                        message: "game driver returned an unfinished game".to_string(),
                    });
                }
            }

            if let Some(bar) = &bar {
                bar.set_position((game_num + 1) as u64);
                bar.set_message(format!("{wins} D:{draws} L:{losses}"));
            }
        }

        if let Some(bar) = &bar {
            bar.finish_with_message(format!("{wins} D:{draws} L:{losses}"));
        }

        Ok(TrainingReport::new(self.config.games, wins, draws, losses))
    }

    fn progress_bar(total_games: u64) -> Result<ProgressBar> {
        let bar = ProgressBar::new(total_games);
        bar.set_style(
            ProgressStyle::default_bar()
                .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} games (W:{msg})")
                .map_err(|e| Error::ProgressBarTemplate {
                    message: e.to_string(),
                })?
                .progress_chars("=>-"),
        );
        Ok(bar)
    }
}
