//! Position-value estimates and TD(0) propagation
//!
//! Every position the learning agent has moved to gets a pair of scalar
//! estimates: the probability of eventually winning and of eventually
//! drawing from that position. Estimates start at the uniform prior 1/3
//! and are pulled toward bootstrapped targets after each game.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::board::PositionKey;

/// Step-size parameter for TD updates
pub const DEFAULT_LEARNING_RATE: f64 = 0.2;

/// A win counts for twice a draw when ranking candidate positions
pub const DEFAULT_WIN_WEIGHT: f64 = 2.0;

/// Uniform prior over win/draw/loss
const INITIAL_PROBABILITY: f64 = 1.0 / 3.0;

/// Mutable value estimates for one board layout.
///
/// These are estimates, not guaranteed probabilities; TD updates toward
/// bounded targets keep them inside [0, 1] in practice.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PositionValue {
    pub win_probability: f64,
    pub draw_probability: f64,
}

impl Default for PositionValue {
    fn default() -> Self {
        PositionValue {
            win_probability: INITIAL_PROBABILITY,
            draw_probability: INITIAL_PROBABILITY,
        }
    }
}

impl PositionValue {
    /// Win-weighted blend of the two estimates, used to rank moves
    pub fn composite_score(&self, win_weight: f64) -> f64 {
        win_weight * self.win_probability + self.draw_probability
    }
}

/// Process-lifetime table of position values with a fixed learning rate.
///
/// Entries are created lazily on first lookup and never removed; the state
/// space is bounded by 3^9 layouts so the table stays small.
#[derive(Debug, Clone)]
pub struct ValueStore {
    table: HashMap<PositionKey, PositionValue>,
    learning_rate: f64,
    win_weight: f64,
}

impl Default for ValueStore {
    fn default() -> Self {
        ValueStore {
            table: HashMap::new(),
            learning_rate: DEFAULT_LEARNING_RATE,
            win_weight: DEFAULT_WIN_WEIGHT,
        }
    }
}

impl ValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store with explicit parameters.
    ///
    /// # Errors
    ///
    /// Returns an error if the learning rate is not in (0, 1] or the win
    /// weight is not a positive finite number.
    pub fn with_parameters(learning_rate: f64, win_weight: f64) -> Result<Self, crate::Error> {
        if !learning_rate.is_finite() || learning_rate <= 0.0 || learning_rate > 1.0 {
            return Err(crate::Error::InvalidConfiguration {
                message: format!("learning rate {learning_rate} must be in (0, 1]"),
            });
        }
        if !win_weight.is_finite() || win_weight <= 0.0 {
            return Err(crate::Error::InvalidConfiguration {
                message: format!("win weight {win_weight} must be positive and finite"),
            });
        }
        Ok(ValueStore {
            table: HashMap::new(),
            learning_rate,
            win_weight,
        })
    }

    /// Current estimates for a layout, creating the default prior on first
    /// access
    pub fn value(&mut self, key: PositionKey) -> PositionValue {
        *self.table.entry(key).or_default()
    }

    /// Composite score of the layout's current estimates
    pub fn composite_score(&mut self, key: PositionKey) -> f64 {
        let win_weight = self.win_weight;
        self.value(key).composite_score(win_weight)
    }

    /// Force certainty of a win: (1, 0).
    ///
    /// Used only for the position reached by a winning move, because that
    /// win does not depend on any further opponent move.
    pub fn mark_won(&mut self, key: PositionKey) {
        let value = self.table.entry(key).or_default();
        value.win_probability = 1.0;
        value.draw_probability = 0.0;
    }

    /// Move the win estimate toward `target` by one TD(0) step
    pub fn back_up_win(&mut self, key: PositionKey, target: f64) {
        let rate = self.learning_rate;
        let value = self.table.entry(key).or_default();
        value.win_probability += rate * (target - value.win_probability);
    }

    /// Move the draw estimate toward `target` by one TD(0) step
    pub fn back_up_draw(&mut self, key: PositionKey, target: f64) {
        let rate = self.learning_rate;
        let value = self.table.entry(key).or_default();
        value.draw_probability += rate * (target - value.draw_probability);
    }

    pub fn learning_rate(&self) -> f64 {
        self.learning_rate
    }

    pub fn win_weight(&self) -> f64 {
        self.win_weight
    }

    /// Number of layouts with stored estimates
    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}
