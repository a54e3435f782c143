//! Configuration options for the search engines
//!
//! This module defines the parameters shared by every policy: the
//! wall-clock budget, the perspective actor, the UCB exploration constant,
//! the alpha-beta depth and the random seed.

use std::time::Duration;

use crate::{game_state::Player, Result, SearchError};

/// Configuration for a search policy
///
/// Use the builder methods to create a customized configuration.
///
/// # Example
///
/// ```
/// use connect4_search::{Player, SearchConfig};
/// use std::time::Duration;
///
/// let config = SearchConfig::default()
///     .with_time_budget(Duration::from_millis(50))
///     .with_perspective(Player::Two)
///     .with_depth(3)
///     .with_seed(42);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SearchConfig {
    /// Wall-clock budget for one decision
    ///
    /// The deadline is checked between iterations only, so a decision can
    /// overrun the budget by up to one iteration.
    pub time_budget: Duration,

    /// The actor alpha-beta scores positions for
    ///
    /// The MCTS-family engines always recommend the root mover's best action.
    pub perspective: Player,

    /// Exploration constant for UCB1
    ///
    /// The default `sqrt(2)` yields the `sqrt(2 ln N / n)` exploration term.
    pub exploration_constant: f64,

    /// Fixed search depth for alpha-beta; ignored by the MCTS-family engines
    pub depth: usize,

    /// Seed for the random source; `None` draws one from entropy
    pub seed: Option<u64>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            time_budget: Duration::from_secs(1),
            perspective: Player::One,
            exploration_constant: std::f64::consts::SQRT_2,
            depth: 4,
            seed: None,
        }
    }
}

impl SearchConfig {
    /// Sets the wall-clock budget per decision
    pub fn with_time_budget(mut self, budget: Duration) -> Self {
        self.time_budget = budget;
        self
    }

    /// Sets the perspective actor
    pub fn with_perspective(mut self, player: Player) -> Self {
        self.perspective = player;
        self
    }

    /// Sets the exploration constant
    pub fn with_exploration_constant(mut self, constant: f64) -> Self {
        self.exploration_constant = constant;
        self
    }

    /// Sets the alpha-beta depth
    pub fn with_depth(mut self, depth: usize) -> Self {
        self.depth = depth;
        self
    }

    /// Fixes the random seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Checks the configuration before a policy is built
    pub fn validate(&self) -> Result<()> {
        if self.time_budget.is_zero() {
            return Err(SearchError::InvalidConfiguration(
                "time budget must be positive".to_string(),
            ));
        }
        if !self.exploration_constant.is_finite() || self.exploration_constant < 0.0 {
            return Err(SearchError::InvalidConfiguration(format!(
                "exploration constant must be finite and non-negative, got {}",
                self.exploration_constant
            )));
        }
        Ok(())
    }
}
