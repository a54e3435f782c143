//! # connect4-search
//!
//! Time-bounded move selection for two-player, zero-sum, perfect-information
//! games, with Connect Four as the concrete instance.
//!
//! The crate provides four interchangeable search policies plus an
//! alpha-beta baseline, all driven by a wall-clock budget:
//!
//! - **Plain MCTS** (`mcts`): explicit tree, uniform-random descent
//! - **Tree UCT** (`uct0`): explicit tree, UCB1 descent
//! - **Edge-transposition UCT** (`uct1`): state-keyed records with per-action statistics
//! - **State-transposition UCT** (`uct2`): state-keyed records with pooled per-state statistics
//! - **Alpha-beta** (`alphabeta`): depth-bounded minimax with a line-window heuristic
//!
//! ## Basic Usage
//!
//! ```
//! use std::time::Duration;
//! use connect4_search::{policy, Connect4, Player, PolicyKind, SearchConfig};
//!
//! fn main() -> Result<(), connect4_search::SearchError> {
//!     let config = SearchConfig::default()
//!         .with_time_budget(Duration::from_millis(5))
//!         .with_perspective(Player::One)
//!         .with_seed(7);
//!
//!     let mut decide = policy::<Connect4>(PolicyKind::TreeUct, config)?;
//!
//!     let state = Connect4::new();
//!     let column = decide(&state)?;
//!     assert!(column < 7);
//!     Ok(())
//! }
//! ```
//!
//! ## How It Works
//!
//! Every MCTS-family iteration runs four phases:
//!
//! 1. **Selection**: descend through fully expanded nodes with a selection policy.
//! 2. **Expansion**: materialize one untried action, chosen uniformly at random.
//! 3. **Simulation**: play uniformly random moves to a terminal state.
//! 4. **Backpropagation**: add the terminal payoff to every statistic on the path.
//!
//! Rewards are always signed from Player One's point of view (+1 win, -1
//! loss, 0 draw). Maximizing and minimizing nodes differ only in the sign of
//! the exploration term.
//!
//! The [`AnytimeDriver`](driver::AnytimeDriver) repeats iterations until the
//! deadline passes, always completing at least one, and then reads the
//! recommendation off the root.

pub mod config;
pub mod connect4;
pub mod driver;
pub mod game_state;
pub mod heuristic;
pub mod policy;
pub mod search;
pub mod stats;
pub mod table;
pub mod tree;
pub mod utils;

pub use config::SearchConfig;
pub use connect4::Connect4;
pub use driver::{policy, AnytimeDriver, DecisionFn, PolicyKind};
pub use game_state::{Action, GameState, Player};
pub use heuristic::{Heuristic, WindowHeuristic};
pub use search::{AlphaBeta, EdgeUct, PlainMcts, SearchEngine, StateUct, TreeUct};
pub use stats::SearchStatistics;
pub use tree::{NodeId, SearchTree, TreeNode};

/// Error types for the search engines
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum SearchError {
    /// An action outside the legal-action set was applied to a state
    #[error("Illegal action: {0}")]
    IllegalAction(String),

    /// No legal actions are available from the current state
    #[error("No legal actions available from current state")]
    NoLegalActions,

    /// The budget ran out before any root action gathered statistics
    #[error("No root action has statistics to recommend from")]
    EmptyRecommendation,

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
}

/// Result type for search operations
pub type Result<T> = std::result::Result<T, SearchError>;
