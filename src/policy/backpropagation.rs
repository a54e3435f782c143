//! Backpropagation policy for the explicit-tree engines
//!
//! The transposition engines fold the payoff into their records on the way
//! back out of the recursion instead.

use crate::{game_state::GameState, tree::TreeNode};

/// Trait for policies that backpropagate simulation results
pub trait BackpropagationPolicy<S: GameState>: Send + Sync {
    /// Updates statistics for a node based on a simulation result
    fn update_stats(&self, node: &mut TreeNode<S>, payoff: f64);
}

/// Standard backpropagation policy
///
/// Increments the visit count and adds the Player-One-signed payoff to the
/// total reward.
#[derive(Debug, Clone, Default)]
pub struct StandardPolicy;

impl StandardPolicy {
    /// Creates a new standard policy
    pub fn new() -> Self {
        StandardPolicy
    }
}

impl<S: GameState> BackpropagationPolicy<S> for StandardPolicy {
    fn update_stats(&self, node: &mut TreeNode<S>, payoff: f64) {
        node.visits += 1;
        node.total_reward += payoff;
    }
}
