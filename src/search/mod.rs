//! Search engines driven by the anytime driver
//!
//! Every engine is built around one root state and exposes a single
//! iteration step; the [`AnytimeDriver`](crate::driver::AnytimeDriver)
//! repeats that step until its deadline and then asks for a recommendation.

use rand::RngCore;

use crate::{
    game_state::{GameState, Player},
    Result, SearchError,
};

pub mod alphabeta;
pub mod edge_uct;
pub mod state_uct;
pub mod tree_search;

pub use alphabeta::{AlphaBeta, AlphaBetaOutcome};
pub use edge_uct::EdgeUct;
pub use state_uct::StateUct;
pub use tree_search::{PlainMcts, TreeSearch, TreeUct};

/// Common interface of all search engines
pub trait SearchEngine<S: GameState> {
    /// Short engine name used in logs
    fn name(&self) -> &'static str;

    /// The state the engine searches from
    fn root_state(&self) -> &S;

    /// Runs one complete iteration
    ///
    /// For the MCTS-family engines this is one select, expand, simulate and
    /// backpropagate pass. For alpha-beta it is a full fixed-depth search.
    fn iterate(&mut self, rng: &mut dyn RngCore) -> Result<()>;

    /// Extracts the recommended root action
    ///
    /// The recommendation is always the best action for the player to move
    /// at the root: the rewards are zero-sum, so naming the other actor as
    /// `perspective` cannot change which action that is. Engines may ignore
    /// the argument.
    ///
    /// # Errors
    ///
    /// [`SearchError::EmptyRecommendation`] if no root action has statistics.
    fn recommend(&self, perspective: Player) -> Result<S::Action>;

    /// Number of nodes or records currently held
    fn size(&self) -> usize;

    /// Number of completed iterations
    fn iterations(&self) -> u64;
}

/// Visit and reward summary of one root action
#[derive(Debug, Clone, PartialEq)]
pub struct ActionValue<A> {
    /// The root action
    pub action: A,
    /// How often the search went through this action
    pub visits: u64,
    /// Mean Player-One-signed reward observed through this action
    pub mean: f64,
}

/// Aggregated statistics of a node or record
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeStats {
    /// Visit count
    pub visits: u64,
    /// Sum of Player-One-signed payoffs
    pub total_reward: f64,
}

impl NodeStats {
    /// Mean reward
    pub fn mean(&self) -> f64 {
        crate::utils::exploitation_term(self.total_reward, self.visits)
    }
}

/// Picks the root mover's best action from root statistics
///
/// Player-One-signed means are turned into the root mover's point of view
/// and the highest one wins. Ties keep the earliest action in legal-action
/// order. Actions without visits are skipped.
pub(crate) fn recommend_from_values<A: Clone>(
    values: &[ActionValue<A>],
    root_mover: Player,
) -> Result<A> {
    let mut best: Option<(&ActionValue<A>, f64)> = None;

    for value in values.iter().filter(|v| v.visits > 0) {
        let score = value.mean * root_mover.sign();
        let better = match best {
            None => true,
            Some((_, best_score)) => score > best_score,
        };
        if better {
            best = Some((value, score));
        }
    }

    best.map(|(value, _)| value.action.clone())
        .ok_or(SearchError::EmptyRecommendation)
}
