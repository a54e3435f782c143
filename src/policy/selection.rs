//! Selection policies for the MCTS-family engines
//!
//! Selection policies pick which child to descend into once a node or
//! record is fully expanded. Candidates are described by their mean reward
//! (Player-One-signed) and their visit count, so the same policy serves the
//! explicit trees and the transposition tables.

use rand::seq::SliceRandom;
use rand::RngCore;

use crate::{game_state::Player, utils::ucb1_value};

/// Statistics of one selectable child as seen from its parent
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate {
    /// Mean reward, signed from Player One's perspective
    pub mean: f64,
    /// Number of times the parent has descended into this child
    pub visits: u64,
}

impl Candidate {
    /// Creates a candidate from a reward total and a visit count
    pub fn from_totals(total_reward: f64, visits: u64) -> Self {
        Candidate {
            mean: crate::utils::exploitation_term(total_reward, visits),
            visits,
        }
    }
}

/// Trait for policies that select a child to descend into
pub trait SelectionPolicy: Send + Sync {
    /// Returns the index of the chosen candidate, or `None` if there are none
    ///
    /// `parent_visits` is the visit count of the parent and `mover` the
    /// player to move at the parent.
    fn select(
        &self,
        parent_visits: u64,
        mover: Player,
        candidates: &[Candidate],
        rng: &mut dyn RngCore,
    ) -> Option<usize>;

    /// Create a boxed clone of this policy
    fn clone_box(&self) -> Box<dyn SelectionPolicy>;
}

/// Uniform random selection
///
/// Ignores all statistics. Used by plain Monte Carlo tree search.
#[derive(Debug, Clone, Default)]
pub struct UniformPolicy;

impl UniformPolicy {
    /// Creates a new uniform policy
    pub fn new() -> Self {
        UniformPolicy
    }
}

impl SelectionPolicy for UniformPolicy {
    fn select(
        &self,
        _parent_visits: u64,
        _mover: Player,
        candidates: &[Candidate],
        rng: &mut dyn RngCore,
    ) -> Option<usize> {
        let indices: Vec<usize> = (0..candidates.len()).collect();
        indices.choose(rng).copied()
    }

    fn clone_box(&self) -> Box<dyn SelectionPolicy> {
        Box::new(self.clone())
    }
}

/// Upper Confidence Bound 1 (UCB1) selection policy
///
/// ```text
/// UCB1 = mean ± exploration_constant * sqrt(ln(parent_visits) / child_visits)
/// ```
///
/// The exploration term is added when Player One moves at the parent and
/// subtracted when Player Two moves; the parent then takes the maximum or
/// minimum respectively. Ties for the extremal value are broken uniformly
/// at random.
#[derive(Debug, Clone)]
pub struct Ucb1Policy {
    /// Exploration constant; `sqrt(2)` gives the classic `sqrt(2 ln N / n)` term
    pub exploration_constant: f64,
}

impl Ucb1Policy {
    /// Creates a new UCB1 policy with the given exploration constant
    pub fn new(exploration_constant: f64) -> Self {
        Ucb1Policy {
            exploration_constant,
        }
    }

    /// Returns the indices of every candidate sharing the extremal UCB1 value
    pub fn extremal_candidates(
        &self,
        parent_visits: u64,
        mover: Player,
        candidates: &[Candidate],
    ) -> Vec<usize> {
        let maximizing = mover == Player::One;
        let mut best = if maximizing {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };
        let mut tied = Vec::new();

        for (i, candidate) in candidates.iter().enumerate() {
            let value = ucb1_value(
                candidate.mean,
                candidate.visits,
                parent_visits,
                self.exploration_constant,
                maximizing,
            );

            let better = if maximizing { value > best } else { value < best };
            if better {
                best = value;
                tied.clear();
                tied.push(i);
            } else if value == best {
                tied.push(i);
            }
        }

        tied
    }
}

impl Default for Ucb1Policy {
    fn default() -> Self {
        Self::new(std::f64::consts::SQRT_2)
    }
}

impl SelectionPolicy for Ucb1Policy {
    fn select(
        &self,
        parent_visits: u64,
        mover: Player,
        candidates: &[Candidate],
        rng: &mut dyn RngCore,
    ) -> Option<usize> {
        self.extremal_candidates(parent_visits, mover, candidates)
            .choose(rng)
            .copied()
    }

    fn clone_box(&self) -> Box<dyn SelectionPolicy> {
        Box::new(self.clone())
    }
}
