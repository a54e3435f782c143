//! Edge-transposition UCT
//!
//! States are keyed in a [`TranspositionTable`] so every path reaching an
//! equal board and mover shares one [`EdgeRecord`]. Each record keeps a
//! reward and visit pair per legal action, and UCB selection reads those
//! per-edge statistics directly.
//!
//! An iteration is a depth-first recursion from the root. Each call returns
//! the rollout payoff to its caller, which folds it into its own edge
//! before returning; that unwinding is the backpropagation step.

use log::trace;
use rand::RngCore;

use crate::{
    game_state::{GameState, Player},
    policy::{
        Candidate, RandomExpansionPolicy, RandomPolicy, SelectionPolicy, SimulationPolicy,
        Ucb1Policy,
    },
    search::{recommend_from_values, ActionValue, NodeStats, SearchEngine},
    table::{EdgeRecord, TranspositionTable},
    Result, SearchError,
};

/// UCT over state-keyed records with per-action statistics
pub struct EdgeUct<S: GameState> {
    root: S,
    table: TranspositionTable<S::Key, EdgeRecord>,
    selection_policy: Ucb1Policy,
    expansion_policy: RandomExpansionPolicy,
    simulation_policy: Box<dyn SimulationPolicy<S>>,
    iterations: u64,
}

impl<S: GameState + 'static> EdgeUct<S> {
    /// Creates an engine rooted at `root` with the given exploration constant
    pub fn new(root: S, exploration_constant: f64) -> Self {
        EdgeUct {
            root,
            table: TranspositionTable::new(),
            selection_policy: Ucb1Policy::new(exploration_constant),
            expansion_policy: RandomExpansionPolicy::new(),
            simulation_policy: Box::new(RandomPolicy::new()),
            iterations: 0,
        }
    }

    /// Returns the record shared by every path reaching `state`
    pub fn record(&self, state: &S) -> Option<&EdgeRecord> {
        self.table.get(&state.key())
    }

    /// Visit count and reward over every pass through `state`
    pub fn record_stats(&self, state: &S) -> Option<NodeStats> {
        self.record(state).map(|record| NodeStats {
            visits: record.visits,
            total_reward: record.total_reward,
        })
    }

    /// Visit count of the root record
    pub fn root_visits(&self) -> u64 {
        self.record(&self.root).map_or(0, |record| record.visits)
    }

    /// Per-action statistics of the root record, in legal-action order
    pub fn root_action_values(&self) -> Vec<ActionValue<S::Action>> {
        let Some(record) = self.record(&self.root) else {
            return Vec::new();
        };

        self.root
            .legal_actions()
            .into_iter()
            .zip(record.edges.iter())
            .filter_map(|(action, edge)| {
                edge.map(|edge| ActionValue {
                    action,
                    visits: edge.visits,
                    mean: edge.value(),
                })
            })
            .collect()
    }

    /// One select/expand/simulate pass below `state`, returning the payoff
    fn run(&mut self, state: &S, rng: &mut dyn RngCore) -> Result<f64> {
        let (done, payoff) = state.terminal();
        if done {
            self.table
                .get_or_insert_with(state.key(), || EdgeRecord::new(0, 0, 0.0))
                .absorb(payoff);
            return Ok(payoff);
        }

        let actions = state.legal_actions();
        let key = state.key();
        let record = self
            .table
            .get_or_insert_with(key.clone(), || EdgeRecord::new(actions.len(), 0, 0.0));

        if record.expandable {
            let untried = record.untried();
            let index = *self
                .expansion_policy
                .select_untried(&untried, rng)
                .ok_or(SearchError::NoLegalActions)?;

            let child = state.successor(&actions[index])?;
            let child_key = child.key();

            // A transposition reached through a new edge continues through its record
            let payoff = if self.table.contains(&child_key) {
                self.run(&child, rng)?
            } else {
                let payoff = self.simulation_policy.simulate(&child, rng)?;
                let child_actions = if child.is_terminal() {
                    0
                } else {
                    child.legal_actions().len()
                };
                self.table
                    .get_or_insert_with(child_key, || EdgeRecord::new(child_actions, 1, payoff));
                payoff
            };

            if let Some(record) = self.table.get_mut(&key) {
                record.expand(index, payoff);
            }
            trace!("uct1 expanded action {:?}, payoff {}", actions[index], payoff);
            return Ok(payoff);
        }

        let candidates: Vec<Candidate> = record
            .edges
            .iter()
            .map(|edge| match edge {
                Some(e) => Candidate::from_totals(e.total_reward, e.visits),
                None => Candidate::from_totals(0.0, 0),
            })
            .collect();
        let index = self
            .selection_policy
            .select(record.visits, state.current_player(), &candidates, rng)
            .ok_or(SearchError::NoLegalActions)?;

        let child = state.successor(&actions[index])?;
        let payoff = self.run(&child, rng)?;

        if let Some(record) = self.table.get_mut(&key) {
            record.update(index, payoff);
        }
        Ok(payoff)
    }
}

impl<S: GameState + 'static> SearchEngine<S> for EdgeUct<S> {
    fn name(&self) -> &'static str {
        "uct1"
    }

    fn root_state(&self) -> &S {
        &self.root
    }

    fn iterate(&mut self, rng: &mut dyn RngCore) -> Result<()> {
        let root = self.root.clone();
        self.run(&root, rng)?;
        self.iterations += 1;
        Ok(())
    }

    fn recommend(&self, _perspective: Player) -> Result<S::Action> {
        recommend_from_values(&self.root_action_values(), self.root.current_player())
    }

    fn size(&self) -> usize {
        self.table.len()
    }

    fn iterations(&self) -> u64 {
        self.iterations
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connect4::Connect4;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn searched(iterations: usize, seed: u64) -> EdgeUct<Connect4> {
        let mut engine = EdgeUct::new(Connect4::new(), std::f64::consts::SQRT_2);
        let mut rng = StdRng::seed_from_u64(seed);
        for _ in 0..iterations {
            engine.iterate(&mut rng).unwrap();
        }
        engine
    }

    #[test]
    fn test_root_visits_equal_iterations() {
        let engine = searched(200, 1);
        assert_eq!(engine.root_visits(), 200);
        assert_eq!(engine.iterations(), 200);
    }

    #[test]
    fn test_first_iteration_creates_root_and_child_records() {
        let engine = searched(1, 2);
        assert_eq!(engine.size(), 2);
        let values = engine.root_action_values();
        assert_eq!(values.len(), 1);
        assert_eq!(values[0].visits, 1);
    }

    #[test]
    fn test_edge_visits_sum_to_record_visits() {
        let engine = searched(300, 3);
        let total: u64 = engine.root_action_values().iter().map(|v| v.visits).sum();
        assert_eq!(total, engine.root_visits());
    }

    #[test]
    fn test_edge_means_stay_in_payoff_range() {
        let engine = searched(300, 4);
        for record in engine.table.values() {
            for edge in record.edges.iter().flatten() {
                assert!((-1.0..=1.0).contains(&edge.value()));
            }
        }
    }

    #[test]
    fn test_record_stats() {
        let engine = searched(10, 5);
        let root = engine.record_stats(&Connect4::new()).unwrap();
        assert_eq!(root.visits, 10);
        let edge_total: f64 = engine.root_action_values().iter().map(|v| v.mean * v.visits as f64).sum();
        assert!((root.total_reward - edge_total).abs() < 1e-9);

        let mut deep = Connect4::new();
        for column in [0, 0, 0, 0, 0] {
            deep = deep.successor(&column).unwrap();
        }
        assert!(engine.record_stats(&deep).is_none());
    }

    #[test]
    fn test_new_child_record_carries_its_rollout() {
        let engine = searched(1, 6);
        let value = &engine.root_action_values()[0];
        let child = Connect4::new().successor(&value.action).unwrap();

        let stats = engine.record_stats(&child).unwrap();
        assert_eq!(stats.visits, 1);
        assert_eq!(stats.total_reward, value.mean);
        assert!(engine.record(&child).unwrap().edges.iter().all(Option::is_none));
    }
}
