//! State-transposition UCT
//!
//! Like the edge variant, states are keyed in a shared table, but each
//! [`StateRecord`] pools a single reward over every pass through its state.
//! During selection the value of an action is read from the successor's own
//! record, found by re-deriving the successor state, so every parent that
//! reaches a state sees the same statistic. The parent keeps only per-action
//! visit counts.

use log::trace;
use rand::RngCore;

use crate::{
    game_state::{GameState, Player},
    policy::{
        Candidate, RandomExpansionPolicy, RandomPolicy, SelectionPolicy, SimulationPolicy,
        Ucb1Policy,
    },
    search::{recommend_from_values, ActionValue, NodeStats, SearchEngine},
    table::{StateRecord, TranspositionTable},
    Result, SearchError,
};

/// UCT over state-keyed records with pooled per-state statistics
pub struct StateUct<S: GameState> {
    root: S,
    table: TranspositionTable<S::Key, StateRecord>,
    selection_policy: Ucb1Policy,
    expansion_policy: RandomExpansionPolicy,
    simulation_policy: Box<dyn SimulationPolicy<S>>,
    iterations: u64,
}

impl<S: GameState + 'static> StateUct<S> {
    /// Creates an engine rooted at `root` with the given exploration constant
    pub fn new(root: S, exploration_constant: f64) -> Self {
        StateUct {
            root,
            table: TranspositionTable::new(),
            selection_policy: Ucb1Policy::new(exploration_constant),
            expansion_policy: RandomExpansionPolicy::new(),
            simulation_policy: Box::new(RandomPolicy::new()),
            iterations: 0,
        }
    }

    /// Returns the record shared by every path reaching `state`
    pub fn record(&self, state: &S) -> Option<&StateRecord> {
        self.table.get(&state.key())
    }

    /// Pooled visit count and reward of `state`
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

    /// Per-action statistics at the root, in legal-action order
    ///
    /// Visits are the root's per-action counts; means are the pooled means
    /// of the successor records.
    pub fn root_action_values(&self) -> Vec<ActionValue<S::Action>> {
        let Some(record) = self.record(&self.root) else {
            return Vec::new();
        };

        self.root
            .legal_actions()
            .into_iter()
            .zip(record.edge_visits.iter())
            .filter_map(|(action, visits)| {
                let visits = (*visits)?;
                let child = self.root.successor(&action).ok()?;
                let mean = self.record(&child)?.value();
                Some(ActionValue { action, visits, mean })
            })
            .collect()
    }

    /// Records a pass through `state` that ended with `payoff`
    fn visit(&mut self, state: &S, payoff: f64) {
        let action_count = if state.is_terminal() {
            0
        } else {
            state.legal_actions().len()
        };
        let record = self
            .table
            .get_or_insert_with(state.key(), || StateRecord::new(action_count, 0, 0.0));
        record.visits += 1;
        record.total_reward += payoff;
    }

    /// One select/expand/simulate pass below `state`, returning the payoff
    fn run(&mut self, state: &S, rng: &mut dyn RngCore) -> Result<f64> {
        let (done, payoff) = state.terminal();
        if done {
            self.visit(state, payoff);
            return Ok(payoff);
        }

        let actions = state.legal_actions();
        let key = state.key();
        let record = self
            .table
            .get_or_insert_with(key.clone(), || StateRecord::new(actions.len(), 0, 0.0));

        if record.expandable {
            let untried = record.untried();
            let index = *self
                .expansion_policy
                .select_untried(&untried, rng)
                .ok_or(SearchError::NoLegalActions)?;

            let child = state.successor(&actions[index])?;

            // A transposition reached through a new edge continues through its record
            let payoff = if self.table.contains(&child.key()) {
                self.run(&child, rng)?
            } else {
                let payoff = self.simulation_policy.simulate(&child, rng)?;
                self.visit(&child, payoff);
                payoff
            };

            if let Some(record) = self.table.get_mut(&key) {
                record.expand(index, payoff);
            }
            trace!("uct2 expanded action {:?}, payoff {}", actions[index], payoff);
            return Ok(payoff);
        }

        let edge_visits = record.edge_visits.clone();
        let parent_visits = record.visits;
        let mut candidates = Vec::with_capacity(actions.len());
        for (action, visits) in actions.iter().zip(edge_visits) {
            let child = state.successor(action)?;
            let mean = self.record(&child).map_or(0.0, StateRecord::value);
            candidates.push(Candidate {
                mean,
                visits: visits.unwrap_or(0),
            });
        }

        let index = self
            .selection_policy
            .select(parent_visits, state.current_player(), &candidates, rng)
            .ok_or(SearchError::NoLegalActions)?;

        let child = state.successor(&actions[index])?;
        let payoff = self.run(&child, rng)?;

        if let Some(record) = self.table.get_mut(&key) {
            record.update(index, payoff);
        }
        Ok(payoff)
    }
}

impl<S: GameState + 'static> SearchEngine<S> for StateUct<S> {
    fn name(&self) -> &'static str {
        "uct2"
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

    fn searched(iterations: usize, seed: u64) -> StateUct<Connect4> {
        let mut engine = StateUct::new(Connect4::new(), std::f64::consts::SQRT_2);
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
    fn test_new_child_record_is_complete() {
        let engine = searched(1, 2);
        assert_eq!(engine.size(), 2);

        let values = engine.root_action_values();
        assert_eq!(values.len(), 1);
        let child = Connect4::new().successor(&values[0].action).unwrap();
        let record = engine.record(&child).unwrap();
        assert_eq!(record.visits, 1);
        assert_eq!(record.edge_visits.len(), 7);
        assert_eq!(record.total_reward, values[0].mean);
    }

    #[test]
    fn test_root_edge_visits_match_child_record_visits() {
        let engine = searched(300, 3);
        for value in engine.root_action_values() {
            let child = Connect4::new().successor(&value.action).unwrap();
            assert_eq!(engine.record(&child).map(|r| r.visits), Some(value.visits));
        }
    }

    #[test]
    fn test_pooled_means_stay_in_payoff_range() {
        let engine = searched(300, 4);
        for record in engine.table.values() {
            assert!((-1.0..=1.0).contains(&record.value()));
        }
    }
}
