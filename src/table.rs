//! Transposition records for the state-keyed UCT engines
//!
//! Records are stored in a [`TranspositionTable`] keyed by the canonical
//! state encoding, so every path that reaches an equal board and mover
//! resolves to the same record. Per-action slots are indexed by the
//! position of the action in the state's legal-action list.

use std::collections::HashMap;
use std::hash::Hash;

/// Reward and visit totals for one action of an [`EdgeRecord`]
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct EdgeStats {
    /// Sum of Player-One-signed payoffs that went through this action
    pub total_reward: f64,
    /// Number of times this action was taken from the record's state
    pub visits: u64,
}

impl EdgeStats {
    /// Mean reward of this action
    pub fn value(&self) -> f64 {
        crate::utils::exploitation_term(self.total_reward, self.visits)
    }
}

/// Record with per-action reward accumulators
#[derive(Debug, Clone, PartialEq)]
pub struct EdgeRecord {
    /// One slot per legal action; `None` until the action is expanded
    pub edges: Vec<Option<EdgeStats>>,
    /// Number of times this state was passed through
    pub visits: u64,
    /// Sum of Player-One-signed payoffs over every pass through this state
    pub total_reward: f64,
    /// True while at least one slot is still `None`
    pub expandable: bool,
}

impl EdgeRecord {
    /// Creates a record for a state with `action_count` legal actions
    pub fn new(action_count: usize, visits: u64, total_reward: f64) -> Self {
        EdgeRecord {
            edges: vec![None; action_count],
            visits,
            total_reward,
            expandable: action_count > 0,
        }
    }

    /// Mean reward over every pass through this state
    pub fn value(&self) -> f64 {
        crate::utils::exploitation_term(self.total_reward, self.visits)
    }

    /// Records a pass that ended below this state without using its edges
    pub fn absorb(&mut self, payoff: f64) {
        self.visits += 1;
        self.total_reward += payoff;
    }

    /// Indices of actions without statistics yet
    pub fn untried(&self) -> Vec<usize> {
        untried_slots(&self.edges)
    }

    /// Records the first payoff for action `index`
    pub fn expand(&mut self, index: usize, payoff: f64) {
        self.edges[index] = Some(EdgeStats {
            total_reward: payoff,
            visits: 1,
        });
        self.absorb(payoff);
        self.expandable = self.edges.iter().any(Option::is_none);
    }

    /// Adds a payoff to an already expanded action
    pub fn update(&mut self, index: usize, payoff: f64) {
        if let Some(edge) = self.edges[index].as_mut() {
            edge.total_reward += payoff;
            edge.visits += 1;
        }
        self.absorb(payoff);
    }
}

/// Record with a single pooled reward shared by every parent
///
/// Always carries the complete field set, including the pooled reward, from
/// the moment it is created.
#[derive(Debug, Clone, PartialEq)]
pub struct StateRecord {
    /// Per-action visit counts; `None` until the action is expanded
    pub edge_visits: Vec<Option<u64>>,
    /// Number of times this state was passed through
    pub visits: u64,
    /// Sum of Player-One-signed payoffs that went through this state
    pub total_reward: f64,
    /// True while at least one slot is still `None`
    pub expandable: bool,
}

impl StateRecord {
    /// Creates a record for a state with `action_count` legal actions
    pub fn new(action_count: usize, visits: u64, total_reward: f64) -> Self {
        StateRecord {
            edge_visits: vec![None; action_count],
            visits,
            total_reward,
            expandable: action_count > 0,
        }
    }

    /// Mean pooled reward of this state
    pub fn value(&self) -> f64 {
        crate::utils::exploitation_term(self.total_reward, self.visits)
    }

    /// Indices of actions without statistics yet
    pub fn untried(&self) -> Vec<usize> {
        untried_slots(&self.edge_visits)
    }

    /// Records the first pass through action `index`
    pub fn expand(&mut self, index: usize, payoff: f64) {
        self.edge_visits[index] = Some(1);
        self.visits += 1;
        self.total_reward += payoff;
        self.expandable = self.edge_visits.iter().any(Option::is_none);
    }

    /// Records another pass through an already expanded action
    pub fn update(&mut self, index: usize, payoff: f64) {
        if let Some(visits) = self.edge_visits[index].as_mut() {
            *visits += 1;
        }
        self.visits += 1;
        self.total_reward += payoff;
    }
}

fn untried_slots<T>(slots: &[Option<T>]) -> Vec<usize> {
    slots
        .iter()
        .enumerate()
        .filter(|(_, slot)| slot.is_none())
        .map(|(i, _)| i)
        .collect()
}

/// State-keyed record store
#[derive(Debug, Clone)]
pub struct TranspositionTable<K: Eq + Hash, R> {
    records: HashMap<K, R>,
}

impl<K: Eq + Hash, R> TranspositionTable<K, R> {
    /// Creates an empty table
    pub fn new() -> Self {
        TranspositionTable {
            records: HashMap::new(),
        }
    }

    /// Returns the record for `key`
    pub fn get(&self, key: &K) -> Option<&R> {
        self.records.get(key)
    }

    /// Returns the record for `key` mutably
    pub fn get_mut(&mut self, key: &K) -> Option<&mut R> {
        self.records.get_mut(key)
    }

    /// True if `key` already has a record
    pub fn contains(&self, key: &K) -> bool {
        self.records.contains_key(key)
    }

    /// Returns the record for `key`, creating it with `make` if missing
    pub fn get_or_insert_with<F: FnOnce() -> R>(&mut self, key: K, make: F) -> &mut R {
        self.records.entry(key).or_insert_with(make)
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True if the table holds no records
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterates over every record
    pub fn values(&self) -> impl Iterator<Item = &R> {
        self.records.values()
    }
}

impl<K: Eq + Hash, R> Default for TranspositionTable<K, R> {
    fn default() -> Self {
        Self::new()
    }
}
