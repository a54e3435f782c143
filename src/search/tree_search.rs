//! Explicit-tree Monte Carlo search
//!
//! One node per path from the root. The selection policy is the only thing
//! that differs between plain Monte Carlo tree search (uniform random
//! descent) and tree UCT (UCB1 descent).

use log::trace;
use rand::RngCore;

use crate::{
    game_state::{GameState, Player},
    policy::{
        BackpropagationPolicy, Candidate, RandomExpansionPolicy, RandomPolicy, SelectionPolicy,
        SimulationPolicy, StandardPolicy, Ucb1Policy, UniformPolicy,
    },
    search::{recommend_from_values, ActionValue, NodeStats, SearchEngine},
    tree::{NodeId, SearchTree},
    Result, SearchError,
};

/// Explicit-tree search parameterized by its selection policy
pub struct TreeSearch<S: GameState, P: SelectionPolicy> {
    tree: SearchTree<S>,
    selection_policy: P,
    expansion_policy: RandomExpansionPolicy,
    simulation_policy: Box<dyn SimulationPolicy<S>>,
    backpropagation_policy: StandardPolicy,
    name: &'static str,
    iterations: u64,
}

/// Plain Monte Carlo tree search: uniform random descent
pub type PlainMcts<S> = TreeSearch<S, UniformPolicy>;

/// Tree UCT: UCB1 descent over an explicit tree
pub type TreeUct<S> = TreeSearch<S, Ucb1Policy>;

impl<S: GameState + 'static> TreeSearch<S, UniformPolicy> {
    /// Creates a plain MCTS engine rooted at `root_state`
    pub fn plain(root_state: S) -> Self {
        let mut engine = Self::new(root_state, UniformPolicy::new());
        engine.name = "mcts";
        engine
    }
}

impl<S: GameState + 'static> TreeSearch<S, Ucb1Policy> {
    /// Creates a tree UCT engine rooted at `root_state`
    pub fn uct(root_state: S, exploration_constant: f64) -> Self {
        let mut engine = Self::new(root_state, Ucb1Policy::new(exploration_constant));
        engine.name = "uct0";
        engine
    }
}

impl<S: GameState + 'static, P: SelectionPolicy> TreeSearch<S, P> {
    /// Creates an engine with the given selection policy
    pub fn new(root_state: S, selection_policy: P) -> Self {
        TreeSearch {
            tree: SearchTree::new(root_state),
            selection_policy,
            expansion_policy: RandomExpansionPolicy::new(),
            simulation_policy: Box::new(RandomPolicy::new()),
            backpropagation_policy: StandardPolicy::new(),
            name: "tree-search",
            iterations: 0,
        }
    }

    /// The underlying tree
    pub fn tree(&self) -> &SearchTree<S> {
        &self.tree
    }

    /// Visit count of the root
    pub fn root_visits(&self) -> u64 {
        self.tree.get(self.tree.root()).visits
    }

    /// Per-action statistics of the root's children, in legal-action order
    pub fn root_action_values(&self) -> Vec<ActionValue<S::Action>> {
        let root = self.tree.get(self.tree.root());
        root.state
            .legal_actions()
            .into_iter()
            .filter_map(|action| {
                let child = self.tree.get(*root.children.get(&action)?);
                Some(ActionValue {
                    action,
                    visits: child.visits,
                    mean: child.value(),
                })
            })
            .collect()
    }

    /// Statistics of the node reached by playing `actions` from the root
    pub fn node_stats_along(&self, actions: &[S::Action]) -> Option<NodeStats> {
        self.tree.find(actions).map(|id| {
            let node = self.tree.get(id);
            NodeStats {
                visits: node.visits,
                total_reward: node.total_reward,
            }
        })
    }

    /// Number of distinct nodes representing `state`
    pub fn nodes_with_state(&self, state: &S) -> usize {
        self.tree.iter().filter(|node| &node.state == state).count()
    }

    /// Selection and expansion: descend while fully expanded, then add one child
    fn select_and_expand(&mut self, rng: &mut dyn RngCore) -> Result<NodeId> {
        let mut current = self.tree.root();

        loop {
            let node = self.tree.get(current);
            if node.terminal {
                return Ok(current);
            }

            if node.expandable {
                let untried = node.untried_actions();
                let action = self
                    .expansion_policy
                    .select_untried(&untried, rng)
                    .ok_or(SearchError::NoLegalActions)?
                    .clone();
                let next_state = node.state.successor(&action)?;
                return Ok(self.tree.add_child(current, action, next_state));
            }

            let children: Vec<NodeId> = node
                .state
                .legal_actions()
                .iter()
                .filter_map(|action| node.children.get(action).copied())
                .collect();
            let candidates: Vec<Candidate> = children
                .iter()
                .map(|&id| {
                    let child = self.tree.get(id);
                    Candidate::from_totals(child.total_reward, child.visits)
                })
                .collect();

            let index = self
                .selection_policy
                .select(node.visits, node.state.current_player(), &candidates, rng)
                .ok_or(SearchError::NoLegalActions)?;
            current = children[index];
        }
    }

    /// Backpropagation: walk the parent links up to the root
    fn backpropagate(&mut self, leaf: NodeId, payoff: f64) {
        for id in self.tree.path_to_root(leaf) {
            self.backpropagation_policy
                .update_stats(self.tree.get_mut(id), payoff);
        }
    }

    /// Returns a visualization of the search tree down to `max_depth`
    pub fn visualize_tree(&self, max_depth: usize) -> String {
        let mut result = String::new();
        self.visualize_node(self.tree.root(), None, max_depth, &mut result);
        result
    }

    fn visualize_node(
        &self,
        id: NodeId,
        action: Option<&S::Action>,
        max_depth: usize,
        output: &mut String,
    ) {
        let node = self.tree.get(id);
        let indent = "  ".repeat(node.depth);
        let action_str = match action {
            Some(action) => format!("{:?}", action),
            None => "Root".to_string(),
        };

        output.push_str(&format!(
            "{}{} (visits: {}, value: {:.3})\n",
            indent,
            action_str,
            node.visits,
            node.value()
        ));

        if node.depth >= max_depth {
            return;
        }
        for action in node.state.legal_actions() {
            if let Some(&child) = node.children.get(&action) {
                self.visualize_node(child, Some(&action), max_depth, output);
            }
        }
    }
}

impl<S: GameState + 'static, P: SelectionPolicy> SearchEngine<S> for TreeSearch<S, P> {
    fn name(&self) -> &'static str {
        self.name
    }

    fn root_state(&self) -> &S {
        &self.tree.get(self.tree.root()).state
    }

    fn iterate(&mut self, rng: &mut dyn RngCore) -> Result<()> {
        // 1. Selection + 2. Expansion
        let leaf = self.select_and_expand(rng)?;

        // 3. Simulation
        let payoff = self
            .simulation_policy
            .simulate(&self.tree.get(leaf).state, rng)?;

        // 4. Backpropagation
        self.backpropagate(leaf, payoff);
        self.iterations += 1;

        trace!(
            "iteration {}: leaf depth {}, payoff {}",
            self.iterations,
            self.tree.get(leaf).depth,
            payoff
        );
        Ok(())
    }

    fn recommend(&self, _perspective: Player) -> Result<S::Action> {
        recommend_from_values(&self.root_action_values(), self.root_state().current_player())
    }

    fn size(&self) -> usize {
        self.tree.len()
    }

    fn iterations(&self) -> u64 {
        self.iterations
    }
}
