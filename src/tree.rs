//! Tree data structures for the explicit-tree engines
//!
//! Nodes live in an arena and refer to each other by [`NodeId`]. The parent
//! link is only followed upwards during backpropagation; ownership of every
//! node belongs to the arena.

use std::collections::HashMap;
use std::fmt;

use crate::game_state::GameState;

/// Index of a node inside a [`SearchTree`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub usize);

/// Represents a node in the search tree
///
/// Each node holds the game state it represents, visit and reward
/// statistics, and the children materialized so far keyed by action.
pub struct TreeNode<S: GameState> {
    /// The game state at this node
    pub state: S,

    /// Upward link used by backpropagation (None for root)
    pub parent: Option<NodeId>,

    /// Number of times this node has been visited
    pub visits: u64,

    /// Sum of Player-One-signed payoffs backpropagated through this node
    pub total_reward: f64,

    /// Children reachable from this node, keyed by the action leading to them
    pub children: HashMap<S::Action, NodeId>,

    /// True while at least one legal action has no child yet
    pub expandable: bool,

    /// Depth of this node in the tree (root = 0)
    pub depth: usize,

    /// Cached terminal flag for `state`
    pub terminal: bool,
}

impl<S: GameState> TreeNode<S> {
    /// Creates an unvisited node for `state`
    pub fn new(state: S, parent: Option<NodeId>, depth: usize) -> Self {
        let terminal = state.is_terminal();
        let expandable = !terminal && !state.legal_actions().is_empty();

        TreeNode {
            state,
            parent,
            visits: 0,
            total_reward: 0.0,
            children: HashMap::new(),
            expandable,
            depth,
            terminal,
        }
    }

    /// Returns the average reward (value) of this node
    pub fn value(&self) -> f64 {
        crate::utils::exploitation_term(self.total_reward, self.visits)
    }

    /// Legal actions that have no child yet, in legal-action order
    pub fn untried_actions(&self) -> Vec<S::Action> {
        self.state
            .legal_actions()
            .into_iter()
            .filter(|a| !self.children.contains_key(a))
            .collect()
    }
}

/// Arena holding every node of one search tree
///
/// The root is always `NodeId(0)`.
pub struct SearchTree<S: GameState> {
    nodes: Vec<TreeNode<S>>,
}

impl<S: GameState> SearchTree<S> {
    /// Creates a tree containing only the root
    pub fn new(root_state: S) -> Self {
        SearchTree {
            nodes: vec![TreeNode::new(root_state, None, 0)],
        }
    }

    /// Returns the root id
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Returns a node by id
    pub fn get(&self, id: NodeId) -> &TreeNode<S> {
        &self.nodes[id.0]
    }

    /// Returns a mutable node by id
    pub fn get_mut(&mut self, id: NodeId) -> &mut TreeNode<S> {
        &mut self.nodes[id.0]
    }

    /// Number of nodes in the tree
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false: the root exists from construction
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterates over every node
    pub fn iter(&self) -> impl Iterator<Item = &TreeNode<S>> {
        self.nodes.iter()
    }

    /// Attaches a child for `action` under `parent` and returns its id
    ///
    /// Clears the parent's expandable flag once every legal action has a
    /// child.
    pub fn add_child(&mut self, parent: NodeId, action: S::Action, state: S) -> NodeId {
        let id = NodeId(self.nodes.len());
        let depth = self.get(parent).depth + 1;
        self.nodes.push(TreeNode::new(state, Some(parent), depth));

        let legal_count = self.get(parent).state.legal_actions().len();
        let node = self.get_mut(parent);
        node.children.insert(action, id);
        if node.children.len() == legal_count {
            node.expandable = false;
        }
        id
    }

    /// Follows `actions` from the root, returning the node reached if every
    /// step has been materialized
    pub fn find(&self, actions: &[S::Action]) -> Option<NodeId> {
        actions.iter().try_fold(self.root(), |id, action| {
            self.get(id).children.get(action).copied()
        })
    }

    /// Ids on the path from `id` up to and including the root
    pub fn path_to_root(&self, id: NodeId) -> Vec<NodeId> {
        let mut path = vec![id];
        let mut current = id;
        while let Some(parent) = self.get(current).parent {
            path.push(parent);
            current = parent;
        }
        path
    }
}

impl<S: GameState> fmt::Debug for SearchTree<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SearchTree")
            .field("nodes", &self.nodes.len())
            .field("root_visits", &self.get(self.root()).visits)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connect4::Connect4;

    #[test]
    fn test_new_tree_has_expandable_root() {
        let tree = SearchTree::new(Connect4::new());
        let root = tree.get(tree.root());
        assert_eq!(tree.len(), 1);
        assert!(root.expandable);
        assert!(root.parent.is_none());
        assert_eq!(root.untried_actions().len(), 7);
    }

    #[test]
    fn test_expandable_flips_when_all_actions_have_children() {
        let state = Connect4::new();
        let mut tree = SearchTree::new(state.clone());
        let root = tree.root();

        for col in 0..7 {
            assert!(tree.get(root).expandable);
            let child = state.successor(&col).unwrap();
            tree.add_child(root, col, child);
        }

        assert!(!tree.get(root).expandable);
        assert!(tree.get(root).untried_actions().is_empty());
    }

    #[test]
    fn test_find_and_path_to_root() {
        let state = Connect4::new();
        let mut tree = SearchTree::new(state.clone());
        let a = state.successor(&3).unwrap();
        let b = a.successor(&4).unwrap();

        let first = tree.add_child(tree.root(), 3, a);
        let second = tree.add_child(first, 4, b);

        assert_eq!(tree.find(&[3, 4]), Some(second));
        assert_eq!(tree.find(&[4]), None);
        assert_eq!(tree.path_to_root(second), vec![second, first, tree.root()]);
        assert_eq!(tree.get(second).depth, 2);
    }
}
