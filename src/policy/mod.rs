//! Policies for the phases of the MCTS-family engines
//!
//! - Selection policies: how to choose which child to descend into
//! - Expansion policy: which untried action to materialize
//! - Simulation policies: how to play out games from a state
//! - Backpropagation policies: how to update node statistics

pub mod backpropagation;
pub mod expansion;
pub mod selection;
pub mod simulation;

pub use backpropagation::{BackpropagationPolicy, StandardPolicy};
pub use expansion::RandomExpansionPolicy;
pub use selection::{Candidate, SelectionPolicy, Ucb1Policy, UniformPolicy};
pub use simulation::{RandomPolicy, SimulationPolicy};
