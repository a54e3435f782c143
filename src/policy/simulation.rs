//! Simulation policies for the MCTS-family engines
//!
//! Simulation policies estimate the value of a freshly expanded state by
//! playing the game out to the end.

use rand::RngCore;

use crate::{game_state::GameState, Result};

/// Trait for policies that simulate games
pub trait SimulationPolicy<S: GameState>: Send + Sync {
    /// Simulates a game from the given state and returns the terminal payoff,
    /// signed from Player One's perspective
    fn simulate(&self, state: &S, rng: &mut dyn RngCore) -> Result<f64>;
}

/// Random simulation policy
///
/// This policy plays uniformly random legal moves until the game ends.
#[derive(Debug, Clone, Default)]
pub struct RandomPolicy;

impl RandomPolicy {
    /// Creates a new random policy
    pub fn new() -> Self {
        RandomPolicy
    }
}

impl<S: GameState> SimulationPolicy<S> for RandomPolicy {
    fn simulate(&self, state: &S, rng: &mut dyn RngCore) -> Result<f64> {
        state.random_playout(rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connect4::Connect4;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_random_playout_reaches_terminal_payoff() {
        let policy = RandomPolicy::new();
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..20 {
            let payoff = policy.simulate(&Connect4::new(), &mut rng).unwrap();
            assert!(payoff == 1.0 || payoff == -1.0 || payoff == 0.0);
        }
    }

    #[test]
    fn test_playout_is_reproducible_with_seed() {
        let policy = RandomPolicy::new();
        let run = |seed| {
            let mut rng = StdRng::seed_from_u64(seed);
            (0..10)
                .map(|_| policy.simulate(&Connect4::new(), &mut rng).unwrap())
                .collect::<Vec<f64>>()
        };
        assert_eq!(run(5), run(5));
    }
}
