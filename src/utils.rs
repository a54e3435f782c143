//! Utility functions for the UCB computations
//!
//! Rewards are signed from Player One's perspective, so minimizing nodes
//! subtract the exploration term instead of flipping the reward.

/// Calculates the exploitation term for UCB1
///
/// This is simply the average reward for a node.
pub fn exploitation_term(total_reward: f64, visits: u64) -> f64 {
    if visits == 0 {
        return 0.0;
    }
    total_reward / visits as f64
}

/// Calculates the exploration term for UCB1
///
/// This is the term that encourages exploration of less-visited nodes.
pub fn exploration_term(parent_visits: u64, child_visits: u64, exploration_constant: f64) -> f64 {
    if child_visits == 0 {
        return f64::INFINITY;
    }

    exploration_constant * ((parent_visits as f64).ln() / child_visits as f64).sqrt()
}

/// Calculates the signed UCB1 value of a child
///
/// Maximizing parents add the exploration term, minimizing parents subtract
/// it. An unvisited child scores `+inf` or `-inf` accordingly.
pub fn ucb1_value(
    mean: f64,
    child_visits: u64,
    parent_visits: u64,
    exploration_constant: f64,
    maximizing: bool,
) -> f64 {
    let exploration = exploration_term(parent_visits, child_visits, exploration_constant);
    if maximizing {
        mean + exploration
    } else {
        mean - exploration
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exploitation_term() {
        assert_eq!(exploitation_term(3.0, 4), 0.75);
        assert_eq!(exploitation_term(1.0, 0), 0.0);
    }

    #[test]
    fn test_exploration_matches_closed_form() {
        let c = std::f64::consts::SQRT_2;
        let expected = (2.0 * (10f64).ln() / 3.0).sqrt();
        assert!((exploration_term(10, 3, c) - expected).abs() < 1e-12);
    }

    #[test]
    fn test_ucb_sign_follows_mover() {
        let c = std::f64::consts::SQRT_2;
        let max = ucb1_value(0.2, 2, 8, c, true);
        let min = ucb1_value(0.2, 2, 8, c, false);
        assert!(max > 0.2);
        assert!(min < 0.2);
        assert!(((max - 0.2) - (0.2 - min)).abs() < 1e-12);
        assert_eq!(ucb1_value(0.0, 0, 8, c, false), f64::NEG_INFINITY);
    }
}
