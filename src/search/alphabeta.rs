//! Depth-bounded minimax with alpha-beta pruning
//!
//! Values are expressed from the point of view of the perspective player
//! fixed at construction: terminal payoffs are multiplied by that player's
//! sign, and the heuristic is negated when the opponent is to move at the
//! cutoff. Heuristic values are squashed into the open interval (-1, 1), so
//! a proven win or loss always dominates a static estimate.
//!
//! Nothing persists between searches. Every driver iteration recomputes the
//! whole bounded search and only the latest outcome is kept.

use log::trace;
use rand::RngCore;

use crate::{
    game_state::{GameState, Player},
    heuristic::Heuristic,
    search::SearchEngine,
    Result, SearchError,
};

/// Value and chosen action index of one alpha-beta call
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AlphaBetaOutcome {
    /// Minimax value from the perspective player's point of view
    pub value: f64,
    /// Index of the chosen action in the state's legal-action list
    pub index: usize,
}

/// Alpha-beta search engine
pub struct AlphaBeta<S: GameState, H: Heuristic<S>> {
    root: S,
    heuristic: H,
    depth: usize,
    perspective: Player,
    last: Option<AlphaBetaOutcome>,
    iterations: u64,
}

impl<S: GameState, H: Heuristic<S>> AlphaBeta<S, H> {
    /// Creates an engine searching `depth` plies below `root` for `perspective`
    pub fn new(root: S, heuristic: H, depth: usize, perspective: Player) -> Self {
        AlphaBeta {
            root,
            heuristic,
            depth,
            perspective,
            last: None,
            iterations: 0,
        }
    }

    /// Outcome of the most recent search, if any
    pub fn last_outcome(&self) -> Option<AlphaBetaOutcome> {
        self.last
    }

    /// Runs a full search from the root
    pub fn search_root(&self) -> Result<AlphaBetaOutcome> {
        self.search(&self.root, self.depth, f64::NEG_INFINITY, f64::INFINITY)
    }

    /// Heuristic value of a non-terminal cutoff state, squashed into (-1, 1)
    fn cutoff_value(&self, state: &S) -> f64 {
        let mut h = self.heuristic.evaluate(state);
        if state.current_player() != self.perspective {
            h = -h;
        }
        h / (1.0 + h.abs())
    }

    fn search(&self, state: &S, depth: usize, mut alpha: f64, mut beta: f64) -> Result<AlphaBetaOutcome> {
        // Terminal check takes priority over the depth cutoff
        let (done, payoff) = state.terminal();
        if done {
            return Ok(AlphaBetaOutcome {
                value: payoff * self.perspective.sign(),
                index: 0,
            });
        }
        if depth == 0 {
            return Ok(AlphaBetaOutcome {
                value: self.cutoff_value(state),
                index: 0,
            });
        }

        let maximizing = state.current_player() == self.perspective;
        let mut best = AlphaBetaOutcome {
            value: if maximizing {
                f64::NEG_INFINITY
            } else {
                f64::INFINITY
            },
            index: 0,
        };

        for (index, action) in state.legal_actions().iter().enumerate() {
            let child = state.successor(action)?;
            let value = self.search(&child, depth - 1, alpha, beta)?.value;

            if maximizing {
                if value > best.value {
                    best = AlphaBetaOutcome { value, index };
                }
                alpha = alpha.max(best.value);
            } else {
                if value < best.value {
                    best = AlphaBetaOutcome { value, index };
                }
                beta = beta.min(best.value);
            }

            if alpha >= beta {
                break; // cutoff
            }
        }

        Ok(best)
    }
}

impl<S: GameState, H: Heuristic<S>> SearchEngine<S> for AlphaBeta<S, H> {
    fn name(&self) -> &'static str {
        "alphabeta"
    }

    fn root_state(&self) -> &S {
        &self.root
    }

    fn iterate(&mut self, _rng: &mut dyn RngCore) -> Result<()> {
        let outcome = self.search_root()?;
        trace!(
            "alphabeta depth {}: value {:.3}, index {}",
            self.depth,
            outcome.value,
            outcome.index
        );
        self.last = Some(outcome);
        self.iterations += 1;
        Ok(())
    }

    /// Returns the action chosen by the latest search
    ///
    /// The search was run for the perspective given at construction; the
    /// argument is not consulted.
    fn recommend(&self, _perspective: Player) -> Result<S::Action> {
        let outcome = self.last.ok_or(SearchError::EmptyRecommendation)?;
        let actions = self.root.legal_actions();
        if actions.is_empty() {
            return Err(SearchError::NoLegalActions);
        }
        actions
            .get(outcome.index)
            .cloned()
            .ok_or(SearchError::EmptyRecommendation)
    }

    fn size(&self) -> usize {
        0
    }

    fn iterations(&self) -> u64 {
        self.iterations
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connect4::Connect4;
    use crate::heuristic::WindowHeuristic;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn engine(state: Connect4, depth: usize, perspective: Player) -> AlphaBeta<Connect4, WindowHeuristic> {
        AlphaBeta::new(state, WindowHeuristic::new(), depth, perspective)
    }

    /// Player One holds the bottom row at columns 0-2; column 3 wins.
    fn player_one_threat() -> Connect4 {
        let mut rows = [[0u8; 7]; 6];
        rows[5][0] = 1;
        rows[5][1] = 1;
        rows[5][2] = 1;
        rows[4][0] = 2;
        rows[4][1] = 2;
        rows[5][6] = 2;
        Connect4::from_rows(rows, Player::One).unwrap()
    }

    /// Player Two holds the bottom row at columns 0-2; column 3 wins.
    fn player_two_threat() -> Connect4 {
        let mut rows = [[0u8; 7]; 6];
        rows[5][0] = 2;
        rows[5][1] = 2;
        rows[5][2] = 2;
        rows[4][0] = 1;
        rows[4][1] = 1;
        rows[5][6] = 1;
        rows[4][6] = 1;
        Connect4::from_rows(rows, Player::Two).unwrap()
    }

    #[test]
    fn test_empty_board_depth_one_picks_first_column() {
        let outcome = engine(Connect4::new(), 1, Player::One).search_root().unwrap();
        assert_eq!(outcome.index, 0);
        assert_eq!(outcome.value, 0.0);
    }

    #[test]
    fn test_depth_zero_returns_root_heuristic() {
        let state = player_one_threat();
        let outcome = engine(state.clone(), 0, Player::One).search_root().unwrap();
        let raw = WindowHeuristic::new().evaluate(&state);
        assert_eq!(outcome.index, 0);
        assert_eq!(outcome.value, raw / (1.0 + raw.abs()));
        assert!(outcome.value > 0.0 && outcome.value < 1.0);
    }

    #[test]
    fn test_immediate_win_for_player_one_at_every_depth() {
        for depth in 1..=4 {
            let outcome = engine(player_one_threat(), depth, Player::One).search_root().unwrap();
            assert_eq!(outcome.index, 3, "depth {}", depth);
            assert_eq!(outcome.value, 1.0);
        }
    }

    #[test]
    fn test_immediate_win_for_player_two_at_every_depth() {
        for depth in 1..=4 {
            let outcome = engine(player_two_threat(), depth, Player::Two).search_root().unwrap();
            assert_eq!(outcome.index, 3, "depth {}", depth);
            assert_eq!(outcome.value, 1.0);
        }
    }

    #[test]
    fn test_opponent_perspective_sees_forced_loss() {
        let outcome = engine(player_two_threat(), 1, Player::One).search_root().unwrap();
        assert_eq!(outcome.index, 3);
        assert_eq!(outcome.value, -1.0);
    }

    #[test]
    fn test_search_is_deterministic() {
        let state = player_one_threat().successor(&5).unwrap();
        let first = engine(state.clone(), 3, Player::Two).search_root().unwrap();
        let second = engine(state, 3, Player::Two).search_root().unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_recommend_requires_a_search() {
        let mut ab = engine(player_one_threat(), 2, Player::One);
        assert_eq!(ab.recommend(Player::One), Err(SearchError::EmptyRecommendation));

        let mut rng = StdRng::seed_from_u64(0);
        ab.iterate(&mut rng).unwrap();
        ab.iterate(&mut rng).unwrap();
        assert_eq!(ab.iterations(), 2);
        assert_eq!(ab.recommend(Player::One), Ok(3));
    }
}
