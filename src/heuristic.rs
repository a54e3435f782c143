//! Static evaluation used by alpha-beta at the depth cutoff
//!
//! The window heuristic scans every line of four consecutive cells and
//! rewards open twos and threes for the player to move, penalising the same
//! patterns for the opponent.

use crate::{
    connect4::{Connect4, CONNECT},
    game_state::GameState,
};

/// Score for three own discs and one empty cell in a window
pub const THREE_OPEN: f64 = 0.7;

/// Score for two own discs and two empty cells in a window
pub const TWO_OPEN: f64 = 0.4;

/// Trait for static evaluators of non-terminal positions
pub trait Heuristic<S: GameState> {
    /// Evaluates `state` from the point of view of its current mover
    fn evaluate(&self, state: &S) -> f64;
}

/// Line-window evaluator for Connect Four
#[derive(Debug, Clone, Copy, Default)]
pub struct WindowHeuristic;

impl WindowHeuristic {
    /// Creates a new window heuristic
    pub fn new() -> Self {
        WindowHeuristic
    }

    /// Scores a single window for `own` against `opponent`
    pub fn score_window(window: &[u8; CONNECT], own: u8, opponent: u8) -> f64 {
        let count = |value: u8| window.iter().filter(|&&c| c == value).count();
        let (mine, theirs, empty) = (count(own), count(opponent), count(0));

        match (mine, theirs, empty) {
            (3, _, 1) => THREE_OPEN,
            (2, _, 2) => TWO_OPEN,
            (_, 3, 1) => -THREE_OPEN,
            (_, 2, 2) => -TWO_OPEN,
            _ => 0.0,
        }
    }
}

impl Heuristic<Connect4> for WindowHeuristic {
    fn evaluate(&self, state: &Connect4) -> f64 {
        let own = state.current_player();
        let (own, opponent) = (own.id(), own.other().id());

        state
            .windows()
            .map(|window| Self::score_window(&window, own, opponent))
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::Player;

    fn play(columns: &[usize]) -> Connect4 {
        columns
            .iter()
            .fold(Connect4::new(), |s, c| s.successor(c).unwrap())
    }

    #[test]
    fn test_window_scores() {
        assert_eq!(WindowHeuristic::score_window(&[1, 1, 1, 0], 1, 2), 0.7);
        assert_eq!(WindowHeuristic::score_window(&[1, 0, 1, 0], 1, 2), 0.4);
        assert_eq!(WindowHeuristic::score_window(&[2, 2, 0, 2], 1, 2), -0.7);
        assert_eq!(WindowHeuristic::score_window(&[0, 2, 2, 0], 1, 2), -0.4);
        assert_eq!(WindowHeuristic::score_window(&[1, 2, 1, 0], 1, 2), 0.0);
        assert_eq!(WindowHeuristic::score_window(&[1, 0, 0, 0], 1, 2), 0.0);
        assert_eq!(WindowHeuristic::score_window(&[0, 0, 0, 0], 1, 2), 0.0);
    }

    #[test]
    fn test_empty_and_single_disc_boards_score_zero() {
        let h = WindowHeuristic::new();
        assert_eq!(h.evaluate(&Connect4::new()), 0.0);
        assert_eq!(h.evaluate(&play(&[3])), 0.0);
    }

    #[test]
    fn test_evaluation_is_relative_to_mover() {
        // Two Player One discs side by side on the bottom row, Player Two on top
        let state = play(&[2, 2, 3]);
        assert_eq!(state.current_player(), Player::Two);

        let h = WindowHeuristic::new();
        let score = h.evaluate(&state);
        assert!(score < 0.0, "opponent twos should count against the mover");

        let mirrored = Connect4::from_rows(*state.rows(), Player::One).unwrap();
        assert!((h.evaluate(&mirrored) + score).abs() < 1e-9);
    }
}
