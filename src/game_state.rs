//! Traits defining the game-state contract consumed by the search engines.
//!
//! The GameState trait is the only interface the engines see. Any
//! two-player, zero-sum, perfect-information game can be searched once it
//! implements this trait.

use std::fmt::Debug;
use std::hash::Hash;

use rand::seq::SliceRandom;
use rand::RngCore;

use crate::{Result, SearchError};

/// Trait for actions that can be taken in a game
///
/// Actions are used as map keys by the explicit-tree engines, so they must be
/// hashable and comparable by value.
pub trait Action: Clone + Debug + PartialEq + Eq + Hash + Send + Sync {
    /// Returns a unique identifier for this action
    fn id(&self) -> usize;
}

impl Action for usize {
    fn id(&self) -> usize {
        *self
    }
}

/// The two actors of a zero-sum game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Player {
    /// Moves first; payoffs are signed in this player's favour
    One,
    /// Moves second
    Two,
}

impl Player {
    /// Returns the opponent
    pub fn other(self) -> Player {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }

    /// Multiplier that turns a Player-One-signed reward into this player's view
    pub fn sign(self) -> f64 {
        match self {
            Player::One => 1.0,
            Player::Two => -1.0,
        }
    }

    /// Numeric id used on boards and in encodings (1 or 2)
    pub fn id(self) -> u8 {
        match self {
            Player::One => 1,
            Player::Two => 2,
        }
    }
}

/// Trait defining the game state interface required by the engines
///
/// States are immutable snapshots: `successor` returns a new state and never
/// modifies `self`. All payoffs are signed from Player One's perspective:
/// `+1.0` for a Player One win, `-1.0` for a Player Two win, `0.0` otherwise.
pub trait GameState: Clone + Debug + PartialEq + Eq {
    /// The type of actions that can be taken in this game
    type Action: Action;

    /// Canonical, content-based encoding of a state used as transposition key
    ///
    /// Two independently derived states with the same board contents and the
    /// same mover must produce equal keys.
    type Key: Clone + Debug + Eq + Hash;

    /// Returns the player whose turn it is in this state
    fn current_player(&self) -> Player;

    /// Returns the legal actions from this state
    ///
    /// The same state must always yield the same ordering. Terminal states
    /// return an empty list.
    fn legal_actions(&self) -> Vec<Self::Action>;

    /// Applies a legal action, returning the resulting state
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::IllegalAction`] if `action` is not in
    /// `legal_actions()`.
    fn successor(&self, action: &Self::Action) -> Result<Self>;

    /// Returns `(is_terminal, payoff)`; the payoff is `0.0` unless the game
    /// has concluded with a winner
    fn terminal(&self) -> (bool, f64);

    /// Signed outcome of the position regardless of whether moves remain
    fn payoff(&self) -> f64;

    /// Returns the canonical key for transposition lookups
    fn key(&self) -> Self::Key;

    /// Returns true if the game is over
    fn is_terminal(&self) -> bool {
        self.terminal().0
    }

    /// Plays uniformly random legal actions until a terminal state is reached
    /// and returns its payoff
    fn random_playout(&self, rng: &mut dyn RngCore) -> Result<f64> {
        let mut current = self.clone();

        loop {
            let (done, payoff) = current.terminal();
            if done {
                return Ok(payoff);
            }

            let actions = current.legal_actions();
            let action = actions.choose(&mut *rng).ok_or(SearchError::NoLegalActions)?;
            current = current.successor(action)?;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_helpers() {
        assert_eq!(Player::One.other(), Player::Two);
        assert_eq!(Player::Two.other(), Player::One);
        assert_eq!(Player::One.sign(), 1.0);
        assert_eq!(Player::Two.sign(), -1.0);
        assert_eq!(Player::Two.id(), 2);
    }

    #[test]
    fn test_usize_action_id() {
        assert_eq!(Action::id(&5usize), 5);
    }
}
