#![allow(dead_code)]

use connect4_search::{GameState, Heuristic, Player, SearchError};

/// Tiny race game with transpositions
///
/// Each move increments one of two counters; the game ends after three
/// moves and Player One wins if `a > b`. Playing `a` then `b` and playing
/// `b` then `a` reach the same state.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Race {
    pub a: u8,
    pub b: u8,
    pub mover: Player,
}

pub const RACE_LENGTH: u8 = 3;

impl Race {
    pub fn new() -> Self {
        Race {
            a: 0,
            b: 0,
            mover: Player::One,
        }
    }

    pub fn at(a: u8, b: u8, mover: Player) -> Self {
        Race { a, b, mover }
    }
}

impl GameState for Race {
    type Action = usize;
    type Key = (u8, u8, u8);

    fn current_player(&self) -> Player {
        self.mover
    }

    fn legal_actions(&self) -> Vec<usize> {
        if self.a + self.b >= RACE_LENGTH {
            return vec![];
        }
        vec![0, 1]
    }

    fn successor(&self, action: &usize) -> Result<Self, SearchError> {
        if !self.legal_actions().contains(action) {
            return Err(SearchError::IllegalAction(format!("{}", action)));
        }
        let mut next = self.clone();
        if *action == 0 {
            next.a += 1;
        } else {
            next.b += 1;
        }
        next.mover = self.mover.other();
        Ok(next)
    }

    fn terminal(&self) -> (bool, f64) {
        if self.a + self.b >= RACE_LENGTH {
            (true, self.payoff())
        } else {
            (false, 0.0)
        }
    }

    fn payoff(&self) -> f64 {
        if self.a + self.b < RACE_LENGTH {
            0.0
        } else if self.a > self.b {
            1.0
        } else {
            -1.0
        }
    }

    fn key(&self) -> (u8, u8, u8) {
        (self.a, self.b, self.mover.id())
    }
}

/// Heuristic that knows nothing
#[derive(Clone, Debug, Default)]
pub struct Flat;

impl Heuristic<Race> for Flat {
    fn evaluate(&self, _state: &Race) -> f64 {
        0.0
    }
}

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}
