//! Reference Connect Four rule engine
//!
//! A standard 6-row by 7-column board. Row 0 is the top row and discs fall
//! to the lowest empty cell of the chosen column:
//!
//! ```text
//! Row 0: . . . . . . .   <- Top
//! Row 1: . . . . . . .
//! Row 2: . . . . . . .
//! Row 3: . . . . . . .
//! Row 4: . . . . . . .
//! Row 5: . . . . . . .   <- Bottom
//!        0 1 2 3 4 5 6
//! ```
//!
//! Cells hold `0` (empty), `1` (Player One) or `2` (Player Two).

use std::fmt;

use crate::{
    game_state::{GameState, Player},
    Result, SearchError,
};

/// Board dimensions
pub const ROWS: usize = 6;
pub const COLS: usize = 7;

/// Number of consecutive discs needed to win
pub const CONNECT: usize = 4;

/// Line directions as (row step, column step): horizontal, vertical and both diagonals
pub(crate) static DIRECTIONS: [(isize, isize); 4] = [(0, 1), (1, 0), (1, 1), (-1, 1)];

/// Connect Four position: board contents plus the player to move
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Connect4 {
    board: [[u8; COLS]; ROWS],
    mover: Player,
}

impl Connect4 {
    /// Creates the empty starting position with Player One to move
    pub fn new() -> Self {
        Connect4 {
            board: [[0; COLS]; ROWS],
            mover: Player::One,
        }
    }

    /// Builds a position from explicit rows (top row first)
    ///
    /// Each cell must be 0, 1 or 2. Gravity is not checked, which keeps test
    /// fixtures short.
    pub fn from_rows(rows: [[u8; COLS]; ROWS], mover: Player) -> Result<Self> {
        if let Some(cell) = rows.iter().flatten().find(|&&c| c > 2) {
            return Err(SearchError::InvalidConfiguration(format!(
                "board cell value {} is not 0, 1 or 2",
                cell
            )));
        }
        Ok(Connect4 { board: rows, mover })
    }

    /// Returns the cell at `(row, col)`
    pub fn cell(&self, row: usize, col: usize) -> u8 {
        self.board[row][col]
    }

    /// Returns the raw board, top row first
    pub fn rows(&self) -> &[[u8; COLS]; ROWS] {
        &self.board
    }

    /// A column accepts a disc while its top cell is empty
    pub fn is_legal(&self, column: usize) -> bool {
        column < COLS && self.board[0][column] == 0
    }

    /// Iterates over every window of `CONNECT` cells in every direction
    ///
    /// Each window is yielded as its four cell values.
    pub(crate) fn windows(&self) -> impl Iterator<Item = [u8; CONNECT]> + '_ {
        DIRECTIONS.iter().flat_map(move |&(dr, dc)| {
            (0..ROWS).flat_map(move |row| {
                (0..COLS).filter_map(move |col| self.window_at(row, col, dr, dc))
            })
        })
    }

    fn window_at(&self, row: usize, col: usize, dr: isize, dc: isize) -> Option<[u8; CONNECT]> {
        let mut window = [0; CONNECT];
        for (i, slot) in window.iter_mut().enumerate() {
            let r = row as isize + dr * i as isize;
            let c = col as isize + dc * i as isize;
            if r < 0 || r >= ROWS as isize || c < 0 || c >= COLS as isize {
                return None;
            }
            *slot = self.board[r as usize][c as usize];
        }
        Some(window)
    }

    fn winner(&self) -> Option<Player> {
        self.windows()
            .find(|w| w[0] != 0 && w.iter().all(|&c| c == w[0]))
            .map(|w| if w[0] == 1 { Player::One } else { Player::Two })
    }

    fn is_full(&self) -> bool {
        self.board[0].iter().all(|&c| c != 0)
    }
}

impl Default for Connect4 {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState for Connect4 {
    type Action = usize;
    type Key = u128;

    fn current_player(&self) -> Player {
        self.mover
    }

    fn legal_actions(&self) -> Vec<usize> {
        if self.winner().is_some() {
            return Vec::new();
        }
        (0..COLS).filter(|&col| self.is_legal(col)).collect()
    }

    fn successor(&self, action: &usize) -> Result<Self> {
        let column = *action;
        if !self.is_legal(column) || self.winner().is_some() {
            return Err(SearchError::IllegalAction(format!(
                "column {} is not playable",
                column
            )));
        }

        let mut next = Connect4 {
            board: self.board,
            mover: self.mover.other(),
        };
        // The legality check guarantees an empty cell in this column
        if let Some(row) = (0..ROWS).rev().find(|&r| next.board[r][column] == 0) {
            next.board[row][column] = self.mover.id();
        }
        Ok(next)
    }

    fn terminal(&self) -> (bool, f64) {
        let payoff = self.payoff();
        if payoff != 0.0 {
            (true, payoff)
        } else if self.is_full() {
            (true, 0.0)
        } else {
            (false, 0.0)
        }
    }

    fn payoff(&self) -> f64 {
        match self.winner() {
            Some(player) => player.sign(),
            None => 0.0,
        }
    }

    fn key(&self) -> u128 {
        // 2 bits per cell in row-major order, then 1 bit for the mover: 85 bits
        let mut key: u128 = 0;
        for (shift, &cell) in self.board.iter().flatten().enumerate() {
            key |= (cell as u128 & 0x3) << (2 * shift);
        }
        if self.mover == Player::Two {
            key |= 1u128 << (2 * ROWS * COLS);
        }
        key
    }
}

impl fmt::Display for Connect4 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.board {
            for &cell in row {
                let symbol = match cell {
                    1 => 'X',
                    2 => 'O',
                    _ => '.',
                };
                write!(f, "{} ", symbol)?;
            }
            writeln!(f)?;
        }
        for col in 0..COLS {
            write!(f, "{} ", col)?;
        }
        writeln!(f)?;
        write!(f, "To move: {:?}", self.mover)
    }
}
